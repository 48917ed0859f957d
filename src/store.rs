use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use derive_ex::derive_ex;
use serde::{Deserialize, Serialize};
use slabmap::SlabMap;
use tracing::{debug, trace};

use crate::{StoreError, Subscription, Value};


/// A keyed state container that notifies listeners on every write.
///
/// `Store` is a handle: clones share the same state and listeners.
/// Every write notifies synchronously, on the caller's stack, before returning.
#[derive(Clone)]
#[derive_ex(Default)]
#[default(Self::new())]
pub struct Store(Rc<StoreNode>);

struct StoreNode {
    state: RefCell<HashMap<String, Value>>,
    initial: BTreeMap<String, Value>,
    listeners: RefCell<Listeners>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_initial(Vec::<(String, Value)>::new())
    }

    /// Create a store whose state starts as a copy of `initial`.
    ///
    /// `initial` is also kept as the target of [`reset`](Self::reset) and
    /// [`reset_all`](Self::reset_all).
    pub fn with_initial<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let initial: BTreeMap<String, Value> = initial
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let state = initial
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self(Rc::new(StoreNode {
            state: RefCell::new(state),
            initial,
            listeners: RefCell::new(Listeners::default()),
        }))
    }

    /// Returns the current value of `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.state.borrow().get(key).cloned()
    }

    /// Overwrites the value of `key` and notifies its listeners.
    ///
    /// There is no equality check: writing an identical value notifies again.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.write(key, Some(value.into()));
    }

    /// Registers a listener for writes to any key.
    pub fn subscribe(&self, f: impl Fn(&str, Option<&Value>) + 'static) -> Subscription {
        self.register(None, listener(f))
    }

    /// Registers a listener for writes to `key` only.
    pub fn subscribe_key(&self, key: &str, f: impl Fn(Option<&Value>) + 'static) -> Subscription {
        self.register(Some(key.to_owned()), listener(move |_, value| f(value)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.state.borrow().contains_key(key)
    }
    pub fn len(&self) -> usize {
        self.0.state.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.state.borrow().is_empty()
    }
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.0.state.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.0
            .state
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns the number of listeners registered for `key` alone.
    pub fn listener_count(&self, key: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .keyed
            .get(key)
            .map_or(0, |listeners| listeners.len())
    }

    /// Returns true if both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Store) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Sets `key` to the negation of its current truthiness.
    pub fn toggle(&self, key: &str) {
        let value = self.get(key).is_some_and(|v| v.is_truthy());
        self.set(key, !value);
    }

    /// Adds one to a numeric value. An absent or `null` value counts as zero.
    pub fn inc(&self, key: &str) -> Result<(), StoreError> {
        self.add(key, 1)
    }

    /// Subtracts one from a numeric value. An absent or `null` value counts as zero.
    pub fn dec(&self, key: &str) -> Result<(), StoreError> {
        self.add(key, -1)
    }

    fn add(&self, key: &str, delta: i64) -> Result<(), StoreError> {
        let value = match self.get(key) {
            None | Some(Value::Null) => Value::Int(delta),
            Some(Value::Int(value)) => Value::Int(value.saturating_add(delta)),
            Some(Value::Float(value)) => Value::Float(value + delta as f64),
            Some(value) => return Err(StoreError::type_mismatch(key, "a number", value.kind())),
        };
        self.set(key, value);
        Ok(())
    }

    /// Appends `item` to a copy of the array held by `key`.
    ///
    /// An absent or `null` value starts a new array.
    pub fn push(&self, key: &str, item: impl Into<Value>) -> Result<(), StoreError> {
        let mut items = match self.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.to_vec(),
            Some(value) => return Err(StoreError::type_mismatch(key, "an array", value.kind())),
        };
        items.push(item.into());
        self.set(key, Value::Array(Rc::new(items)));
        Ok(())
    }

    /// Removes the element at `index` from a copy of the array held by `key`.
    ///
    /// An index past the end removes nothing. A value that is not an array is replaced by an
    /// empty array. The key is written, and its listeners notified, in every case.
    pub fn remove_at(&self, key: &str, index: usize) {
        let mut items = self.array_or_empty(key);
        if index < items.len() {
            items.remove(index);
        }
        self.set(key, Value::Array(Rc::new(items)));
    }

    /// Removes every element for which `f` returns true from a copy of the array held by `key`.
    ///
    /// A value that is not an array is replaced by an empty array.
    pub fn remove_where(&self, key: &str, mut f: impl FnMut(&Value) -> bool) {
        let mut items = self.array_or_empty(key);
        items.retain(|item| !f(item));
        self.set(key, Value::Array(Rc::new(items)));
    }

    fn array_or_empty(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            Some(Value::Array(items)) => items.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Restores `key` to the value it had at construction.
    ///
    /// The restored value is the same reference that was passed in.
    /// If `key` was not part of the initial state, it is cleared and listeners receive `None`.
    pub fn reset(&self, key: &str) {
        let value = self.0.initial.get(key).cloned();
        self.write(key, value);
    }

    /// Restores every key of the initial state. Keys added later are left untouched.
    pub fn reset_all(&self) {
        for (key, value) in &self.0.initial {
            self.write(key, Some(value.clone()));
        }
    }

    fn write(&self, key: &str, value: Option<Value>) {
        {
            let mut state = self.0.state.borrow_mut();
            match &value {
                Some(value) => {
                    state.insert(key.to_owned(), value.clone());
                }
                None => {
                    state.remove(key);
                }
            }
        }
        self.notify(key, value.as_ref());
        match &value {
            Some(value) => debug!(key, value = %value, "set"),
            None => debug!(key, "cleared"),
        }
    }

    fn notify(&self, key: &str, value: Option<&Value>) {
        let listeners = self.0.listeners.borrow().collect(key);
        for listener in listeners {
            if listener.is_active.get() {
                (listener.f)(key, value);
            }
        }
    }

    fn register(&self, key: Option<String>, listener: Rc<Listener>) -> Subscription {
        let index = self
            .0
            .listeners
            .borrow_mut()
            .insert(key.as_deref(), listener.clone());
        trace!(key = key.as_deref().unwrap_or("*"), index, "subscribe");
        let node = Rc::downgrade(&self.0);
        Subscription::from_fn(move || {
            listener.is_active.set(false);
            if let Some(node) = node.upgrade() {
                node.listeners.borrow_mut().remove(key.as_deref(), index);
            }
            trace!(key = key.as_deref().unwrap_or("*"), index, "unsubscribe");
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_initial(iter)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.state.try_borrow() {
            Ok(state) => f.debug_map().entries(state.iter()).finish(),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}

impl Serialize for Store {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        self.snapshot().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Store {
    fn deserialize<D>(deserializer: D) -> Result<Store, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let initial = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Store::with_initial(initial))
    }
}

type ListenerFn = dyn Fn(&str, Option<&Value>);

struct Listener<F: ?Sized = ListenerFn> {
    is_active: Cell<bool>,
    f: F,
}
fn listener(f: impl Fn(&str, Option<&Value>) + 'static) -> Rc<Listener> {
    Rc::new(Listener {
        is_active: Cell::new(true),
        f,
    })
}

#[derive(Default)]
struct Listeners {
    keyed: HashMap<String, SlabMap<Rc<Listener>>>,
    any: SlabMap<Rc<Listener>>,
}
impl Listeners {
    fn insert(&mut self, key: Option<&str>, listener: Rc<Listener>) -> usize {
        match key {
            Some(key) => self
                .keyed
                .entry(key.to_owned())
                .or_insert_with(SlabMap::new)
                .insert(listener),
            None => self.any.insert(listener),
        }
    }
    fn remove(&mut self, key: Option<&str>, index: usize) {
        match key {
            Some(key) => {
                if let Some(listeners) = self.keyed.get_mut(key) {
                    listeners.remove(index);
                    if listeners.is_empty() {
                        self.keyed.remove(key);
                    }
                }
            }
            None => {
                self.any.remove(index);
            }
        }
    }

    /// Listeners for `key` first, then listeners for any key.
    fn collect(&self, key: &str) -> Vec<Rc<Listener>> {
        self.keyed
            .get(key)
            .into_iter()
            .flat_map(|listeners| listeners.values())
            .chain(self.any.values())
            .cloned()
            .collect()
    }
}
