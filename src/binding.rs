use std::{cell::RefCell, rc::Rc};

use tracing::trace;

use crate::{ShallowEq, Store, Subscription, Value};

#[cfg(test)]
mod tests;

/// Observes one key of a [`Store`] and signals a re-render when its value changes.
///
/// The binding keeps the last value it accepted. On each write to the key, the new value is
/// compared with [`ShallowEq`]; `on_change` is called only if they differ.
/// Dropping the binding removes its listener.
pub struct Binding {
    store: Store,
    key: String,
    node: Rc<BindingNode>,
    subscription: Subscription,
}

struct BindingNode {
    cached: RefCell<Option<Value>>,
    on_change: Box<dyn Fn()>,
}

impl Binding {
    pub fn new(store: &Store, key: &str, on_change: impl Fn() + 'static) -> Self {
        let node = Rc::new(BindingNode {
            cached: RefCell::new(store.get(key)),
            on_change: Box::new(on_change),
        });
        let subscription = node.subscribe(store, key);
        Self {
            store: store.clone(),
            key: key.to_owned(),
            node,
            subscription,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the current value from the store. The cached value is not used.
    pub fn get(&self) -> Option<Value> {
        self.store.get(&self.key)
    }

    /// Returns the last value accepted by this binding.
    pub fn cached(&self) -> Option<Value> {
        self.node.cached.borrow().clone()
    }

    /// Moves the binding to `key`.
    ///
    /// If `key` differs from the current key, the old listener is removed, the cache is
    /// re-read from the store and a listener for `key` is registered. Returns whether the key
    /// changed.
    pub fn rebind(&mut self, key: &str) -> bool {
        if self.key == key {
            return false;
        }
        trace!(from = %self.key, to = key, "rebind");
        self.subscription.unsubscribe();
        *self.node.cached.borrow_mut() = self.store.get(key);
        self.key = key.to_owned();
        self.subscription = self.node.subscribe(&self.store, key);
        true
    }
}

impl BindingNode {
    fn subscribe(self: &Rc<Self>, store: &Store, key: &str) -> Subscription {
        let node = self.clone();
        store.subscribe_key(key, move |value| node.on_notify(value))
    }

    fn on_notify(&self, value: Option<&Value>) {
        let changed = {
            let mut cached = self.cached.borrow_mut();
            if cached.as_ref().shallow_eq(&value) {
                false
            } else {
                *cached = value.cloned();
                true
            }
        };
        if changed {
            (self.on_change)();
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("cached", &self.node.cached.try_borrow().ok())
            .finish()
    }
}
