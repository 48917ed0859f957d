use std::{
    any::{type_name, Any},
    cell::Cell,
    rc::{Rc, Weak},
};

use derive_ex::derive_ex;

use crate::{Binding, Store, Value};


/// A UI component instance, as seen by the hooks in this crate.
///
/// A host framework keeps one `Component` per mounted component and calls
/// [`render`](Self::render) whenever [`is_dirty`](Self::is_dirty) becomes true (or when the
/// scheduler passed to [`with_scheduler`](Self::with_scheduler) is called).
/// Dropping the component releases every hook it owns.
#[derive_ex(Default)]
#[default(Self::new())]
pub struct Component {
    hooks: Vec<Box<dyn Any>>,
    node: Rc<ComponentNode>,
    render_count: usize,
}

struct ComponentNode {
    is_dirty: Cell<bool>,
    scheduler: Option<Box<dyn Fn()>>,
}

impl Component {
    pub fn new() -> Self {
        Self::from_node(ComponentNode {
            is_dirty: Cell::new(true),
            scheduler: None,
        })
    }

    /// Create a component that calls `f` each time a hook requests a re-render.
    pub fn with_scheduler(f: impl Fn() + 'static) -> Self {
        Self::from_node(ComponentNode {
            is_dirty: Cell::new(true),
            scheduler: Some(Box::new(f)),
        })
    }

    fn from_node(node: ComponentNode) -> Self {
        Self {
            hooks: Vec::new(),
            node: Rc::new(node),
            render_count: 0,
        }
    }

    /// Runs one render pass.
    ///
    /// Hooks are matched to slots by call order. Slots not reached during this pass are dropped.
    pub fn render<T>(&mut self, f: impl FnOnce(&mut RenderContext) -> T) -> T {
        self.node.is_dirty.set(false);
        self.render_count += 1;
        let mut cx = RenderContext {
            hooks: &mut self.hooks,
            index: 0,
            node: &self.node,
        };
        let value = f(&mut cx);
        let used = cx.index;
        self.hooks.truncate(used);
        value
    }

    /// Returns true if a hook requested a re-render since the last render pass.
    ///
    /// A new component is dirty until its first render.
    pub fn is_dirty(&self) -> bool {
        self.node.is_dirty.get()
    }
    pub fn render_count(&self) -> usize {
        self.render_count
    }
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
    pub fn render_trigger(&self) -> RenderTrigger {
        RenderTrigger(Rc::downgrade(&self.node))
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("is_dirty", &self.is_dirty())
            .field("render_count", &self.render_count)
            .field("hook_count", &self.hooks.len())
            .finish()
    }
}

/// Context passed to a render pass of a [`Component`].
pub struct RenderContext<'a> {
    hooks: &'a mut Vec<Box<dyn Any>>,
    index: usize,
    node: &'a Rc<ComponentNode>,
}

impl RenderContext<'_> {
    /// Returns the state stored in the next hook slot, creating it with `init` on first use.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds state of another type, which happens when hooks are called in
    /// a different order than in the previous render.
    pub fn use_hook<T: 'static>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        let index = self.index;
        self.index += 1;
        if index == self.hooks.len() {
            self.hooks.push(Box::new(init()));
        }
        match self.hooks[index].downcast_mut::<T>() {
            Some(hook) => hook,
            None => panic!(
                "hook #{index} is not `{}`. hooks must be called in the same order on every render.",
                type_name::<T>()
            ),
        }
    }

    pub fn render_trigger(&self) -> RenderTrigger {
        RenderTrigger(Rc::downgrade(self.node))
    }
}

/// Requests a re-render of a [`Component`]. Does nothing once the component is dropped.
#[derive(Clone)]
pub struct RenderTrigger(Weak<ComponentNode>);

impl RenderTrigger {
    pub fn request(&self) {
        if let Some(node) = self.0.upgrade() {
            node.is_dirty.set(true);
            if let Some(scheduler) = &node.scheduler {
                scheduler();
            }
        }
    }
}

impl Store {
    /// Reads `key` and re-renders the current component when its value changes.
    ///
    /// The first call in a hook slot registers a [`Binding`]. Later calls move it when `key`
    /// changes. The return value is always read from the store, never from the binding's cache.
    pub fn use_value(&self, cx: &mut RenderContext, key: &str) -> Option<Value> {
        let trigger = cx.render_trigger();
        let binding = cx.use_hook(|| {
            let trigger = trigger.clone();
            Binding::new(self, key, move || trigger.request())
        });
        if binding.store().ptr_eq(self) {
            binding.rebind(key);
        } else {
            *binding = Binding::new(self, key, move || trigger.request());
        }
        self.get(key)
    }
}
