//! A small keyed state store for UI components.
//!
//! - [`Store`] holds values by key and notifies listeners synchronously on every write.
//! - [`Binding`] watches one key and signals a re-render only when the value changes by
//!   [`shallow_eq`].
//! - [`Component`] and [`Store::use_value`] connect bindings to a host framework's render loop.
//!
//! ```
//! use statebind::{Component, Store, Value};
//!
//! let store = Store::with_initial([("count", 0)]);
//! let mut c = Component::new();
//!
//! let count = c.render(|cx| store.use_value(cx, "count"));
//! assert_eq!(count, Some(Value::Int(0)));
//!
//! store.inc("count").unwrap();
//! assert!(c.is_dirty());
//! ```
mod binding;
mod component;
mod error;
mod field;
mod shallow_eq;
mod store;
mod subscription;
mod value;

pub use binding::*;
pub use component::*;
pub use error::*;
pub use field::*;
pub use shallow_eq::*;
pub use store::*;
pub use subscription::*;
pub use value::*;
