use std::marker::PhantomData;

use derive_ex::derive_ex;

use crate::{RenderContext, Store, StoreError, Value};


/// A store key with a fixed value type.
///
/// ```
/// use statebind::{Field, Store};
///
/// const COUNT: Field<i64> = Field::new("count");
///
/// let store = Store::with_initial([("count", 1)]);
/// store.set_field(&COUNT, 2);
/// assert_eq!(store.get_field(&COUNT), Ok(Some(2)));
/// ```
#[derive_ex(Clone(bound()))]
pub struct Field<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field<{}>({:?})", std::any::type_name::<T>(), self.key)
    }
}

/// Conversion from a stored [`Value`] into a typed field value.
pub trait FromValue: Sized {
    /// Describes the accepted values in error messages.
    const EXPECTED: &'static str;

    /// Returns `None` if `value` is not of the expected kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
impl FromValue for bool {
    const EXPECTED: &'static str = "a bool";
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}
impl FromValue for i64 {
    const EXPECTED: &'static str = "an int";
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}
impl FromValue for f64 {
    const EXPECTED: &'static str = "a number";
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}
impl FromValue for String {
    const EXPECTED: &'static str = "a string";
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}
impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "an array of matching items";
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}

fn convert<T: FromValue>(key: &str, value: Option<Value>) -> Result<Option<T>, StoreError> {
    value
        .map(|value| {
            T::from_value(&value)
                .ok_or_else(|| StoreError::type_mismatch(key, T::EXPECTED, value.kind()))
        })
        .transpose()
}

impl Store {
    /// Reads a typed field.
    ///
    /// Returns `Ok(None)` if the key was never set, and an error if it holds a value of
    /// another kind.
    pub fn get_field<T: FromValue>(&self, field: &Field<T>) -> Result<Option<T>, StoreError> {
        convert(field.key, self.get(field.key))
    }

    pub fn set_field<T: Into<Value>>(&self, field: &Field<T>, value: T) {
        self.set(field.key, value);
    }

    /// Typed form of [`use_value`](Store::use_value).
    pub fn use_field<T: FromValue>(
        &self,
        cx: &mut RenderContext,
        field: &Field<T>,
    ) -> Result<Option<T>, StoreError> {
        convert(field.key, self.use_value(cx, field.key))
    }
}
