use crate::Value;

#[cfg(test)]
mod tests;

/// One-level-deep equality.
///
/// Two values are shallowly equal if they are identical, or if both are arrays of the same
/// length whose elements are pairwise identical, or if both are objects with the same key set
/// whose values are pairwise identical.
/// Nested arrays and objects are compared by reference, not by content.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

/// Compares two values with [`ShallowEq`].
pub fn shallow_eq<T: ShallowEq + ?Sized>(a: &T, b: &T) -> bool {
    a.shallow_eq(b)
}

impl ShallowEq for Value {
    fn shallow_eq(&self, other: &Self) -> bool {
        if self.is_identical(other) {
            return true;
        }
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| a.is_identical(b))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, a)| b.get(key).is_some_and(|b| a.is_identical(b)))
            }
            _ => false,
        }
    }
}

/// `None` is the absent marker. Two absent values are equal; absent and present are not.
impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.shallow_eq(b),
            _ => false,
        }
    }
}

impl<T: ShallowEq + ?Sized> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        T::shallow_eq(*self, *other)
    }
}
