use parse_display::Display;

use crate::ValueKind;

/// Error returned when a typed operation finds a value of the wrong kind.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum StoreError {
    #[display("`{key}` holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: ValueKind,
    },
}

impl StoreError {
    pub(crate) fn type_mismatch(key: &str, expected: &'static str, found: ValueKind) -> Self {
        StoreError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found,
        }
    }
}

impl std::error::Error for StoreError {}
