use crate::Value;

use super::Error;

/// Error when a value cannot be converted to the expected attribute type.
#[derive(Debug)]
pub(super) struct TypeConversion {
    value: Value,
    to_type: &'static str,
}

impl std::error::Error for TypeConversion {}

impl core::fmt::Display for TypeConversion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.value.type_name(), self.to_type)
    }
}

impl Error {
    /// Creates a type conversion error.
    pub fn type_conversion(value: Value, to_type: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversion {
            value,
            to_type,
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }
}
