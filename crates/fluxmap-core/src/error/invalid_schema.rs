use super::Error;

/// Error when a series schema definition is invalid.
///
/// This occurs when:
/// - A schema declares duplicate attribute names
/// - More than one column is timestamp-role (or literally named `time`)
/// - More than one name-prefix or name-suffix column is declared
///
/// These errors are caught at registration time, never first-wins.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
