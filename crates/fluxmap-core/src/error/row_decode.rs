use super::Error;

/// Error when a result row fails to decode into its target object.
///
/// Decoding is lenient: a row failure aborts that row's object only. The
/// decoder records this error against the row position and continues with the
/// remaining rows.
#[derive(Debug)]
pub(super) struct RowDecode {
    row: usize,
}

impl std::error::Error for RowDecode {}

impl core::fmt::Display for RowDecode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to decode row {}", self.row)
    }
}

impl Error {
    /// Creates a row decode error for the given row position.
    pub fn row_decode(row: usize) -> Error {
        Error::from(super::ErrorKind::RowDecode(RowDecode { row }))
    }

    /// Returns `true` if this error is a row decode error.
    pub fn is_row_decode(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RowDecode(_))
    }
}
