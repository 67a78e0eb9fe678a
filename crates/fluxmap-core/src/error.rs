mod invalid_schema;
mod row_decode;
mod type_conversion;

use invalid_schema::InvalidSchema;
use row_decode::RowDecode;
use std::sync::Arc;
use type_conversion::TypeConversion;

/// Returns early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in fluxmap.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    InvalidSchema(InvalidSchema),
    TypeConversion(TypeConversion),
    RowDecode(RowDecode),
    Unknown,
}

impl Error {
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Anyhow(anyhow::Error::msg(std::fmt::format(
            args,
        ))))
    }

    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root
    /// cause.
    pub fn context(self, consequent: impl Into<Error>) -> Error {
        self.context_impl(consequent.into())
    }

    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                // The consequent was already shared; fold its message in.
                Err(shared) => ErrorKind::Anyhow(anyhow::anyhow!("{}", shared.kind)),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            RowDecode(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown fluxmap error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<jiff::Error> for Error {
    fn from(err: jiff::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
