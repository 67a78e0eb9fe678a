use jiff::Timestamp;

/// A single tag, field, or column value moving across the mapping boundary.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point value
    F64(f64),

    /// String value
    String(String),

    /// An absolute instant
    Timestamp(Timestamp),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::F64(_) => "f64",
            Self::String(_) => "String",
            Self::Timestamp(_) => "Timestamp",
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Timestamp> for Value {
    fn from(src: Timestamp) -> Self {
        Self::Timestamp(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_i32() {
        assert_eq!(Value::from(7_i32), Value::I64(7));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::I64(5).as_i64(), Some(5));
        assert_eq!(Value::I64(5).as_str(), None);
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert!(Value::null().is_null());
    }
}
