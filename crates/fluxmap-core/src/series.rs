use crate::schema::{ColumnType, SeriesSchema};
use crate::{Error, Result, Value};

use jiff::Timestamp;

/// A type that maps to a timeseries.
///
/// Implementations are usually generated by the [`series!`] macro, which
/// replaces annotation scanning with explicit, validated registration. The
/// schema built by [`Series::schema`] is memoized per type by
/// [`schema::registry::describe`](crate::schema::registry::describe).
///
/// [`series!`]: crate::series!
pub trait Series {
    /// Declarative column registration for this type.
    fn schema() -> Result<SeriesSchema>
    where
        Self: Sized;

    /// Reads the current value of a declared attribute.
    ///
    /// Unknown attributes read as [`Value::Null`].
    fn get(&self, attr: &str) -> Value;

    /// Assigns a decoded value to a declared attribute.
    fn set(&mut self, attr: &str, value: Value) -> Result<()>;
}

/// A Rust type that can live in a series column.
///
/// Drives both directions of the mapping: `TYPE` feeds the schema builder
/// (numeric width matters for read-side narrowing), `into_value` feeds point
/// encoding, and `from_value` feeds result decoding.
pub trait ColumnValue: Sized {
    const TYPE: ColumnType;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_column_value {
    ($ty:ty, $column_ty:ident, $variant:ident, $name:literal) => {
        impl ColumnValue for $ty {
            const TYPE: ColumnType = ColumnType::$column_ty;

            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(value) => Ok(value),
                    other => Err(Error::type_conversion(other, $name)),
                }
            }
        }
    };
}

impl_column_value!(bool, Bool, Bool, "bool");
impl_column_value!(i64, I64, I64, "i64");
impl_column_value!(f64, F64, F64, "f64");
impl_column_value!(String, String, String, "String");
impl_column_value!(Timestamp, Timestamp, Timestamp, "Timestamp");

impl ColumnValue for i32 {
    const TYPE: ColumnType = ColumnType::I32;

    fn into_value(self) -> Value {
        Value::I64(self.into())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(value) => {
                i32::try_from(value).map_err(|_| Error::type_conversion(Value::I64(value), "i32"))
            }
            other => Err(Error::type_conversion(other, "i32")),
        }
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    const TYPE: ColumnType = T::TYPE;

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
