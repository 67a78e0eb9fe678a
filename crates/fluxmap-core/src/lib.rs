#[macro_use]
mod macros;

#[macro_use]
mod error;
pub use error::Error;

pub mod decode;
pub mod flux;
pub mod point;
pub mod query;
pub mod schema;

mod series;
pub use series::{ColumnValue, Series};

mod value;
pub use value::Value;

pub use jiff::Timestamp;

/// A Result type alias that uses fluxmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
