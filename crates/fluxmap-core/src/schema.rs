mod builder;
pub use builder::SeriesBuilder;

mod column;
pub use column::{Column, ColumnType, Role, TIME_COLUMN};

pub mod registry;

mod series_schema;
pub use series_schema::{NamePolicy, SeriesSchema};

use crate::{Result, Series};

/// Resolves the effective series name for an instance.
///
/// Returns `None` when the type is not mappable (no measurement template) —
/// callers treat that as a no-op, not an error.
pub fn series_name<T: Series + 'static>(instance: &T) -> Result<Option<String>> {
    Ok(registry::describe::<T>()?.resolve_name(instance))
}
