//! Per-type schema memoization.
//!
//! Read-mostly, write-once-per-type: lookups take the read lock, the first
//! description of a type takes the write lock. Registration failures are not
//! cached, so an invalid schema reports its error on every call.

use super::SeriesSchema;
use crate::{Result, Series};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static SCHEMAS: OnceLock<RwLock<HashMap<TypeId, Arc<SeriesSchema>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<TypeId, Arc<SeriesSchema>>> {
    SCHEMAS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the memoized schema descriptor for `T`, building it on first use.
pub fn describe<T: Series + 'static>() -> Result<Arc<SeriesSchema>> {
    let cache = cache();

    if let Some(schema) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<T>())
    {
        return Ok(schema.clone());
    }

    // Built outside the lock; a concurrent first call builds the same schema
    // and the entry API keeps whichever landed first.
    let schema = Arc::new(T::schema()?);

    let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
    Ok(guard
        .entry(TypeId::of::<T>())
        .or_insert_with(|| schema)
        .clone())
}
