//! Result-table decoding: position-aligned merge of raw rows back into typed
//! objects.
//!
//! The backend returns one measured field per raw row, so multiple fields for
//! the same timestamp arrive as separate tables whose rows correspond by
//! position. The decoder relies on that alignment as an explicit contract:
//! record `i` of every table, in table order, merges into output object `i`.

use crate::flux::{FluxRecord, FluxTable};
use crate::schema::{registry, ColumnType, Role, SeriesSchema};
use crate::{Error, Result, Series, Value};

/// Outcome of decoding a sequence of result tables.
///
/// Decoding is lenient per row: a failed assignment aborts that row's object
/// only. The failed position is dropped from `rows` and recorded in
/// `failures`; no row failure aborts the batch.
#[derive(Debug, Default)]
pub struct Decoded<T> {
    /// Successfully reconstructed objects, in row-position order.
    pub rows: Vec<T>,

    /// Rows that failed, with the error that stopped each one.
    pub failures: Vec<RowFailure>,
}

/// A single row that failed to decode.
#[derive(Debug)]
pub struct RowFailure {
    pub row: usize,
    pub error: Error,
}

/// Decodes a sequence of result tables into a list of typed objects.
///
/// The longest table dictates the output length; shorter tables populate only
/// the leading positions. Traversal is iterative, so row counts are bounded
/// only by memory.
pub fn decode<T: Series + Default + 'static>(tables: &[FluxTable]) -> Result<Decoded<T>> {
    let schema = registry::describe::<T>()?;

    let mut slots: Vec<Option<T>> = Vec::new();
    let mut failures = Vec::new();

    for table in tables {
        for (i, record) in table.records().iter().enumerate() {
            if i >= slots.len() {
                slots.push(Some(T::default()));
            }

            // A previously failed row stays failed; later tables cannot
            // resurrect it.
            let Some(instance) = slots[i].as_mut() else {
                continue;
            };

            if let Err(cause) = merge(&schema, record, instance) {
                let error = cause.context(Error::row_decode(i));
                log::error!("{error}");
                failures.push(RowFailure { row: i, error });
                slots[i] = None;
            }
        }
    }

    Ok(Decoded {
        rows: slots.into_iter().flatten().collect(),
        failures,
    })
}

/// Merges one raw row into an instance, per the schema's columns.
fn merge<T: Series>(schema: &SeriesSchema, record: &FluxRecord, instance: &mut T) -> Result<()> {
    for column in schema.columns() {
        if matches!(column.role(), Role::NamePrefix | Role::NameSuffix) {
            continue;
        }

        if column.is_time() {
            if let Some(time) = record.time() {
                assign(instance, column.attr(), Value::Timestamp(time))?;
            }
            continue;
        }

        if record.field() == Some(column.column()) {
            // An absent pivot value leaves the attribute untouched.
            let pivot = record.value();
            if !pivot.is_null() {
                assign(instance, column.attr(), narrow(pivot.clone(), column.ty()))?;
            }
            continue;
        }

        // Fall back to the full column map, keyed by attribute name; direct
        // assignment, no coercion.
        if let Some(value) = record.get(column.attr()) {
            assign(instance, column.attr(), value.clone())?;
        }
    }

    Ok(())
}

fn assign<T: Series>(instance: &mut T, attr: &str, value: Value) -> Result<()> {
    instance
        .set(attr, value)
        .map_err(|cause| cause.context(err!("attribute `{attr}`")))
}

/// Read-side numeric narrowing: a floating-point pivot headed for an integer
/// attribute truncates toward zero (saturating), never rounds.
fn narrow(value: Value, ty: ColumnType) -> Value {
    match (ty, &value) {
        (ColumnType::I64, Value::F64(v)) => Value::I64(*v as i64),
        (ColumnType::I32, Value::F64(v)) => Value::I64((*v as i32) as i64),
        _ => value,
    }
}
