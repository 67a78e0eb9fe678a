use crate::Value;

use indexmap::IndexMap;
use jiff::Timestamp;

/// One result table returned by a Flux query: an ordered sequence of records.
///
/// Row positions are significant: the decoder merges record `i` of every
/// table into output object `i`. Position alignment across tables is a
/// contract the query backend must uphold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluxTable {
    records: Vec<FluxRecord>,
}

impl FluxTable {
    pub fn new(records: Vec<FluxRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FluxRecord] {
        &self.records
    }

    pub fn push(&mut self, record: FluxRecord) {
        self.records.push(record);
    }
}

/// One raw result row.
///
/// A row measures a single field: `field` names it (the pivot field) and
/// `value` carries its value. `values` is the full column map for the row,
/// and `time` is the row timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluxRecord {
    values: IndexMap<String, Value>,
    field: Option<String>,
    value: Value,
    time: Option<Timestamp>,
}

impl FluxRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pivot field name and value.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field = Some(field.into());
        self.value = value.into();
        self
    }

    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Adds an entry to the full column map.
    pub fn with_column(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// The pivot field name, if this row measured one.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The pivot value. [`Value::Null`] means the row measured nothing.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn time(&self) -> Option<Timestamp> {
        self.time
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}
