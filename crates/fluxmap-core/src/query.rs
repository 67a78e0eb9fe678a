//! Flux query composition. Pure string building, no I/O.
//!
//! Known limitation, preserved for wire compatibility: bucket, measurement,
//! and field names are interpolated verbatim. A name containing `"` breaks
//! out of its quoted literal; escaping would change emitted queries and
//! belongs in a follow-on hardening layer, not here.

/// Composes the bucket-scope, range, and measurement-filter clauses, plus a
/// disjunctive field filter when `fields` is non-empty.
///
/// Field clauses are joined by `or` only; joining by `and` would change
/// result sets.
pub fn range_filter(bucket: &str, measurement: &str, fields: &[&str], start: &str) -> String {
    let mut query = format!(
        "from(bucket: \"{bucket}\") |> range(start: {start}) \
         |> filter(fn: (r) => r._measurement == \"{measurement}\")"
    );

    if !fields.is_empty() {
        query.push_str(" |> filter(fn: (r) => ");
        for (i, field) in fields.iter().enumerate() {
            if i == 0 {
                query.push_str(&format!(" r._field == \"{field}\""));
            } else {
                query.push_str(&format!(" or r._field == \"{field}\""));
            }
        }
        query.push(')');
    }

    query
}

/// [`range_filter`] plus an aggregation window with a mean reducer.
///
/// `createEmpty: true` keeps missing windows as empty rows, which the decoder
/// relies on for consistent row alignment.
pub fn aggregate(
    bucket: &str,
    measurement: &str,
    fields: &[&str],
    start: &str,
    every: &str,
) -> String {
    let mut query = range_filter(bucket, measurement, fields, start);
    query.push_str(&format!(
        " |> aggregateWindow(every: {every}, fn: mean, createEmpty: true)"
    ));
    query
}

/// Canned (start, window) pairs for the common lookbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Raw points over the last day; no aggregation window.
    Raw,

    /// 1-minute means over the last day.
    Minute,

    /// 5-minute means over the last day.
    FiveMinutes,

    /// Hourly means over the last 7 days.
    Hour,

    /// Daily means over the last month.
    Day,
}

impl Granularity {
    pub fn start(&self) -> &'static str {
        match self {
            Self::Raw | Self::Minute | Self::FiveMinutes => "-1d",
            Self::Hour => "-7d",
            Self::Day => "-1M",
        }
    }

    pub fn window(&self) -> Option<&'static str> {
        match self {
            Self::Raw => None,
            Self::Minute => Some("1m"),
            Self::FiveMinutes => Some("5m"),
            Self::Hour => Some("1h"),
            Self::Day => Some("1d"),
        }
    }

    /// The full query for this granularity.
    pub fn query(&self, bucket: &str, measurement: &str, fields: &[&str]) -> String {
        match self.window() {
            None => range_filter(bucket, measurement, fields, self.start()),
            Some(every) => aggregate(bucket, measurement, fields, self.start(), every),
        }
    }
}
