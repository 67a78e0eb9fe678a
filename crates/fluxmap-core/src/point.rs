use crate::schema::{registry, Role};
use crate::{Result, Series, Value};

use indexmap::IndexMap;
use jiff::Timestamp;

/// An immutable write point: series name, tag assignments, field assignments,
/// and at most one timestamp, held at millisecond precision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    measurement: String,
    tags: IndexMap<String, String>,
    fields: IndexMap<String, Value>,
    time: Option<Timestamp>,
}

impl Point {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            ..Default::default()
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn time(&self) -> Option<Timestamp> {
        self.time
    }

    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Sets the point timestamp, truncated to millisecond precision.
    pub fn set_time(&mut self, time: Timestamp) {
        self.time = Some(Timestamp::from_millisecond(time.as_millisecond()).unwrap_or(time));
    }
}

/// Encodes a mappable instance into a write point.
///
/// Returns `Ok(None)` when the series name does not resolve (the type is not
/// mappable); callers treat that as a no-op, not an error. A tag whose value
/// is not a string is skipped with a logged warning; the rest of the point is
/// still produced.
pub fn encode<T: Series + 'static>(instance: &T) -> Result<Option<Point>> {
    let schema = registry::describe::<T>()?;

    let Some(name) = schema.resolve_name(instance) else {
        return Ok(None);
    };

    let mut point = Point::new(name);
    for column in schema.columns() {
        match column.effective_role() {
            Role::NamePrefix | Role::NameSuffix => {}
            Role::Tag => match instance.get(column.attr()) {
                Value::Null => {}
                Value::String(value) => point.add_tag(column.attr(), value),
                other => {
                    log::warn!(
                        "skipping tag `{}`: {} value is not a string",
                        column.attr(),
                        other.type_name()
                    );
                }
            },
            Role::Timestamp => match instance.get(column.attr()) {
                Value::Null => {}
                Value::Timestamp(time) => point.set_time(time),
                other => {
                    log::warn!(
                        "skipping timestamp `{}`: {} value is not a timestamp",
                        column.attr(),
                        other.type_name()
                    );
                }
            },
            Role::Field => match instance.get(column.attr()) {
                Value::Null => {}
                // Declared i32 attributes were already widened to I64 by the
                // accessor; no narrowing happens on write.
                value => point.add_field(column.attr(), value),
            },
        }
    }

    Ok(Some(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, SeriesSchema};
    use crate::Error;

    series! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct DiskStat {
            measurement = "disk";
            prefix host: Option<String>,
            tag device: String,
            time at: Option<crate::Timestamp>,
            field read_sect: i64,
            field write_sect: i32,
            field busy: f64,
        }
    }

    fn timestamp(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn encodes_tags_fields_and_time() {
        let stat = DiskStat {
            host: Some("web1".to_string()),
            device: "sda".to_string(),
            at: Some(timestamp("2024-03-01T10:20:30.123456789Z")),
            read_sect: 120,
            write_sect: 7,
            busy: 0.25,
        };

        let point = encode(&stat).unwrap().unwrap();
        assert_eq!(point.measurement(), "web1_disk");
        assert_eq!(point.tags().get("device").map(String::as_str), Some("sda"));
        assert_eq!(point.fields().get("read_sect"), Some(&Value::I64(120)));
        // i32 fields widen to 64-bit integers on write
        assert_eq!(point.fields().get("write_sect"), Some(&Value::I64(7)));
        assert_eq!(point.fields().get("busy"), Some(&Value::F64(0.25)));
        // timestamp truncated to millisecond precision
        assert_eq!(
            point.time(),
            Some(timestamp("2024-03-01T10:20:30.123Z"))
        );
        // name affixes never land in the point body
        assert!(point.tags().get("host").is_none());
        assert!(point.fields().get("host").is_none());
    }

    #[test]
    fn null_attributes_contribute_nothing() {
        let stat = DiskStat {
            device: "sda".to_string(),
            ..Default::default()
        };

        let point = encode(&stat).unwrap().unwrap();
        assert_eq!(point.measurement(), "disk");
        assert_eq!(point.time(), None);
        assert_eq!(point.fields().len(), 3);
    }

    // Hand-rolled impl with no measurement template: the "not mappable" case.
    #[derive(Debug, Default)]
    struct Unmapped {
        total: i64,
    }

    impl Series for Unmapped {
        fn schema() -> Result<SeriesSchema> {
            crate::schema::SeriesBuilder::new()
                .field("total", ColumnType::I64)
                .build()
        }

        fn get(&self, attr: &str) -> Value {
            match attr {
                "total" => Value::I64(self.total),
                _ => Value::Null,
            }
        }

        fn set(&mut self, attr: &str, value: Value) -> Result<()> {
            match attr {
                "total" => {
                    self.total = value
                        .as_i64()
                        .ok_or_else(|| Error::type_conversion(value, "i64"))?;
                    Ok(())
                }
                _ => Err(err!("unknown attribute `{}`", attr)),
            }
        }
    }

    #[test]
    fn unmappable_type_encodes_to_none() {
        let point = encode(&Unmapped { total: 3 }).unwrap();
        assert!(point.is_none());
    }

    // A tag attribute that reads as a non-string is skipped per-field.
    #[derive(Debug, Default)]
    struct BadTag;

    impl Series for BadTag {
        fn schema() -> Result<SeriesSchema> {
            SeriesSchema::builder("bad")
                .tag("code")
                .field("total", ColumnType::I64)
                .build()
        }

        fn get(&self, attr: &str) -> Value {
            match attr {
                "code" => Value::I64(404),
                "total" => Value::I64(1),
                _ => Value::Null,
            }
        }

        fn set(&mut self, _attr: &str, _value: Value) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn non_string_tag_is_skipped_not_fatal() {
        let point = encode(&BadTag).unwrap().unwrap();
        assert!(point.tags().is_empty());
        assert_eq!(point.fields().get("total"), Some(&Value::I64(1)));
    }
}
