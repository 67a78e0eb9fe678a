use super::{Column, Role, SeriesBuilder};
use crate::{Series, Value};

/// How empty-string prefix/suffix values participate in name resolution.
///
/// The original behavior treats an empty string as present, producing a
/// leading or trailing underscore in the series name. `Literal` preserves
/// that; `SkipEmpty` opts into the stricter semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    #[default]
    Literal,
    SkipEmpty,
}

/// Per-type descriptor: the measurement-name template plus the declared
/// columns, in declaration order.
#[derive(Debug, Clone)]
pub struct SeriesSchema {
    measurement: Option<String>,
    columns: Vec<Column>,
}

impl SeriesSchema {
    /// Starts a schema for the given measurement-name template.
    pub fn builder(measurement: impl Into<String>) -> SeriesBuilder {
        SeriesBuilder::new().measurement(measurement)
    }

    pub(crate) fn new(measurement: Option<String>, columns: Vec<Column>) -> Self {
        Self {
            measurement,
            columns,
        }
    }

    /// The static measurement-name template, if any.
    pub fn measurement(&self) -> Option<&str> {
        self.measurement.as_deref()
    }

    /// False when the type carries no measurement template. Unmappable types
    /// encode to nothing; they can still be decoded into.
    pub fn is_mappable(&self) -> bool {
        self.measurement.is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The timestamp column, if one is declared.
    pub fn timestamp_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.effective_role() == Role::Timestamp)
    }

    /// Composes the effective series name from the template and the
    /// instance's prefix/suffix values, under the default [`NamePolicy`].
    pub fn resolve_name<T: Series>(&self, instance: &T) -> Option<String> {
        self.resolve_name_with(instance, NamePolicy::default())
    }

    /// Composes the effective series name under an explicit policy.
    ///
    /// Prefix first, then suffix against the possibly-prefixed result:
    /// `prefix_template_suffix`. Returns `None` when the template is absent.
    pub fn resolve_name_with<T: Series>(&self, instance: &T, policy: NamePolicy) -> Option<String> {
        let template = self.measurement.as_deref()?;
        let mut name = template.to_string();

        if let Some(prefix) = self.affix_value(instance, Role::NamePrefix, policy) {
            name = format!("{prefix}_{name}");
        }

        if let Some(suffix) = self.affix_value(instance, Role::NameSuffix, policy) {
            name = format!("{name}_{suffix}");
        }

        Some(name)
    }

    fn affix_value<T: Series>(&self, instance: &T, role: Role, policy: NamePolicy) -> Option<String> {
        let column = self.columns.iter().find(|column| column.role() == role)?;

        match instance.get(column.attr()) {
            Value::String(value) => match policy {
                NamePolicy::SkipEmpty if value.is_empty() => None,
                _ => Some(value),
            },
            _ => None,
        }
    }
}
