use super::{Column, ColumnType, Role, SeriesSchema};
use crate::{Error, Result};

use std::collections::HashSet;

/// Builds and validates a [`SeriesSchema`].
///
/// Validation happens in [`build`](SeriesBuilder::build): duplicate attribute
/// names and second timestamp/prefix/suffix columns fail registration rather
/// than silently picking a winner.
#[derive(Debug, Default)]
pub struct SeriesBuilder {
    measurement: Option<String>,
    columns: Vec<Column>,
}

impl SeriesBuilder {
    /// Starts a schema with no measurement template. The resulting schema is
    /// not mappable until [`measurement`](SeriesBuilder::measurement) is set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measurement(mut self, name: impl Into<String>) -> Self {
        self.measurement = Some(name.into());
        self
    }

    /// Declares a column in full. The role-specific helpers below are sugar
    /// over this.
    pub fn column(
        mut self,
        attr: impl Into<String>,
        column: impl Into<String>,
        role: Role,
        ty: ColumnType,
    ) -> Self {
        self.columns
            .push(Column::new(attr.into(), column.into(), role, ty));
        self
    }

    /// Declares a string-valued tag.
    pub fn tag(self, attr: &str) -> Self {
        self.column(attr, attr, Role::Tag, ColumnType::String)
    }

    /// Declares the timestamp column. Its column name is always `time`.
    pub fn timestamp(self, attr: &str) -> Self {
        self.column(attr, super::TIME_COLUMN, Role::Timestamp, ColumnType::Timestamp)
    }

    /// Declares the name-prefix attribute.
    pub fn prefix(self, attr: &str) -> Self {
        self.column(attr, attr, Role::NamePrefix, ColumnType::String)
    }

    /// Declares the name-suffix attribute.
    pub fn suffix(self, attr: &str) -> Self {
        self.column(attr, attr, Role::NameSuffix, ColumnType::String)
    }

    /// Declares a measured field under the attribute's own name.
    pub fn field(self, attr: &str, ty: ColumnType) -> Self {
        self.column(attr, attr, Role::Field, ty)
    }

    /// Declares a measured field with an explicit column name.
    pub fn field_as(self, attr: &str, column: &str, ty: ColumnType) -> Self {
        self.column(attr, column, Role::Field, ty)
    }

    pub fn build(self) -> Result<SeriesSchema> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.attr()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate attribute `{}`",
                    column.attr()
                )));
            }
        }

        self.at_most_one(Role::Timestamp, "timestamp")?;
        self.at_most_one(Role::NamePrefix, "name-prefix")?;
        self.at_most_one(Role::NameSuffix, "name-suffix")?;

        Ok(SeriesSchema::new(self.measurement, self.columns))
    }

    fn at_most_one(&self, role: Role, what: &str) -> Result<()> {
        let count = self
            .columns
            .iter()
            .filter(|column| column.effective_role() == role)
            .count();

        if count > 1 {
            return Err(Error::invalid_schema(format!(
                "multiple {what} columns declared"
            )));
        }

        Ok(())
    }
}
