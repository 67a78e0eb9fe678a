/// The column name that always denotes the timestamp column, regardless of
/// the role it was declared with.
pub const TIME_COLUMN: &str = "time";

/// The role a declared attribute plays in the series mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// String-valued, indexed dimension on the point
    Tag,

    /// The single point timestamp
    Timestamp,

    /// A measured value
    Field,

    /// Contributes to the series name; never part of the point body
    NamePrefix,

    /// Contributes to the series name; never part of the point body
    NameSuffix,
}

/// The declared static type of a column.
///
/// Only the numeric width matters: it decides whether a floating-point pivot
/// value is truncated on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Bool,
    I32,
    I64,
    F64,
    String,
    Timestamp,
}

/// Per-attribute descriptor within a [`SeriesSchema`](super::SeriesSchema).
#[derive(Debug, Clone)]
pub struct Column {
    /// Attribute name on the mapped type. Tags and fields are written under
    /// this key, and full-map lookups on decode use it.
    attr: String,

    /// Logical column name. Defaults to the attribute name; only the literal
    /// `time` special case and pivot-field matching consult it.
    column: String,

    role: Role,

    ty: ColumnType,
}

impl Column {
    pub(crate) fn new(attr: String, column: String, role: Role, ty: ColumnType) -> Self {
        Self {
            attr,
            column,
            role,
            ty,
        }
    }

    pub fn attr(&self) -> &str {
        &self.attr
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn ty(&self) -> ColumnType {
        self.ty
    }

    /// True when the column is literally named `time`.
    pub fn is_time(&self) -> bool {
        self.column == TIME_COLUMN
    }

    /// The role after applying the `time` column-name override.
    pub fn effective_role(&self) -> Role {
        if self.is_time() && !matches!(self.role, Role::NamePrefix | Role::NameSuffix) {
            Role::Timestamp
        } else {
            self.role
        }
    }
}
