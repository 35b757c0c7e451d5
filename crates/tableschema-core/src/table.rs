//! The backend column/constraint/index model.
//!
//! A [`Table`] is the translated form of a descriptor: an ordered set of
//! typed columns plus at most one primary key, any number of foreign keys,
//! and any number of indexes. It is a plain in-memory model; executing it
//! against an engine belongs to the caller.

use crate::types::SqlType;

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within the table.
    pub name: String,
    /// Backend type.
    pub sql_type: SqlType,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Whether the column auto-increments. An auto-increment column is
    /// always integer-typed, non-nullable, and first in column order.
    pub auto_increment: bool,
}

impl Column {
    /// Create a nullable, non-incrementing column.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            auto_increment: false,
        }
    }

    /// Mark as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as auto-incrementing (implies NOT NULL).
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self.nullable = false;
        self
    }
}

/// The table's primary key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Ordered key columns.
    pub columns: Vec<String>,
}

/// A fully qualified reference to a column on some table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// The referenced table's physical name.
    pub table: String,
    /// The referenced column.
    pub column: String,
}

impl ColumnRef {
    /// Create a qualified column reference.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Render as `table.column`.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// A foreign key constraint.
///
/// `columns` and `references` are parallel: local column `i` binds to
/// referenced column `i`. Cardinalities always match when produced by the
/// mapping layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Local column names, in declared order.
    pub columns: Vec<String>,
    /// Qualified remote columns, in corresponding order.
    pub references: Vec<ColumnRef>,
}

/// A named index over an ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name, unique per table.
    pub name: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
}

/// A complete table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Physical table name (prefix + bucket).
    pub name: String,
    /// Ordered columns.
    pub columns: Vec<Column>,
    /// Primary key, if any.
    pub primary_key: Option<PrimaryKey>,
    /// Foreign key constraints.
    pub foreign_keys: Vec<ForeignKey>,
    /// Index definitions.
    pub indexes: Vec<Index>,
}

impl Table {
    /// Create an empty table definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Look up a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
