//! Logical field types and backend SQL types.
//!
//! The two enums here are the two halves of the mapping layer's type
//! tables: [`FieldType`] is what a descriptor declares, [`SqlType`] is what
//! a backend column carries. Both sides are explicit tagged variants with
//! direct lookup in each direction; nothing relies on inspecting a type
//! hierarchy at runtime.

use crate::error::{Error, Result};

/// A logical field type as declared in a Table Schema descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Free-form text.
    String,
    /// Floating point number.
    Number,
    /// Whole number.
    Integer,
    /// True/false.
    Boolean,
    /// Arbitrary JSON object.
    Object,
    /// Arbitrary JSON array.
    Array,
    /// Calendar date without time.
    Date,
    /// Time of day without date.
    Time,
    /// Combined date and time.
    Datetime,
    /// GeoJSON geometry.
    Geojson,
}

impl FieldType {
    /// Parse a declared type string from a descriptor.
    ///
    /// Returns `None` for anything outside the supported set; callers turn
    /// that into [`Error::UnsupportedType`] so the diagnostic can name the
    /// declaring field.
    #[must_use]
    pub fn parse(raw: &str) -> Option<FieldType> {
        match raw {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "integer" => Some(FieldType::Integer),
            "boolean" => Some(FieldType::Boolean),
            "object" => Some(FieldType::Object),
            "array" => Some(FieldType::Array),
            "date" => Some(FieldType::Date),
            "time" => Some(FieldType::Time),
            "datetime" => Some(FieldType::Datetime),
            "geojson" => Some(FieldType::Geojson),
            _ => None,
        }
    }

    /// The descriptor spelling of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Datetime => "datetime",
            FieldType::Geojson => "geojson",
        }
    }
}

/// The geometry backend a `geojson` field is stored with.
///
/// Each variant corresponds to one spatial extension; the matching codec
/// lives in `tableschema-spatial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// PostGIS `geometry` columns.
    PostGis,
    /// ArcSDE `SDE.ST_GEOMETRY` columns.
    SdeSt,
}

impl GeometryKind {
    /// The column type specification used in DDL for this backend.
    #[must_use]
    pub const fn column_spec(self) -> &'static str {
        match self {
            GeometryKind::PostGis => "geometry",
            GeometryKind::SdeSt => "SDE.ST_GEOMETRY",
        }
    }
}

/// A backend column type.
///
/// This is the column half of the translation tables. `Other` carries the
/// raw spelling of anything introspection hands us that we do not
/// recognize; classifying it fails with a diagnostic naming that spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Unbounded text.
    Text,
    /// Fixed-length character.
    Char,
    /// Variable-length character.
    Varchar,
    /// National variable-length character.
    Nvarchar,
    /// Unique identifier.
    Uuid,
    /// Double-precision float.
    Float,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
    /// JSON document.
    Json,
    /// Binary JSON document.
    Jsonb,
    /// Array-typed column.
    Array,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp,
    /// Spatial geometry stored by the given backend.
    Geometry(GeometryKind),
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

impl SqlType {
    /// Parse a raw column type string as reported by backend introspection.
    ///
    /// Matching is case-insensitive and tolerant of length arguments such
    /// as `VARCHAR(255)`. Array spellings are tested before the JSON
    /// fallthrough so `JSONB[]` classifies as an array. Never fails:
    /// unknown spellings become [`SqlType::Other`].
    #[must_use]
    pub fn parse(raw: &str) -> SqlType {
        let trimmed = raw.trim();
        let upper = trimmed.to_uppercase();
        let base = upper.split('(').next().unwrap_or("").trim().to_string();

        if base.ends_with("[]") || base == "ARRAY" || base.starts_with('_') {
            return SqlType::Array;
        }

        match base.as_str() {
            "TEXT" | "CLOB" => SqlType::Text,
            "CHAR" | "CHARACTER" | "BPCHAR" => SqlType::Char,
            "VARCHAR" | "CHARACTER VARYING" | "VARCHAR2" => SqlType::Varchar,
            "NVARCHAR" | "NVARCHAR2" => SqlType::Nvarchar,
            "UUID" => SqlType::Uuid,
            "FLOAT" | "REAL" | "DOUBLE" | "DOUBLE PRECISION" | "NUMERIC" | "DECIMAL" => {
                SqlType::Float
            }
            "INT" | "INTEGER" | "BIGINT" | "SMALLINT" => SqlType::Integer,
            "BOOL" | "BOOLEAN" => SqlType::Boolean,
            "JSON" => SqlType::Json,
            "JSONB" => SqlType::Jsonb,
            "DATE" => SqlType::Date,
            "TIME" => SqlType::Time,
            "TIMESTAMP" | "TIMESTAMPTZ" | "DATETIME" => SqlType::Timestamp,
            "GEOMETRY" => SqlType::Geometry(GeometryKind::PostGis),
            "SDE.ST_GEOMETRY" | "ST_GEOMETRY" => SqlType::Geometry(GeometryKind::SdeSt),
            _ => SqlType::Other(trimmed.to_string()),
        }
    }

    /// The spelling used for this type in generated DDL.
    #[must_use]
    pub fn sql_name(&self) -> &str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::Nvarchar => "NVARCHAR",
            SqlType::Uuid => "UUID",
            SqlType::Float => "DOUBLE PRECISION",
            SqlType::Integer => "INTEGER",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Json => "JSON",
            SqlType::Jsonb => "JSONB",
            SqlType::Array => "ARRAY",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Geometry(kind) => kind.column_spec(),
            SqlType::Other(raw) => raw,
        }
    }

    /// Classify this column type as a logical field type.
    ///
    /// Returns `None` when no logical category applies, in which case the
    /// reverse translation fails with [`Error::UnsupportedType`].
    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            SqlType::Text | SqlType::Char | SqlType::Varchar | SqlType::Nvarchar | SqlType::Uuid => {
                Some(FieldType::String)
            }
            SqlType::Float => Some(FieldType::Number),
            SqlType::Integer => Some(FieldType::Integer),
            SqlType::Boolean => Some(FieldType::Boolean),
            SqlType::Json | SqlType::Jsonb => Some(FieldType::Object),
            SqlType::Array => Some(FieldType::Array),
            SqlType::Date => Some(FieldType::Date),
            SqlType::Time => Some(FieldType::Time),
            SqlType::Timestamp => Some(FieldType::Datetime),
            SqlType::Geometry(_) => Some(FieldType::Geojson),
            SqlType::Other(_) => None,
        }
    }

    /// Classify, failing with a diagnostic naming the column.
    pub fn field_type_for_column(&self, column: &str) -> Result<FieldType> {
        self.field_type().ok_or_else(|| Error::UnsupportedType {
            type_name: self.sql_name().to_string(),
            field: column.to_string(),
        })
    }
}
