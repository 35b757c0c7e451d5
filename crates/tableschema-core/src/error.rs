//! Error types shared across the tableschema crates.

use std::fmt;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by descriptor validation, translation, and the spatial
/// codecs.
///
/// Every error here is fatal to the call that produced it: a failed
/// translation never yields a partial table or a partial descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A declared logical type has no backend mapping, or a backend column
    /// type has no logical mapping. Carries the offending type name and the
    /// field/column it was declared on.
    UnsupportedType {
        /// The type that could not be mapped.
        type_name: String,
        /// The field or column declaring it.
        field: String,
    },
    /// A primary key, foreign key, or index group references a field name
    /// that does not exist in the descriptor.
    UnknownField {
        /// The missing field name.
        field: String,
        /// The table being translated.
        table: String,
    },
    /// Two fields in one descriptor share a name.
    DuplicateField {
        /// The repeated field name.
        field: String,
    },
    /// A foreign key's local and referenced field lists differ in length.
    MismatchedForeignKey {
        /// Number of local fields.
        fields: usize,
        /// Number of referenced fields.
        references: usize,
    },
    /// A composite foreign key constraint references more than one distinct
    /// remote table, which cannot be expressed as a single descriptor
    /// reference.
    MixedForeignKeyTables {
        /// The table owning the constraint.
        table: String,
    },
    /// A value claimed to be GeoJSON could not be interpreted as a geometry.
    InvalidGeoJson {
        /// What went wrong.
        message: String,
    },
    /// A well-known-text payload could not be parsed.
    InvalidWkt {
        /// What went wrong.
        message: String,
    },
    /// No coordinate transform is available between the two configured
    /// spatial reference identifiers.
    UnsupportedProjection {
        /// The source identifier.
        source: String,
        /// The target identifier.
        target: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType { type_name, field } => {
                write!(f, "type \"{type_name}\" of field \"{field}\" is not supported")
            }
            Error::UnknownField { field, table } => {
                write!(f, "field \"{field}\" referenced by table \"{table}\" does not exist")
            }
            Error::DuplicateField { field } => {
                write!(f, "field \"{field}\" is declared more than once")
            }
            Error::MismatchedForeignKey { fields, references } => {
                write!(
                    f,
                    "foreign key binds {fields} local field(s) to {references} referenced field(s)"
                )
            }
            Error::MixedForeignKeyTables { table } => {
                write!(
                    f,
                    "foreign key on table \"{table}\" references more than one remote table"
                )
            }
            Error::InvalidGeoJson { message } => write!(f, "invalid GeoJSON: {message}"),
            Error::InvalidWkt { message } => write!(f, "invalid WKT: {message}"),
            Error::UnsupportedProjection { source, target } => {
                write!(f, "no projection available from \"{source}\" to \"{target}\"")
            }
        }
    }
}

impl std::error::Error for Error {}
