//! Core types for Table Schema to SQL mapping.
//!
//! `tableschema-core` is the foundation layer for the workspace. It defines
//! the data models both translation directions share:
//!
//! - **Descriptor model**: [`Descriptor`], [`Field`], [`KeyRef`] — the
//!   JSON-based schema description of a tabular resource.
//! - **Type model**: [`FieldType`] (logical) and [`SqlType`] (backend),
//!   with direct mapping tables in each direction.
//! - **Table model**: [`Table`], [`Column`], [`ForeignKey`], [`Index`] —
//!   the backend column/constraint/index representation.
//! - **Errors**: one [`Error`] taxonomy used by every crate in the
//!   workspace.
//!
//! `tableschema-map` builds the translators on top of these types and
//! `tableschema-spatial` supplies the geometry codecs behind
//! [`GeometryKind`]. Most applications should use the `tableschema-sql`
//! facade.

pub mod descriptor;
pub mod error;
pub mod table;
pub mod types;
pub mod validate;

pub use descriptor::{Constraints, Descriptor, Field, ForeignKeyRef, KeyRef, Reference};
pub use error::{Error, Result};
pub use table::{Column, ColumnRef, ForeignKey, Index, PrimaryKey, Table};
pub use types::{FieldType, GeometryKind, SqlType};
pub use validate::{is_plain_identifier, validate_descriptor};
