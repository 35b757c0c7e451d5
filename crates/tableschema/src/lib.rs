//! Map Table Schema descriptors onto SQL tables, and back.
//!
//! This crate is the facade over the workspace: it re-exports the data
//! models from `tableschema-core`, the translators and DDL rendering from
//! `tableschema-map`, and the geometry codecs from `tableschema-spatial`
//! under one roof.
//!
//! ```
//! use tableschema_sql::prelude::*;
//!
//! let descriptor = Descriptor::new()
//!     .field(Field::new("id", "integer").required())
//!     .field(Field::new("name", "string"))
//!     .primary_key("id");
//!
//! let mapper = SchemaMapper::new("main_");
//! let table = mapper
//!     .descriptor_to_table("articles", &descriptor, &[], None)
//!     .unwrap();
//! assert_eq!(table.name, "main_articles");
//!
//! let round = mapper.table_to_descriptor(&table, None).unwrap();
//! assert_eq!(round, descriptor);
//! ```

pub use tableschema_core::{
    Column, ColumnRef, Constraints, Descriptor, Error, Field, FieldType, ForeignKey,
    ForeignKeyRef, GeometryKind, Index, KeyRef, PrimaryKey, Reference, Result, SqlType, Table,
    is_plain_identifier, validate_descriptor,
};
pub use tableschema_map::{SchemaMapper, bucket_to_tablename, ddl, tablename_to_bucket};
pub use tableschema_spatial::{
    Geometry, GeometryCodec, PostgisCodec, Projection, SdeCodec, SdeTextMode, WEB_MERCATOR, WGS84,
};

/// Everything most applications need, in one import.
pub mod prelude {
    pub use tableschema_core::{
        Column, Descriptor, Error, Field, FieldType, ForeignKeyRef, GeometryKind, KeyRef,
        Reference, Result, SqlType, Table,
    };
    pub use tableschema_map::SchemaMapper;
    pub use tableschema_spatial::{GeometryCodec, PostgisCodec, SdeCodec};
}
