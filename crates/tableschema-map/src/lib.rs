//! Bidirectional translation between Table Schema descriptors and SQL
//! tables.
//!
//! The mapping layer is purely computational: every operation is a
//! synchronous, deterministic transformation of in-memory structures with
//! no I/O. [`SchemaMapper`] carries the configuration (table-name prefix,
//! geometry backend) that the original design kept in process-wide state;
//! passing it explicitly removes the load-order hazard while keeping the
//! configure-once ergonomics.
//!
//! - [`mapper`] — descriptor → table and table → descriptor translation.
//! - [`naming`] — bucket/table name mangling, pure string utilities.
//! - [`ddl`] — `CREATE`/`DROP` statement rendering for translated tables.

pub mod ddl;
pub mod mapper;
pub mod naming;

pub use mapper::SchemaMapper;
pub use naming::{bucket_to_tablename, tablename_to_bucket};
