//! The geometry codec seam.
//!
//! A [`GeometryCodec`] is the strategy a backend supplies for moving
//! `geojson` values across the column boundary: how the column is typed in
//! DDL, how a read wraps the raw column in backend-side SQL, and how
//! values convert between GeoJSON and the backend's text encoding. The
//! translators only see the [`GeometryKind`] a codec reports; the storage
//! facade holds the codec itself and applies it on read/write.

use serde_json::Value;
use tableschema_core::error::Result;
use tableschema_core::types::GeometryKind;

/// Backend strategy for `geojson` columns.
pub trait GeometryCodec {
    /// Which backend this codec serves.
    fn kind(&self) -> GeometryKind;

    /// The column type specification used in DDL.
    fn column_spec(&self) -> &'static str {
        self.kind().column_spec()
    }

    /// The backend-side expression that reads the column as text.
    fn select_expression(&self, column: &str) -> String;

    /// The backend-side expression that wraps a bound placeholder on
    /// write.
    fn bind_expression(&self, placeholder: &str) -> String;

    /// Decode a raw result value into GeoJSON.
    ///
    /// Absent and degenerate values decode to `Ok(None)`; that is a
    /// deliberate leniency policy, not a failure path.
    fn decode(&self, raw: Option<&str>) -> Result<Option<Value>>;

    /// Encode a GeoJSON payload into the backend's bound text form.
    fn encode(&self, geojson: &Value) -> Result<String>;
}
