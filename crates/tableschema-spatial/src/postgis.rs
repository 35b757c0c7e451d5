//! The PostGIS geometry codec.
//!
//! PostGIS converses in GeoJSON directly: reads select
//! `ST_AsGeoJSON(col)` and writes bind through `ST_GeomFromGeoJSON`, so
//! the decode path is a pass-through of the value the backend already
//! produced. No coordinate transform is applied.

use serde_json::Value;
use tableschema_core::error::{Error, Result};
use tableschema_core::types::GeometryKind;

use crate::codec::GeometryCodec;

/// Codec for PostGIS `geometry` columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgisCodec;

impl PostgisCodec {
    /// Create the codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GeometryCodec for PostgisCodec {
    fn kind(&self) -> GeometryKind {
        GeometryKind::PostGis
    }

    fn select_expression(&self, column: &str) -> String {
        format!("ST_AsGeoJSON({column})")
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        format!("ST_GeomFromGeoJSON({placeholder})")
    }

    fn decode(&self, raw: Option<&str>) -> Result<Option<Value>> {
        let Some(text) = raw else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(text).map_err(|e| Error::InvalidGeoJson {
            message: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn encode(&self, geojson: &Value) -> Result<String> {
        serde_json::to_string(geojson).map_err(|e| Error::InvalidGeoJson {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_and_column_spec() {
        let codec = PostgisCodec::new();
        assert_eq!(codec.kind(), GeometryKind::PostGis);
        assert_eq!(codec.column_spec(), "geometry");
    }

    #[test]
    fn test_expressions() {
        let codec = PostgisCodec::new();
        assert_eq!(codec.select_expression("location"), "ST_AsGeoJSON(location)");
        assert_eq!(codec.bind_expression("$1"), "ST_GeomFromGeoJSON($1)");
    }

    #[test]
    fn test_decode_passes_value_through() {
        let codec = PostgisCodec::new();
        let value = json!({"type": "Point", "coordinates": [30.0, 10.0]});
        let decoded = codec
            .decode(Some(&serde_json::to_string(&value).unwrap()))
            .unwrap();
        assert_eq!(decoded, Some(value));
    }

    #[test]
    fn test_decode_absent_and_empty() {
        let codec = PostgisCodec::new();
        assert_eq!(codec.decode(None).unwrap(), None);
        assert_eq!(codec.decode(Some("")).unwrap(), None);
        assert_eq!(codec.decode(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_decode_malformed_payload() {
        let codec = PostgisCodec::new();
        assert!(matches!(
            codec.decode(Some("{not json")),
            Err(Error::InvalidGeoJson { .. })
        ));
    }

    #[test]
    fn test_write_read_round_trip() {
        let codec = PostgisCodec::new();
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[30.0, 10.0], [40.0, 40.0], [20.0, 40.0], [30.0, 10.0]]],
        });
        let bound = codec.encode(&value).unwrap();
        let read_back = codec.decode(Some(&bound)).unwrap();
        assert_eq!(read_back, Some(value));
    }
}
