//! The ArcSDE `ST_GEOMETRY` codec.
//!
//! SDE columns converse in well-known text through the `sde.st_astext` /
//! `sde.st_geomfromtext` functions. Reads wrap the column in a backend-side
//! emptiness guard so degenerate geometries arrive as SQL NULL; whatever
//! still arrives empty (empty string, `POINT EMPTY`, any WKT with no
//! coordinates) decodes to `None` rather than an error. When both a source
//! and a target spatial reference identifier are configured and differ,
//! decoded geometries are reprojected before serialization to GeoJSON.

use serde_json::{Value, json};
use tableschema_core::error::Result;
use tableschema_core::types::GeometryKind;

use crate::codec::GeometryCodec;
use crate::crs::{Projection, WGS84};
use crate::geometry::Geometry;
use crate::wkt;

/// Spatial reference identifier used on the bind path.
// TODO: derive the bind SRID from the configured source reference instead
// of fixing it to 4326; writes into a reprojected deployment currently
// bypass the transform.
const BIND_SRID: u32 = 4326;

/// How the deployment returns geometry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SdeTextMode {
    /// `st_astext` returns a large object the driver materializes in
    /// full before decoding.
    #[default]
    Lob,
    /// `st_astext` is additionally wrapped in `TO_CHAR` so the value
    /// arrives as a plain character column.
    Char,
}

/// Codec for `SDE.ST_GEOMETRY` columns.
#[derive(Debug, Clone, Default)]
pub struct SdeCodec {
    text_mode: SdeTextMode,
    source: Option<String>,
    target: Option<String>,
}

impl SdeCodec {
    /// Create a codec with the default text mode and no reprojection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the deployment's text mode.
    #[must_use]
    pub fn with_text_mode(mut self, mode: SdeTextMode) -> Self {
        self.text_mode = mode;
        self
    }

    /// Configure a reprojection from `source` to `target` applied on
    /// decode.
    #[must_use]
    pub fn with_reprojection(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.source = Some(source.into());
        self.target = Some(target.into());
        self
    }

    /// The projection to apply on decode, when one is configured.
    fn projection(&self) -> Result<Option<Projection>> {
        match (self.source.as_deref(), self.target.as_deref()) {
            (Some(source), Some(target))
                if !source.is_empty() && !target.is_empty() && source != target =>
            {
                Projection::between(source, target).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// The identifier recorded in the decoded value's `crs` member.
    fn crs_name(&self) -> &str {
        self.target
            .as_deref()
            .or(self.source.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(WGS84)
    }
}

impl GeometryCodec for SdeCodec {
    fn kind(&self) -> GeometryKind {
        GeometryKind::SdeSt
    }

    fn select_expression(&self, column: &str) -> String {
        let text = match self.text_mode {
            SdeTextMode::Lob => format!("sde.st_astext({column})"),
            SdeTextMode::Char => format!("TO_CHAR(sde.st_astext({column}))"),
        };
        format!("CASE WHEN sde.st_isempty({column}) = 1 THEN NULL ELSE {text} END")
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        format!("sde.st_geomfromtext({placeholder}, {BIND_SRID})")
    }

    fn decode(&self, raw: Option<&str>) -> Result<Option<Value>> {
        let Some(text) = raw else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let geometry = wkt::parse(text)?;
        if geometry.is_empty() {
            tracing::debug!(wkt = text, "degenerate geometry decoded as null");
            return Ok(None);
        }

        let geometry = match self.projection()? {
            Some(projection) => projection.transform(&geometry),
            None => geometry,
        };

        let mut value = geometry.to_geojson();
        value["crs"] = json!({
            "type": "name",
            "properties": {"name": self.crs_name()},
        });
        Ok(Some(value))
    }

    fn encode(&self, geojson: &Value) -> Result<String> {
        let geometry = Geometry::from_geojson(geojson)?;
        Ok(wkt::encode(&geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::WEB_MERCATOR;

    #[test]
    fn test_kind_and_column_spec() {
        let codec = SdeCodec::new();
        assert_eq!(codec.kind(), GeometryKind::SdeSt);
        assert_eq!(codec.column_spec(), "SDE.ST_GEOMETRY");
    }

    #[test]
    fn test_select_expression_lob_mode() {
        let codec = SdeCodec::new();
        assert_eq!(
            codec.select_expression("shape"),
            "CASE WHEN sde.st_isempty(shape) = 1 THEN NULL ELSE sde.st_astext(shape) END"
        );
    }

    #[test]
    fn test_select_expression_char_mode() {
        let codec = SdeCodec::new().with_text_mode(SdeTextMode::Char);
        assert_eq!(
            codec.select_expression("shape"),
            "CASE WHEN sde.st_isempty(shape) = 1 THEN NULL ELSE TO_CHAR(sde.st_astext(shape)) END"
        );
    }

    #[test]
    fn test_bind_expression() {
        let codec = SdeCodec::new();
        assert_eq!(
            codec.bind_expression(":1"),
            "sde.st_geomfromtext(:1, 4326)"
        );
    }

    #[test]
    fn test_decode_degenerate_values() {
        let codec = SdeCodec::new();
        assert_eq!(codec.decode(None).unwrap(), None);
        assert_eq!(codec.decode(Some("")).unwrap(), None);
        assert_eq!(codec.decode(Some("  ")).unwrap(), None);
        assert_eq!(codec.decode(Some("POINT EMPTY")).unwrap(), None);
        assert_eq!(codec.decode(Some("POLYGON EMPTY")).unwrap(), None);
    }

    #[test]
    fn test_decode_defaults_crs_to_wgs84() {
        let codec = SdeCodec::new();
        let value = codec.decode(Some("POINT (30 10)")).unwrap().unwrap();
        assert_eq!(value["type"], "Point");
        assert_eq!(value["coordinates"][0], 30.0);
        assert_eq!(value["crs"]["properties"]["name"], WGS84);
    }

    #[test]
    fn test_decode_reprojects_and_names_target_crs() {
        let codec = SdeCodec::new().with_reprojection(WEB_MERCATOR, WGS84);
        let value = codec
            .decode(Some("POLYGON ((0 0, 111319 0, 111319 111325, 0 0))"))
            .unwrap()
            .unwrap();
        assert_eq!(value["type"], "Polygon");
        assert_eq!(value["crs"]["properties"]["name"], WGS84);
        // 111319m east of the meridian is about one degree of longitude.
        let lon = value["coordinates"][0][1][0].as_f64().unwrap();
        assert!((lon - 1.0).abs() < 0.01, "unexpected longitude {lon}");
    }

    #[test]
    fn test_decode_same_srids_skip_reprojection() {
        let codec = SdeCodec::new().with_reprojection(WGS84, WGS84);
        let value = codec.decode(Some("POINT (30 10)")).unwrap().unwrap();
        assert_eq!(value["coordinates"][0], 30.0);
        assert_eq!(value["crs"]["properties"]["name"], WGS84);
    }

    #[test]
    fn test_encode_geojson_to_wkt() {
        let codec = SdeCodec::new();
        let value = serde_json::json!({
            "type": "LineString",
            "coordinates": [[30.0, 10.0], [10.0, 30.0]],
        });
        assert_eq!(codec.encode(&value).unwrap(), "LINESTRING (30 10, 10 30)");
    }

    #[test]
    fn test_encode_rejects_malformed_geojson() {
        let codec = SdeCodec::new();
        let err = codec.encode(&serde_json::json!({"type": "Point"})).unwrap_err();
        assert!(matches!(
            err,
            tableschema_core::error::Error::InvalidGeoJson { .. }
        ));
    }

    #[test]
    fn test_wkt_round_trip_through_codec() {
        let codec = SdeCodec::new();
        let value = codec
            .decode(Some("POLYGON ((35 10, 45 45, 15 40, 35 10))"))
            .unwrap()
            .unwrap();
        let without_crs = serde_json::json!({
            "type": value["type"],
            "coordinates": value["coordinates"],
        });
        let wkt = codec.encode(&without_crs).unwrap();
        assert_eq!(wkt, "POLYGON ((35 10, 45 45, 15 40, 35 10))");
    }
}
