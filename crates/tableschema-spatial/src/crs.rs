//! Coordinate reference system transforms.
//!
//! The mapping layer only ever needs the transform between the two systems
//! the original deployments used: WGS 84 geographic coordinates
//! (`EPSG:4326`) and spherical Web Mercator (`EPSG:3857`), both of which
//! have closed forms. Identifiers are accepted as bare codes (`4326`) or
//! authority-qualified (`EPSG:4326`), case-insensitively. Any other pair
//! is an [`Error::UnsupportedProjection`].

use tableschema_core::error::{Error, Result};

use crate::geometry::{Geometry, Position};

/// WGS 84 geographic coordinates, the GeoJSON default.
pub const WGS84: &str = "EPSG:4326";

/// Spherical Web Mercator.
pub const WEB_MERCATOR: &str = "EPSG:3857";

/// Earth radius of the spherical Mercator model, in meters.
const EARTH_RADIUS: f64 = 6_378_137.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Identity,
    Wgs84ToWebMercator,
    WebMercatorToWgs84,
}

/// A transform between a source and a target spatial reference system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    source: String,
    target: String,
    conversion: Conversion,
}

impl Projection {
    /// Build the transform between two spatial reference identifiers.
    pub fn between(source: &str, target: &str) -> Result<Projection> {
        let source_code = normalize(source);
        let target_code = normalize(target);
        let conversion = if source_code == target_code {
            Conversion::Identity
        } else {
            match (source_code.as_str(), target_code.as_str()) {
                ("4326", "3857") => Conversion::Wgs84ToWebMercator,
                ("3857", "4326") => Conversion::WebMercatorToWgs84,
                _ => {
                    return Err(Error::UnsupportedProjection {
                        source: source.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        };
        Ok(Projection {
            source: source.to_string(),
            target: target.to_string(),
            conversion,
        })
    }

    /// The source identifier as configured.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The target identifier as configured.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Transform every position of a geometry. Dimensions beyond the
    /// first two pass through untouched.
    #[must_use]
    pub fn transform(&self, geometry: &Geometry) -> Geometry {
        match self.conversion {
            Conversion::Identity => geometry.clone(),
            Conversion::Wgs84ToWebMercator => {
                geometry.map_positions(&|p| project(p, forward))
            }
            Conversion::WebMercatorToWgs84 => {
                geometry.map_positions(&|p| project(p, inverse))
            }
        }
    }
}

/// Strip an `EPSG:`-style authority prefix and uppercase the rest.
fn normalize(identifier: &str) -> String {
    let trimmed = identifier.trim();
    match trimmed.rsplit_once(':') {
        Some((_, code)) => code.to_uppercase(),
        None => trimmed.to_uppercase(),
    }
}

fn project(position: &[f64], convert: fn(f64, f64) -> (f64, f64)) -> Position {
    if position.len() < 2 {
        return position.to_vec();
    }
    let (x, y) = convert(position[0], position[1]);
    let mut out = Vec::with_capacity(position.len());
    out.push(x);
    out.push(y);
    out.extend_from_slice(&position[2..]);
    out
}

fn forward(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

fn inverse(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "{actual} not within {tolerance} of {expected}"
        );
    }

    #[test]
    fn test_identity_when_codes_match() {
        let projection = Projection::between("EPSG:4326", "4326").unwrap();
        let point = Geometry::Point(vec![12.5, 41.9]);
        assert_eq!(projection.transform(&point), point);
    }

    #[test]
    fn test_unsupported_pair_rejected() {
        let err = Projection::between("EPSG:4326", "EPSG:27700").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedProjection {
                source: "EPSG:4326".to_string(),
                target: "EPSG:27700".to_string(),
            }
        );
    }

    #[test]
    fn test_forward_projection_known_values() {
        let projection = Projection::between(WGS84, WEB_MERCATOR).unwrap();
        let point = Geometry::Point(vec![0.0, 0.0]);
        assert_eq!(projection.transform(&point), Geometry::Point(vec![0.0, 0.0]));

        // London (-0.1276, 51.5072) in meters.
        let london = projection.transform(&Geometry::Point(vec![-0.1276, 51.5072]));
        match london {
            Geometry::Point(p) => {
                assert_close(p[0], -14_204.367, 0.01);
                assert_close(p[1], 6_711_506.705, 0.01);
            }
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn test_projection_round_trip() {
        let forward = Projection::between(WGS84, WEB_MERCATOR).unwrap();
        let backward = Projection::between(WEB_MERCATOR, WGS84).unwrap();
        let original = Geometry::LineString(vec![vec![30.0, 10.0], vec![-45.5, -23.25]]);
        let there = forward.transform(&original);
        let back = backward.transform(&there);
        match (back, original) {
            (Geometry::LineString(actual), Geometry::LineString(expected)) => {
                for (a, e) in actual.iter().zip(&expected) {
                    assert_close(a[0], e[0], 1e-9);
                    assert_close(a[1], e[1], 1e-9);
                }
            }
            _ => panic!("shape changed in round trip"),
        }
    }

    #[test]
    fn test_extra_dimensions_pass_through() {
        let projection = Projection::between(WGS84, WEB_MERCATOR).unwrap();
        let point = projection.transform(&Geometry::Point(vec![0.0, 0.0, 99.0]));
        assert_eq!(point, Geometry::Point(vec![0.0, 0.0, 99.0]));
    }

    #[test]
    fn test_normalize_accepts_authority_prefixes() {
        assert!(Projection::between("epsg:4326", "EPSG:3857").is_ok());
        assert!(Projection::between("4326", "3857").is_ok());
    }
}
