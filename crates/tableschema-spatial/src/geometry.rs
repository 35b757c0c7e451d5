//! The geometry value model.
//!
//! [`Geometry`] is the in-memory form a `geojson` value takes between the
//! schema-level GeoJSON representation and a backend's text encoding. It
//! covers the seven GeoJSON geometry types; coordinate positions keep
//! whatever dimensions the source carried.

use serde_json::{Value, json};
use tableschema_core::error::{Error, Result};

/// One coordinate position (longitude, latitude, and any extra dimensions).
pub type Position = Vec<f64>;

/// A geometry value.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position. An empty position models `POINT EMPTY`.
    Point(Position),
    /// A set of positions.
    MultiPoint(Vec<Position>),
    /// An ordered line of positions.
    LineString(Vec<Position>),
    /// A set of lines.
    MultiLineString(Vec<Vec<Position>>),
    /// An outer ring plus inner rings.
    Polygon(Vec<Vec<Position>>),
    /// A set of polygons.
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    /// A heterogeneous collection.
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// The GeoJSON `type` tag for this geometry.
    #[must_use]
    pub const fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Whether the coordinate container is empty (the degenerate form a
    /// backend reports for an empty geometry).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(position) => position.is_empty(),
            Geometry::MultiPoint(positions) => positions.is_empty(),
            Geometry::LineString(positions) => positions.is_empty(),
            Geometry::MultiLineString(lines) => lines.is_empty(),
            Geometry::Polygon(rings) => rings.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.is_empty(),
            Geometry::GeometryCollection(geometries) => geometries.is_empty(),
        }
    }

    /// Parse a GeoJSON object into a geometry.
    pub fn from_geojson(value: &Value) -> Result<Geometry> {
        let type_tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing or non-string \"type\""))?;

        if type_tag == "GeometryCollection" {
            let members = value
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| invalid("GeometryCollection without \"geometries\""))?;
            let geometries = members
                .iter()
                .map(Geometry::from_geojson)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Geometry::GeometryCollection(geometries));
        }

        let coordinates = value
            .get("coordinates")
            .ok_or_else(|| invalid("missing \"coordinates\""))?;

        match type_tag {
            "Point" => Ok(Geometry::Point(position(coordinates)?)),
            "MultiPoint" => Ok(Geometry::MultiPoint(positions(coordinates)?)),
            "LineString" => Ok(Geometry::LineString(positions(coordinates)?)),
            "MultiLineString" => Ok(Geometry::MultiLineString(lines(coordinates)?)),
            "Polygon" => Ok(Geometry::Polygon(lines(coordinates)?)),
            "MultiPolygon" => Ok(Geometry::MultiPolygon(polygons(coordinates)?)),
            other => Err(invalid(&format!("unknown geometry type \"{other}\""))),
        }
    }

    /// Serialize to a GeoJSON object.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        match self {
            Geometry::Point(position) => json!({
                "type": "Point",
                "coordinates": position,
            }),
            Geometry::MultiPoint(positions) => json!({
                "type": "MultiPoint",
                "coordinates": positions,
            }),
            Geometry::LineString(positions) => json!({
                "type": "LineString",
                "coordinates": positions,
            }),
            Geometry::MultiLineString(lines) => json!({
                "type": "MultiLineString",
                "coordinates": lines,
            }),
            Geometry::Polygon(rings) => json!({
                "type": "Polygon",
                "coordinates": rings,
            }),
            Geometry::MultiPolygon(polygons) => json!({
                "type": "MultiPolygon",
                "coordinates": polygons,
            }),
            Geometry::GeometryCollection(geometries) => json!({
                "type": "GeometryCollection",
                "geometries": geometries.iter().map(Geometry::to_geojson).collect::<Vec<_>>(),
            }),
        }
    }

    /// Apply a per-position transform, preserving structure.
    #[must_use]
    pub fn map_positions(&self, transform: &dyn Fn(&[f64]) -> Position) -> Geometry {
        let map_one = |p: &Position| transform(p);
        let map_line = |line: &Vec<Position>| line.iter().map(map_one).collect::<Vec<_>>();
        let map_rings =
            |rings: &Vec<Vec<Position>>| rings.iter().map(map_line).collect::<Vec<_>>();
        match self {
            Geometry::Point(position) => Geometry::Point(map_one(position)),
            Geometry::MultiPoint(positions) => Geometry::MultiPoint(map_line(positions)),
            Geometry::LineString(positions) => Geometry::LineString(map_line(positions)),
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(map_rings(lines)),
            Geometry::Polygon(rings) => Geometry::Polygon(map_rings(rings)),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons.iter().map(map_rings).collect(),
            ),
            Geometry::GeometryCollection(geometries) => Geometry::GeometryCollection(
                geometries.iter().map(|g| g.map_positions(transform)).collect(),
            ),
        }
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidGeoJson {
        message: message.to_string(),
    }
}

fn position(value: &Value) -> Result<Position> {
    let numbers = value
        .as_array()
        .ok_or_else(|| invalid("position is not an array"))?;
    numbers
        .iter()
        .map(|n| n.as_f64().ok_or_else(|| invalid("non-numeric coordinate")))
        .collect()
}

fn positions(value: &Value) -> Result<Vec<Position>> {
    value
        .as_array()
        .ok_or_else(|| invalid("coordinates are not an array"))?
        .iter()
        .map(position)
        .collect()
}

fn lines(value: &Value) -> Result<Vec<Vec<Position>>> {
    value
        .as_array()
        .ok_or_else(|| invalid("coordinates are not an array"))?
        .iter()
        .map(positions)
        .collect()
}

fn polygons(value: &Value) -> Result<Vec<Vec<Vec<Position>>>> {
    value
        .as_array()
        .ok_or_else(|| invalid("coordinates are not an array"))?
        .iter()
        .map(lines)
        .collect()
}
