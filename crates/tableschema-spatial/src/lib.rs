//! Geometry support for `geojson` fields.
//!
//! The translators in `tableschema-map` only decide that a `geojson` field
//! becomes a geometry column; everything backend-specific lives here behind
//! the [`GeometryCodec`] trait. Two codecs are provided: [`PostgisCodec`]
//! for PostGIS `geometry` columns, which converse in GeoJSON natively, and
//! [`SdeCodec`] for ArcSDE `SDE.ST_GEOMETRY` columns, which converse in
//! well-known text and may require a coordinate reprojection on read.
//!
//! ```
//! use tableschema_spatial::{GeometryCodec, PostgisCodec};
//!
//! let codec = PostgisCodec::new();
//! assert_eq!(codec.select_expression("location"), "ST_AsGeoJSON(location)");
//! ```

pub mod codec;
pub mod crs;
pub mod geometry;
pub mod postgis;
pub mod sde;
pub mod wkt;

pub use codec::GeometryCodec;
pub use crs::{Projection, WEB_MERCATOR, WGS84};
pub use geometry::Geometry;
pub use postgis::PostgisCodec;
pub use sde::{SdeCodec, SdeTextMode};
