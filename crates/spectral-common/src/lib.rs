//! Common types shared across the spectral crates: geospatial primitives
//! (points, bounds, geotransforms, geolocations) and the error taxonomy.

pub mod bounds;
pub mod error;
pub mod geolocation;
pub mod geotransform;
pub mod point;

pub use bounds::Bounds;
pub use error::{SpectralError, SpectralResult};
pub use geolocation::{BaseGeolocation, LocationKind, PointGeolocation, RasterGeolocation};
pub use geotransform::GeoTransform;
pub use point::Point;
