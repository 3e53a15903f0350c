//! Geolocation records tying a CRS to a geotransform.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{SpectralError, SpectralResult};
use crate::geotransform::GeoTransform;
use crate::point::Point;

/// Whether a location is given in map or pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    #[default]
    Pixel,
    Map,
}

/// Geolocation of a raster or point: a coordinate reference system
/// identifier (opaque string, e.g. "EPSG:32611") plus a geotransform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseGeolocation {
    pub crs: String,
    pub geotransform: GeoTransform,
}

/// Geolocation of a single point, carrying both the map-space and the
/// pixel-space coordinate. The two are computed from one another at
/// construction time and never edited independently afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeolocation {
    pub crs: String,
    pub geotransform: GeoTransform,
    pub map_point: Point,
    pub pixel_point: Point,
}

impl PointGeolocation {
    /// Build a point geolocation from a base geolocation and a location in
    /// either coordinate space; the other space is derived through the
    /// geotransform.
    ///
    /// # Errors
    ///
    /// Map locations go through [`GeoTransform::map_to_pixel`] and fail the
    /// same way it does (degenerate transform, negative pixel coordinate).
    pub fn from_base(
        base: &BaseGeolocation,
        location: (f64, f64),
        kind: LocationKind,
    ) -> SpectralResult<Self> {
        let (map_pt, pixel_pt) = match kind {
            LocationKind::Map => {
                let pixel = base.geotransform.map_to_pixel(location.0, location.1)?;
                (location, pixel)
            }
            LocationKind::Pixel => {
                let map = base.geotransform.pixel_to_map(location.0, location.1, false);
                (map, location)
            }
        };
        Ok(Self {
            crs: base.crs.clone(),
            geotransform: base.geotransform,
            map_point: Point::new(map_pt.0, map_pt.1),
            pixel_point: Point::new(pixel_pt.0, pixel_pt.1),
        })
    }

    /// The base geolocation this point was derived from.
    pub fn base(&self) -> BaseGeolocation {
        BaseGeolocation {
            crs: self.crs.clone(),
            geotransform: self.geotransform,
        }
    }
}

/// Geolocation of a full raster: base geolocation plus pixel dimensions and
/// the bounding box derived from them.
///
/// The bounds are always recomputed from the geotransform and dimensions,
/// including when a record is parsed from disk, so they can never drift
/// from their source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RasterGeolocationRaw")]
pub struct RasterGeolocation {
    pub crs: String,
    pub geotransform: GeoTransform,
    pub height: usize,
    pub width: usize,
    bounds: Bounds,
}

impl RasterGeolocation {
    pub fn new(crs: String, geotransform: GeoTransform, height: usize, width: usize) -> Self {
        let bounds = geotransform.bounding_box(height, width);
        Self {
            crs,
            geotransform,
            height,
            width,
            bounds,
        }
    }

    /// Bounding box derived from the geotransform and dimensions.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[derive(Deserialize)]
struct RasterGeolocationRaw {
    crs: String,
    geotransform: GeoTransform,
    height: usize,
    width: usize,
    // Present in serialized records but always rederived.
    #[serde(default)]
    #[allow(dead_code)]
    bounds: Option<Bounds>,
}

impl TryFrom<RasterGeolocationRaw> for RasterGeolocation {
    type Error = SpectralError;

    fn try_from(raw: RasterGeolocationRaw) -> Result<Self, Self::Error> {
        Ok(RasterGeolocation::new(
            raw.crs,
            raw.geotransform,
            raw.height,
            raw.width,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseGeolocation {
        BaseGeolocation {
            crs: "EPSG:32611".to_string(),
            geotransform: GeoTransform::from_gdal((500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0)),
        }
    }

    #[test]
    fn test_point_from_pixel() {
        let pt = PointGeolocation::from_base(&base(), (10.0, 20.0), LocationKind::Pixel).unwrap();
        assert_eq!(pt.pixel_point, Point::new(10.0, 20.0));
        assert_eq!(pt.map_point, Point::new(500300.0, 4099400.0));
    }

    #[test]
    fn test_point_from_map() {
        let pt =
            PointGeolocation::from_base(&base(), (500300.0, 4099400.0), LocationKind::Map).unwrap();
        assert!((pt.pixel_point.x - 10.0).abs() < 1e-9);
        assert!((pt.pixel_point.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_from_map_out_of_bounds() {
        let err =
            PointGeolocation::from_base(&base(), (499000.0, 4099400.0), LocationKind::Map)
                .unwrap_err();
        assert!(matches!(err, SpectralError::OutOfBounds { .. }));
    }

    #[test]
    fn test_raster_bounds_rederived_on_parse() {
        let geo = RasterGeolocation::new(base().crs, base().geotransform, 100, 200);
        let mut json: serde_json::Value = serde_json::to_value(&geo).unwrap();
        // Tamper with the stored bounds; the parse must correct them.
        json["bounds"]["left"] = serde_json::json!(0.0);
        let parsed: RasterGeolocation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.bounds(), geo.bounds());
    }
}
