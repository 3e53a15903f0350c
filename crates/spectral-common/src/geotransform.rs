//! Affine geotransform between pixel and map coordinate spaces.
//!
//! The transform is the standard six-coefficient raster affine:
//!
//! ```text
//! x_map = x0 + col * xres + row * row_rotation
//! y_map = y0 + row * yres + col * col_rotation
//! ```
//!
//! where (x0, y0) is the map coordinate of the raster's upper-left corner.
//! For north-up rasters `yres` is negative, and the rotation terms are
//! usually zero.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{SpectralError, SpectralResult};
use crate::point::Point;

/// An affine geotransform matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// Map coordinates of the upper-left corner of the raster.
    pub upperleft: Point,
    /// East-west resolution in map units per pixel.
    pub xres: f64,
    /// Row rotation/shear term. Usually 0.
    pub row_rotation: f64,
    /// North-south resolution in map units per pixel (negative for north-up).
    pub yres: f64,
    /// Column rotation/shear term. Usually 0.
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a geotransform from a GDAL-style sextuple
    /// `(x0, xres, row_rotation, y0, yres, col_rotation)`.
    pub fn from_gdal(t: (f64, f64, f64, f64, f64, f64)) -> Self {
        Self {
            upperleft: Point::new(t.0, t.3),
            xres: t.1,
            row_rotation: t.2,
            yres: t.4,
            col_rotation: t.5,
        }
    }

    /// Return the GDAL-style sextuple. Exact round-trip of [`from_gdal`].
    ///
    /// [`from_gdal`]: GeoTransform::from_gdal
    pub fn to_gdal(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.upperleft.x,
            self.xres,
            self.row_rotation,
            self.upperleft.y,
            self.yres,
            self.col_rotation,
        )
    }

    /// Determinant of the 2x2 linear part.
    ///
    /// The transform is invertible iff this is nonzero.
    fn determinant(&self) -> f64 {
        self.xres * self.yres - self.row_rotation * self.col_rotation
    }

    /// Convert a pixel coordinate to a map coordinate.
    ///
    /// `wrap_longitude` shifts a negative resulting x by +360, for global
    /// rasters whose x axis crosses the antimeridian.
    pub fn pixel_to_map(&self, xpixel: f64, ypixel: f64, wrap_longitude: bool) -> (f64, f64) {
        let mut xmap = self.upperleft.x + xpixel * self.xres + ypixel * self.row_rotation;
        let ymap = self.upperleft.y + ypixel * self.yres + xpixel * self.col_rotation;

        if wrap_longitude && xmap < 0.0 {
            xmap += 360.0;
        }
        (xmap, ymap)
    }

    /// Convert a map coordinate to a pixel coordinate.
    ///
    /// The inverse of [`pixel_to_map`], solved by Cramer's rule on the 2x2
    /// matrix `[[xres, row_rotation], [col_rotation, yres]]`.
    ///
    /// # Errors
    ///
    /// * [`SpectralError::DegenerateTransform`] when the determinant is zero
    ///   (or the inversion produces a non-finite value).
    /// * [`SpectralError::OutOfBounds`] when either resulting pixel
    ///   coordinate is negative, i.e. the map point lies left of or above
    ///   the raster origin. Coordinates beyond the positive edges are not
    ///   checked here because the transform does not know the raster size.
    ///
    /// [`pixel_to_map`]: GeoTransform::pixel_to_map
    pub fn map_to_pixel(&self, xmap: f64, ymap: f64) -> SpectralResult<(f64, f64)> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(SpectralError::DegenerateTransform);
        }

        let dx = xmap - self.upperleft.x;
        let dy = ymap - self.upperleft.y;

        let xpixel = (dx * self.yres - dy * self.row_rotation) / det;
        let ypixel = (dy * self.xres - dx * self.col_rotation) / det;

        if !xpixel.is_finite() || !ypixel.is_finite() {
            return Err(SpectralError::DegenerateTransform);
        }
        if xpixel < 0.0 {
            return Err(SpectralError::OutOfBounds {
                value: xmap,
                bound_name: "left X",
                bound: self.upperleft.x,
            });
        }
        if ypixel < 0.0 {
            return Err(SpectralError::OutOfBounds {
                value: ymap,
                bound_name: "top Y",
                bound: self.upperleft.y,
            });
        }
        Ok((xpixel, ypixel))
    }

    /// Bounding box of a raster with the given pixel dimensions.
    ///
    /// Assumes the north-up convention (negative `yres`), so that
    /// `bottom = top + height * yres` lands below `top`. A positive `yres`
    /// still yields a well-formed box, just with `bottom > top`.
    pub fn bounding_box(&self, height: usize, width: usize) -> Bounds {
        Bounds {
            left: self.upperleft.x,
            bottom: self.upperleft.y + height as f64 * self.yres,
            right: self.upperleft.x + width as f64 * self.xres,
            top: self.upperleft.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north_up() -> GeoTransform {
        GeoTransform::from_gdal((100.0, 0.5, 0.0, 40.0, -0.5, 0.0))
    }

    #[test]
    fn test_gdal_round_trip() {
        let t = (100.0, 0.5, 0.1, 40.0, -0.5, 0.2);
        assert_eq!(GeoTransform::from_gdal(t).to_gdal(), t);
    }

    #[test]
    fn test_pixel_to_map() {
        let gt = north_up();
        let (x, y) = gt.pixel_to_map(10.0, 20.0, false);
        assert_eq!(x, 105.0);
        assert_eq!(y, 30.0);
    }

    #[test]
    fn test_pixel_to_map_wraps_longitude() {
        let gt = GeoTransform::from_gdal((-180.0, 0.25, 0.0, 90.0, -0.25, 0.0));
        let (x, _) = gt.pixel_to_map(4.0, 0.0, true);
        assert_eq!(x, 181.0);
        let (x, _) = gt.pixel_to_map(4.0, 0.0, false);
        assert_eq!(x, -179.0);
    }

    #[test]
    fn test_map_to_pixel_inverts_pixel_to_map() {
        let gt = GeoTransform::from_gdal((100.0, 0.5, 0.05, 40.0, -0.5, 0.02));
        let (xm, ym) = gt.pixel_to_map(12.0, 34.0, false);
        let (xp, yp) = gt.map_to_pixel(xm, ym).unwrap();
        assert!((xp - 12.0).abs() < 1e-9);
        assert!((yp - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_to_pixel_degenerate() {
        let gt = GeoTransform::from_gdal((0.0, 1.0, 1.0, 0.0, 1.0, 1.0));
        assert!(matches!(
            gt.map_to_pixel(5.0, 5.0),
            Err(SpectralError::DegenerateTransform)
        ));
    }

    #[test]
    fn test_map_to_pixel_out_of_bounds() {
        let gt = north_up();
        // Left of the origin.
        let err = gt.map_to_pixel(99.0, 30.0).unwrap_err();
        assert!(matches!(err, SpectralError::OutOfBounds { .. }));
        // Above the origin (yres is negative, so larger y is above).
        let err = gt.map_to_pixel(105.0, 41.0).unwrap_err();
        assert!(matches!(err, SpectralError::OutOfBounds { .. }));
    }

    #[test]
    fn test_bounding_box() {
        let gt = north_up();
        let b = gt.bounding_box(100, 200);
        assert_eq!(b.left, 100.0);
        assert_eq!(b.top, 40.0);
        assert_eq!(b.right, 200.0);
        assert_eq!(b.bottom, -10.0);
    }
}
