//! Groups of pixel-located spectra sharing one wavelength series.

use tracing::debug;

use spectral_common::{BaseGeolocation, SpectralError, SpectralResult};

use crate::spectrum::{Spectrum, SpectrumLocation};
use crate::wavelength::WavelengthSeries;

/// Concavity parameter passed to the hull collaborator when a group
/// boundary is computed.
pub const HULL_CONCAVITY: f64 = 0.9;

/// Collaborator computing a boundary polygon over a set of pixel points.
///
/// The concrete algorithm (alpha shape, convex hull, ...) is external to
/// this crate; groups only record the vertices it returns.
pub trait HullBuilder {
    /// Boundary polygon enclosing `points`, as an ordered vertex list.
    fn hull(&self, points: &[(f64, f64)], concavity: f64) -> Vec<(f64, f64)>;
}

/// Column-wise summary statistics over a group's members.
///
/// A point-in-time snapshot: computed from the member values at call time
/// and not updated if members mutate afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub mean: Vec<f64>,
    pub median: Vec<f64>,
    /// Sample standard deviation (ddof = 1).
    pub stdev: Vec<f64>,
    /// One-sigma envelope: (mean - stdev, mean + stdev).
    pub envelope: (Vec<f64>, Vec<f64>),
}

impl GroupStats {
    fn new(mean: Vec<f64>, median: Vec<f64>, stdev: Vec<f64>) -> Self {
        let lower = mean.iter().zip(&stdev).map(|(m, s)| m - s).collect();
        let upper = mean.iter().zip(&stdev).map(|(m, s)| m + s).collect();
        Self {
            mean,
            median,
            stdev,
            envelope: (lower, upper),
        }
    }
}

/// A collection of pixel-located spectra pulled from one cube.
///
/// All members share the wavelength series cardinality of the group. The
/// boundary polygon over the member pixel points is computed once, at
/// construction, through the [`HullBuilder`] collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumGroup {
    name: String,
    spectra: Vec<Spectrum>,
    points: Vec<(i64, i64)>,
    wavelength: WavelengthSeries,
    polygon_vertices: Vec<(f64, f64)>,
    nspectra: usize,
    mask_applied: bool,
}

impl SpectrumGroup {
    /// Build a group from pixel-located member spectra, computing the
    /// boundary polygon through `hull`.
    ///
    /// # Errors
    ///
    /// Validation fails when the group is empty, the point list length
    /// differs from the member count, a member is not pixel-located, or a
    /// member's band count differs from the group series.
    pub fn new(
        name: impl Into<String>,
        spectra: Vec<Spectrum>,
        points: Vec<(i64, i64)>,
        wavelength: WavelengthSeries,
        hull: &dyn HullBuilder,
    ) -> SpectralResult<Self> {
        let float_pts: Vec<(f64, f64)> =
            points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        let polygon_vertices = hull.hull(&float_pts, HULL_CONCAVITY);
        debug!(
            nvertices = polygon_vertices.len(),
            npoints = points.len(),
            "computed group boundary polygon"
        );
        Self::from_parts(name, spectra, points, wavelength, polygon_vertices)
    }

    /// Reassemble a group whose polygon was already computed, e.g. when
    /// parsing a record. Membership is revalidated; the stored vertices are
    /// trusted as-is.
    pub fn from_parts(
        name: impl Into<String>,
        spectra: Vec<Spectrum>,
        points: Vec<(i64, i64)>,
        wavelength: WavelengthSeries,
        polygon_vertices: Vec<(f64, f64)>,
    ) -> SpectralResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpectralError::validation(
                "name",
                "group name must not be empty",
            ));
        }
        if spectra.is_empty() {
            return Err(SpectralError::validation(
                "spectra",
                "a spectrum group must have at least one member",
            ));
        }
        if points.len() != spectra.len() {
            return Err(SpectralError::validation(
                "spectra_pts",
                format!(
                    "point count ({}) does not match member count ({})",
                    points.len(),
                    spectra.len()
                ),
            ));
        }
        for spec in &spectra {
            if !matches!(spec.location(), SpectrumLocation::Pixel(_)) {
                return Err(SpectralError::validation(
                    "spectra",
                    format!("group member '{}' is not pixel-located", spec.name()),
                ));
            }
            if spec.wavelength().band_count() != wavelength.band_count() {
                return Err(SpectralError::validation(
                    "spectra",
                    format!(
                        "member '{}' has {} bands, group wavelength has {}",
                        spec.name(),
                        spec.wavelength().band_count(),
                        wavelength.band_count()
                    ),
                ));
            }
        }
        let nspectra = spectra.len();
        let mask_applied = spectra.iter().all(Spectrum::mask_applied);
        Ok(Self {
            name,
            spectra,
            points,
            wavelength,
            polygon_vertices,
            nspectra,
            mask_applied,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spectra(&self) -> &[Spectrum] {
        &self.spectra
    }

    pub fn points(&self) -> &[(i64, i64)] {
        &self.points
    }

    pub fn wavelength(&self) -> &WavelengthSeries {
        &self.wavelength
    }

    /// Vertices of the boundary polygon, in pixel space.
    pub fn polygon_vertices(&self) -> &[(f64, f64)] {
        &self.polygon_vertices
    }

    /// Number of member spectra.
    pub fn member_count(&self) -> usize {
        self.nspectra
    }

    pub fn mask_applied(&self) -> bool {
        self.mask_applied
    }

    /// Apply the bad-band mask to every member and mark the group applied.
    /// Members already in the applied state are left alone.
    pub fn apply_bad_band_mask(&mut self) {
        for spec in &mut self.spectra {
            spec.apply_bad_band_mask();
        }
        self.mask_applied = true;
    }

    /// Stack member values into a row-major 2-D array.
    ///
    /// Returns `(data, rows, cols)` where `rows` is the member count and
    /// `cols` the (good-)band count.
    ///
    /// # Errors
    ///
    /// [`SpectralError::DimensionMismatch`] when members disagree on
    /// whether the mask has been applied, or a member's length does not
    /// match the expected column count.
    pub fn to_array(&self) -> SpectralResult<(Vec<f64>, usize, usize)> {
        if self
            .spectra
            .iter()
            .any(|s| s.mask_applied() != self.mask_applied)
        {
            return Err(SpectralError::DimensionMismatch(
                "group members disagree on bad-band mask application".to_string(),
            ));
        }
        let ncols = if self.mask_applied {
            self.wavelength.good_band_count()
        } else {
            self.wavelength.band_count()
        };
        let mut data = Vec::with_capacity(self.nspectra * ncols);
        for spec in &self.spectra {
            if spec.values().len() != ncols {
                return Err(SpectralError::DimensionMismatch(format!(
                    "member '{}' has {} values, expected {}",
                    spec.name(),
                    spec.values().len(),
                    ncols
                )));
            }
            data.extend_from_slice(spec.values());
        }
        Ok((data, self.nspectra, ncols))
    }

    /// Column-wise mean, median, and sample standard deviation across
    /// members, with the one-sigma envelope.
    pub fn stats(&self) -> SpectralResult<GroupStats> {
        let (data, rows, cols) = self.to_array()?;
        let mut mean = vec![0.0; cols];
        let mut median = vec![0.0; cols];
        let mut stdev = vec![0.0; cols];

        let mut column = vec![0.0; rows];
        for c in 0..cols {
            for r in 0..rows {
                column[r] = data[r * cols + c];
            }
            let m = column.iter().sum::<f64>() / rows as f64;
            mean[c] = m;

            column.sort_by(|a, b| a.total_cmp(b));
            median[c] = if rows % 2 == 1 {
                column[rows / 2]
            } else {
                (column[rows / 2 - 1] + column[rows / 2]) / 2.0
            };

            // Sample standard deviation; zero for a single-member group.
            stdev[c] = if rows > 1 {
                let ss = column.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
                (ss / (rows - 1) as f64).sqrt()
            } else {
                0.0
            };
        }
        Ok(GroupStats::new(mean, median, stdev))
    }

    /// Row-major boolean mask of the member pixel locations over a raster
    /// of the given dimensions.
    ///
    /// # Errors
    ///
    /// [`SpectralError::DimensionMismatch`] when a member point falls
    /// outside the raster.
    pub fn selection_mask(&self, height: usize, width: usize) -> SpectralResult<Vec<bool>> {
        let mut mask = vec![false; height * width];
        for &(x, y) in &self.points {
            if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
                return Err(SpectralError::DimensionMismatch(format!(
                    "member pixel ({x}, {y}) falls outside a {width}x{height} raster"
                )));
            }
            mask[y as usize * width + x as usize] = true;
        }
        Ok(mask)
    }

    /// Project the boundary polygon from pixel space into the map space of
    /// a geolocation.
    pub fn map_polygon(&self, geodata: &BaseGeolocation) -> Vec<(f64, f64)> {
        self.polygon_vertices
            .iter()
            .map(|&(x, y)| geodata.geotransform.pixel_to_map(x, y, false))
            .collect()
    }
}
