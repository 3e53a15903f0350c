//! 1-D spectrum records.

use tracing::debug;

use spectral_common::{Point, PointGeolocation, SpectralError, SpectralResult};

use crate::wavelength::WavelengthSeries;

/// Where a spectrum was taken from, if anywhere.
///
/// Callers branch on which spatial information is present, so this is a
/// sum type rather than a record hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumLocation {
    /// A raw spectrum with no spatial information.
    Unlocated,
    /// Pulled from a known pixel of a (possibly non-georeferenced) cube.
    Pixel(Point),
    /// Fully georeferenced: pixel and map coordinate tied to a CRS.
    Geo(PointGeolocation),
}

/// A single spectrum: data values (reflectance, emissivity, ...) over an
/// owned wavelength series, plus an optional location.
///
/// The record moves one way through two states: `Raw` (values cover every
/// band) and, after [`apply_bad_band_mask`], `MaskApplied` (values cover
/// only the good bands). There is no transition back.
///
/// [`apply_bad_band_mask`]: Spectrum::apply_bad_band_mask
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    name: String,
    values: Vec<f64>,
    wavelength: WavelengthSeries,
    mask_applied: bool,
    location: SpectrumLocation,
}

impl Spectrum {
    /// Construct a spectrum over a wavelength series.
    ///
    /// # Errors
    ///
    /// Validation fails when the name is empty or the value count does not
    /// match the series band count.
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        wavelength: WavelengthSeries,
        location: SpectrumLocation,
    ) -> SpectralResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpectralError::validation(
                "name",
                "spectrum name must not be empty",
            ));
        }
        if values.len() != wavelength.band_count() {
            return Err(SpectralError::validation(
                "spectrum",
                format!(
                    "spectrum length ({}) does not match band count ({})",
                    values.len(),
                    wavelength.band_count()
                ),
            ));
        }
        Ok(Self {
            name,
            values,
            wavelength,
            mask_applied: false,
            location,
        })
    }

    /// Restore a spectrum whose mask has already been applied, e.g. when
    /// parsing a record written in that state. The value count must then
    /// match the good-band count.
    pub fn with_mask_applied(
        name: impl Into<String>,
        values: Vec<f64>,
        wavelength: WavelengthSeries,
        location: SpectrumLocation,
    ) -> SpectralResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpectralError::validation(
                "name",
                "spectrum name must not be empty",
            ));
        }
        if values.len() != wavelength.good_band_count() {
            return Err(SpectralError::validation(
                "spectrum",
                format!(
                    "mask-applied spectrum length ({}) does not match good band count ({})",
                    values.len(),
                    wavelength.good_band_count()
                ),
            ));
        }
        Ok(Self {
            name,
            values,
            wavelength,
            mask_applied: true,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn wavelength(&self) -> &WavelengthSeries {
        &self.wavelength
    }

    pub fn location(&self) -> &SpectrumLocation {
        &self.location
    }

    /// Whether the bad-band mask has been applied to the data values.
    pub fn mask_applied(&self) -> bool {
        self.mask_applied
    }

    /// Drop the values of bands marked bad in the wavelength series.
    ///
    /// The series itself keeps its full band list (so indices into the
    /// unfiltered axis stay meaningful); only this record's data values are
    /// filtered. Calling this on a record whose mask is already applied is
    /// a no-op.
    pub fn apply_bad_band_mask(&mut self) {
        if self.mask_applied {
            debug!(name = %self.name, "bad band mask already applied; ignoring");
            return;
        }
        self.values = self
            .values
            .iter()
            .zip(self.wavelength.bbl())
            .filter(|(_, &good)| good)
            .map(|(&v, _)| v)
            .collect();
        self.mask_applied = true;
    }

    /// The pixel point, when the spectrum is pixel- or geo-located.
    pub fn pixel_location(&self) -> Option<(f64, f64)> {
        match &self.location {
            SpectrumLocation::Unlocated => None,
            SpectrumLocation::Pixel(p) => Some(p.as_tuple()),
            SpectrumLocation::Geo(g) => Some(g.pixel_point.as_tuple()),
        }
    }

    /// The map point as (y, x), when the spectrum is geo-located.
    pub fn map_location(&self) -> Option<(f64, f64)> {
        match &self.location {
            SpectrumLocation::Geo(g) => Some((g.map_point.y, g.map_point.x)),
            _ => None,
        }
    }

    /// A human-readable "pixel --> map" location line for geo-located
    /// spectra.
    pub fn location_str(&self) -> Option<String> {
        match &self.location {
            SpectrumLocation::Geo(g) => Some(format!(
                "({}, {})  --> ({:.2}, {:.2})",
                g.pixel_point.y, g.pixel_point.x, g.map_point.y, g.map_point.x
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelength::WavelengthUnit;

    fn series() -> WavelengthSeries {
        WavelengthSeries::new(
            vec![400.0, 500.0, 600.0],
            WavelengthUnit::Nanometer,
            Some(vec![true, false, true]),
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Spectrum::new(
            "basalt",
            vec![1.0, 2.0],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap_err();
        assert!(matches!(err, SpectralError::Validation { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Spectrum::new(
            "",
            vec![1.0, 2.0, 3.0],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap_err();
        assert!(matches!(err, SpectralError::Validation { .. }));
    }

    #[test]
    fn test_apply_bad_band_mask() {
        let mut spec = Spectrum::new(
            "basalt",
            vec![1.0, 2.0, 3.0],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap();
        spec.apply_bad_band_mask();
        assert_eq!(spec.values(), &[1.0, 3.0]);
        assert!(spec.mask_applied());
        assert_eq!(spec.values().len(), spec.wavelength().good_band_count());
        // The series keeps its full band list.
        assert_eq!(spec.wavelength().band_count(), 3);
    }

    #[test]
    fn test_apply_bad_band_mask_twice_is_noop() {
        let mut spec = Spectrum::new(
            "basalt",
            vec![1.0, 2.0, 3.0],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap();
        spec.apply_bad_band_mask();
        let after_first = spec.clone();
        spec.apply_bad_band_mask();
        assert_eq!(spec, after_first);
    }

    #[test]
    fn test_with_mask_applied_checks_good_band_count() {
        let spec =
            Spectrum::with_mask_applied("basalt", vec![1.0, 3.0], series(), SpectrumLocation::Unlocated)
                .unwrap();
        assert!(spec.mask_applied());

        let err = Spectrum::with_mask_applied(
            "basalt",
            vec![1.0, 2.0, 3.0],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap_err();
        assert!(matches!(err, SpectralError::Validation { .. }));
    }

    #[test]
    fn test_pixel_location_by_variant() {
        let raw = Spectrum::new(
            "a",
            vec![0.0; 3],
            series(),
            SpectrumLocation::Unlocated,
        )
        .unwrap();
        assert_eq!(raw.pixel_location(), None);

        let pnt = Spectrum::new(
            "b",
            vec![0.0; 3],
            series(),
            SpectrumLocation::Pixel(Point::new(10.0, 20.0)),
        )
        .unwrap();
        assert_eq!(pnt.pixel_location(), Some((10.0, 20.0)));
    }
}
