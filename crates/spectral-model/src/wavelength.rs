//! Wavelength series: the spectral axis of a spectrum or cube.
//!
//! A series is an ordered sequence of wavelength values with a unit and a
//! bad-band list (ENVI "bbl" convention: `true` marks a usable band).
//! Resolution and band counts are derived state, recomputed on every
//! construction, parse, and unit conversion. They cannot be set
//! independently.

use serde::{Deserialize, Serialize};
use tracing::debug;

use spectral_common::{SpectralError, SpectralResult};

/// Unit of wavelength values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavelengthUnit {
    /// Nanometers
    #[serde(rename = "nm")]
    Nanometer,
    /// Microns
    #[serde(rename = "um")]
    Micron,
    /// Meters
    #[serde(rename = "m")]
    Meter,
    /// Wavenumber (reciprocal meters: v = 1e9 / nm)
    #[serde(rename = "v")]
    Wavenumber,
}

impl WavelengthUnit {
    /// Convert a single value from this unit to `target`.
    ///
    /// All pairs are fixed linear scalings except wavenumber, which is
    /// reciprocal: `v = 1e9 / nm = 1e6 / um = 1 / m`.
    pub fn convert_value(self, target: WavelengthUnit, value: f64) -> f64 {
        use WavelengthUnit::*;
        match (self, target) {
            (a, b) if a == b => value,
            (Micron, Nanometer) => value * 1e3,
            (Meter, Nanometer) => value * 1e9,
            (Wavenumber, Nanometer) => 1e9 / value,
            (Nanometer, Micron) => value * 1e-3,
            (Meter, Micron) => value * 1e6,
            (Wavenumber, Micron) => 1e6 / value,
            (Nanometer, Meter) => value * 1e-9,
            (Micron, Meter) => value * 1e-6,
            (Wavenumber, Meter) => 1.0 / value,
            (Nanometer, Wavenumber) => 1e9 / value,
            (Micron, Wavenumber) => 1e6 / value,
            (Meter, Wavenumber) => 1.0 / value,
            _ => unreachable!(),
        }
    }
}

/// The wavelength values of a spectrum, with unit and bad-band list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WavelengthSeriesRaw")]
pub struct WavelengthSeries {
    values: Vec<f64>,
    unit: WavelengthUnit,
    /// Bad band list: `false` marks an unusable band.
    bbl: Vec<bool>,
    // Derived state below; rewritten by recompute().
    resolution: f64,
    nbands: usize,
    ngoodbands: usize,
}

impl WavelengthSeries {
    /// Construct a series from raw values, a unit, and an optional bad-band
    /// list. A missing list defaults to all-good.
    ///
    /// # Errors
    ///
    /// Validation fails when `values` is empty or the bad-band list length
    /// differs from the value count.
    pub fn new(
        values: Vec<f64>,
        unit: WavelengthUnit,
        bbl: Option<Vec<bool>>,
    ) -> SpectralResult<Self> {
        if values.is_empty() {
            return Err(SpectralError::validation(
                "values",
                "wavelength values must not be empty",
            ));
        }
        let bbl = bbl.unwrap_or_else(|| vec![true; values.len()]);
        if bbl.len() != values.len() {
            return Err(SpectralError::validation(
                "bbl",
                format!(
                    "bad band list length ({}) does not match value count ({})",
                    bbl.len(),
                    values.len()
                ),
            ));
        }
        let mut series = Self {
            values,
            unit,
            bbl,
            resolution: 0.0,
            nbands: 0,
            ngoodbands: 0,
        };
        series.recompute();
        Ok(series)
    }

    /// Rewrite all derived state from the current values and bad-band list.
    fn recompute(&mut self) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        // Span over count, not per-gap average spacing.
        self.resolution = (max - min) / self.values.len() as f64;
        self.nbands = self.values.len();
        self.ngoodbands = self.bbl.iter().filter(|&&good| good).count();
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> WavelengthUnit {
        self.unit
    }

    /// Bad band list: `true` marks a usable band.
    pub fn bbl(&self) -> &[bool] {
        &self.bbl
    }

    /// Average spectral resolution, `(max - min) / band count`.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Total number of spectral bands.
    pub fn band_count(&self) -> usize {
        self.nbands
    }

    /// Number of bands marked usable in the bad-band list.
    pub fn good_band_count(&self) -> usize {
        self.ngoodbands
    }

    /// Wavelength values, optionally filtered down to the good bands.
    /// Read-only: the series itself is never shortened.
    pub fn as_array(&self, apply_bbl: bool) -> Vec<f64> {
        if apply_bbl {
            self.values
                .iter()
                .zip(&self.bbl)
                .filter(|(_, &good)| good)
                .map(|(&v, _)| v)
                .collect()
        } else {
            self.values.clone()
        }
    }

    /// The good-band values. Shorthand for `as_array(true)`.
    pub fn masked_values(&self) -> Vec<f64> {
        self.as_array(true)
    }

    /// Convert every value to `unit` in place and update the unit tag.
    ///
    /// The conversion is atomic per call: either all values are rewritten
    /// or none are. Converting a series to its own unit is a no-op.
    /// Derived state is recomputed afterward.
    pub fn convert_to(&mut self, unit: WavelengthUnit) {
        if unit == self.unit {
            return;
        }
        let from = self.unit;
        for v in &mut self.values {
            *v = from.convert_value(unit, *v);
        }
        self.unit = unit;
        self.recompute();
        debug!(from = ?from, to = ?unit, nbands = self.nbands, "converted wavelength series");
    }

    /// Find the band closest to a guess value given in `unit`.
    ///
    /// The full (unfiltered) series is scanned after converting a working
    /// copy to `unit`; ties break toward the first occurrence. The returned
    /// value is read from this series unchanged, so it is in the series'
    /// own unit — not in `unit`, unless the two coincide.
    pub fn nearest(&self, guess: f64, unit: WavelengthUnit) -> (usize, f64) {
        let mut scratch = self.clone();
        scratch.convert_to(unit);

        let mut best_idx = 0;
        let mut best_diff = f64::INFINITY;
        for (i, &v) in scratch.values.iter().enumerate() {
            let diff = (v - guess).abs();
            if diff < best_diff {
                best_diff = diff;
                best_idx = i;
            }
        }
        (best_idx, self.values[best_idx])
    }
}

#[derive(Deserialize)]
struct WavelengthSeriesRaw {
    values: Vec<f64>,
    unit: WavelengthUnit,
    #[serde(default)]
    bbl: Option<Vec<bool>>,
    // Derived fields may be present in serialized records; ignored and
    // recomputed so a tampered file cannot desynchronize them.
    #[serde(default)]
    #[allow(dead_code)]
    resolution: Option<f64>,
    #[serde(default)]
    #[allow(dead_code)]
    nbands: Option<usize>,
    #[serde(default)]
    #[allow(dead_code)]
    ngoodbands: Option<usize>,
}

impl TryFrom<WavelengthSeriesRaw> for WavelengthSeries {
    type Error = SpectralError;

    fn try_from(raw: WavelengthSeriesRaw) -> Result<Self, Self::Error> {
        WavelengthSeries::new(raw.values, raw.unit, raw.bbl)
    }
}
