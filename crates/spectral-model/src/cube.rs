//! 3-D spectral cube records.
//!
//! A cube record holds the shape and wavelength axis of a spectral cube;
//! the pixel payload stays in an external raster file referenced by path
//! and is only loaded on demand through the [`RasterSource`] collaborator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use spectral_common::{BaseGeolocation, SpectralError, SpectralResult};

use crate::raster::{CubeData, PixelWindow, RasterSource};
use crate::wavelength::WavelengthSeries;

/// A spectral cube: `nrows` x `ncols` pixels, each carrying one spectrum
/// over the wavelength series. Optionally georeferenced by a base
/// geolocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpectralCubeRaw")]
pub struct SpectralCube {
    name: String,
    wavelength: WavelengthSeries,
    nrows: usize,
    ncols: usize,
    // Derived: always the wavelength band count.
    nbands: usize,
    raster_fp: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    geodata: Option<BaseGeolocation>,
}

impl SpectralCube {
    /// Construct a cube record.
    ///
    /// # Errors
    ///
    /// Validation fails when the name is empty or either pixel dimension is
    /// zero.
    pub fn new(
        name: impl Into<String>,
        wavelength: WavelengthSeries,
        nrows: usize,
        ncols: usize,
        raster_fp: PathBuf,
        geodata: Option<BaseGeolocation>,
    ) -> SpectralResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpectralError::validation(
                "name",
                "cube name must not be empty",
            ));
        }
        if nrows == 0 || ncols == 0 {
            return Err(SpectralError::validation(
                "nrows",
                format!("cube dimensions must be nonzero, got {nrows}x{ncols}"),
            ));
        }
        let nbands = wavelength.band_count();
        Ok(Self {
            name,
            wavelength,
            nrows,
            ncols,
            nbands,
            raster_fp,
            geodata,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wavelength(&self) -> &WavelengthSeries {
        &self.wavelength
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Band count; always equals the wavelength series band count.
    pub fn nbands(&self) -> usize {
        self.nbands
    }

    /// Path of the externally-stored raster payload.
    pub fn raster_fp(&self) -> &Path {
        &self.raster_fp
    }

    pub fn geodata(&self) -> Option<&BaseGeolocation> {
        self.geodata.as_ref()
    }

    /// Load the raster payload (or a pixel window of it) through a raster
    /// backend. Blocking, whole-window read.
    ///
    /// # Errors
    ///
    /// Backend errors propagate unchanged; a payload whose band count
    /// disagrees with the wavelength series fails with
    /// [`SpectralError::DimensionMismatch`].
    pub fn load(
        &self,
        source: &dyn RasterSource,
        window: Option<PixelWindow>,
    ) -> SpectralResult<CubeData> {
        debug!(name = %self.name, path = %self.raster_fp.display(), "loading cube raster");
        let mut handle = source.open(&self.raster_fp)?;
        if handle.count() != self.nbands {
            return Err(SpectralError::DimensionMismatch(format!(
                "raster has {} bands, wavelength series has {}",
                handle.count(),
                self.nbands
            )));
        }
        handle.read(window)
    }
}

#[derive(Deserialize)]
struct SpectralCubeRaw {
    name: String,
    wavelength: WavelengthSeries,
    nrows: usize,
    ncols: usize,
    #[serde(default)]
    #[allow(dead_code)]
    nbands: Option<usize>,
    raster_fp: PathBuf,
    #[serde(default)]
    geodata: Option<BaseGeolocation>,
}

impl TryFrom<SpectralCubeRaw> for SpectralCube {
    type Error = SpectralError;

    fn try_from(raw: SpectralCubeRaw) -> Result<Self, Self::Error> {
        SpectralCube::new(
            raw.name,
            raw.wavelength,
            raw.nrows,
            raw.ncols,
            raw.raster_fp,
            raw.geodata,
        )
    }
}
