//! Raster-I/O collaborator interface.
//!
//! Cube pixel payloads live in external raster files and are read through
//! these traits; this workspace ships no concrete raster driver. Callers
//! plug in whatever backend they have (GDAL bindings, a test grid, ...).

use std::path::Path;

use spectral_common::SpectralResult;

/// Nodata sentinel conventionally used in cube payloads. Values are
/// surfaced unmodified; callers filter against this when they care.
pub const NODATA: f64 = -999.0;

/// A pixel window into a raster: `(col_offset, row_offset, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_offset: usize,
    pub row_offset: usize,
    pub width: usize,
    pub height: usize,
}

/// A dense (row, col, band) buffer of raster data.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeData {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    bands: usize,
}

impl CubeData {
    /// Wrap a row-major, band-interleaved-by-pixel buffer.
    ///
    /// # Panics
    ///
    /// Panics when the buffer length does not equal `rows * cols * bands`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize, bands: usize) -> Self {
        assert_eq!(data.len(), rows * cols * bands);
        Self {
            data,
            rows,
            cols,
            bands,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.bands)
    }

    /// Value at (row, col, band).
    pub fn get(&self, row: usize, col: usize, band: usize) -> f64 {
        self.data[(row * self.cols + col) * self.bands + band]
    }

    /// The spectrum at one pixel, across all bands.
    pub fn pixel_spectrum(&self, row: usize, col: usize) -> &[f64] {
        let start = (row * self.cols + col) * self.bands;
        &self.data[start..start + self.bands]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// An open raster file.
pub trait RasterHandle {
    /// Read the full raster, or a window of it, as a (row, col, band) cube.
    fn read(&mut self, window: Option<PixelWindow>) -> SpectralResult<CubeData>;

    /// Raster height in pixels.
    fn height(&self) -> usize;

    /// Raster width in pixels.
    fn width(&self) -> usize;

    /// Number of bands.
    fn count(&self) -> usize;
}

/// A raster-I/O backend capable of opening raster files by path.
pub trait RasterSource {
    fn open(&self, path: &Path) -> SpectralResult<Box<dyn RasterHandle>>;
}
