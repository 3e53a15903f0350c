//! Stub implementations of the external collaborator traits.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use spectral_common::{SpectralError, SpectralResult};
use spectral_model::{CubeData, HullBuilder, PixelWindow, RasterHandle, RasterSource};

/// Hull stub returning the axis-aligned bounding rectangle of the points.
/// Stands in for the external concave-hull algorithm.
pub struct RectHull;

impl HullBuilder for RectHull {
    fn hull(&self, points: &[(f64, f64)], _concavity: f64) -> Vec<(f64, f64)> {
        let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
        ]
    }
}

/// In-memory raster backend mapping paths to synthetic cubes.
#[derive(Default)]
pub struct MemoryRasters {
    rasters: HashMap<PathBuf, GridRaster>,
}

impl MemoryRasters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raster whose value at (row, col, band) is
    /// `row * 100 + col * 10 + band`, making samples easy to assert on.
    pub fn insert_gradient(&mut self, path: impl Into<PathBuf>, rows: usize, cols: usize, bands: usize) {
        self.rasters.insert(
            path.into(),
            GridRaster {
                rows,
                cols,
                bands,
            },
        );
    }
}

impl RasterSource for MemoryRasters {
    fn open(&self, path: &Path) -> SpectralResult<Box<dyn RasterHandle>> {
        let raster = self.rasters.get(path).ok_or_else(|| {
            SpectralError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))
        })?;
        Ok(Box::new(raster.clone()))
    }
}

/// A synthetic raster with a deterministic gradient payload.
#[derive(Clone)]
pub struct GridRaster {
    rows: usize,
    cols: usize,
    bands: usize,
}

impl RasterHandle for GridRaster {
    fn read(&mut self, window: Option<PixelWindow>) -> SpectralResult<CubeData> {
        let (row0, col0, height, width) = match window {
            Some(w) => (w.row_offset, w.col_offset, w.height, w.width),
            None => (0, 0, self.rows, self.cols),
        };
        if row0 + height > self.rows || col0 + width > self.cols {
            return Err(SpectralError::DimensionMismatch(format!(
                "window exceeds raster extent ({}x{})",
                self.rows, self.cols
            )));
        }
        let mut data = Vec::with_capacity(height * width * self.bands);
        for r in row0..row0 + height {
            for c in col0..col0 + width {
                for b in 0..self.bands {
                    data.push((r * 100 + c * 10 + b) as f64);
                }
            }
        }
        Ok(CubeData::new(data, height, width, self.bands))
    }

    fn height(&self) -> usize {
        self.rows
    }

    fn width(&self) -> usize {
        self.cols
    }

    fn count(&self) -> usize {
        self.bands
    }
}
