//! Spectral data model: wavelength series, 1-D spectrum records, spectrum
//! groups, and 3-D cube records.
//!
//! Records validate on construction and recompute all derived state at the
//! single mutation entry points; there are no raw field setters that could
//! desynchronize derived values. File formats for these types live in
//! `spectral-io`.

pub mod cube;
pub mod group;
pub mod raster;
pub mod spectrum;
pub mod wavelength;

pub use cube::SpectralCube;
pub use group::{GroupStats, HullBuilder, SpectrumGroup, HULL_CONCAVITY};
pub use raster::{CubeData, PixelWindow, RasterHandle, RasterSource, NODATA};
pub use spectrum::{Spectrum, SpectrumLocation};
pub use wavelength::{WavelengthSeries, WavelengthUnit};
