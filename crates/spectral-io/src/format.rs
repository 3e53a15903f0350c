//! File kinds and extension dispatch.
//!
//! Every record kind has its own file extension; readers check the
//! extension strictly before touching the file contents.

use std::path::Path;

use spectral_common::{SpectralError, SpectralResult};

/// The record kinds this crate can read and write, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.wvl` — wavelength series
    Wavelength,
    /// `.rawspec` — spectrum with no location
    RawSpectrum,
    /// `.pntspec` — spectrum with a pixel point
    PointSpectrum,
    /// `.geospec` — spectrum with a full point geolocation
    GeoSpectrum,
    /// `.specgrp` — spectrum group
    SpectrumGroup,
    /// `.spcub` — spectral cube, not georeferenced
    Cube,
    /// `.geospcub` — spectral cube with a base geolocation
    GeoCube,
    /// `.geodata` — base geolocation on its own
    Geodata,
}

impl FileKind {
    /// File extension without the leading dot, as `Path::extension` sees it.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Wavelength => "wvl",
            FileKind::RawSpectrum => "rawspec",
            FileKind::PointSpectrum => "pntspec",
            FileKind::GeoSpectrum => "geospec",
            FileKind::SpectrumGroup => "specgrp",
            FileKind::Cube => "spcub",
            FileKind::GeoCube => "geospcub",
            FileKind::Geodata => "geodata",
        }
    }

    /// File suffix with the leading dot.
    pub fn suffix(self) -> String {
        format!(".{}", self.extension())
    }

    /// Determine the record kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?;
        let kind = match ext {
            "wvl" => FileKind::Wavelength,
            "rawspec" => FileKind::RawSpectrum,
            "pntspec" => FileKind::PointSpectrum,
            "geospec" => FileKind::GeoSpectrum,
            "specgrp" => FileKind::SpectrumGroup,
            "spcub" => FileKind::Cube,
            "geospcub" => FileKind::GeoCube,
            "geodata" => FileKind::Geodata,
            _ => return None,
        };
        Some(kind)
    }
}

/// Fail with a file-type error unless `path` carries the expected suffix.
pub(crate) fn check_extension(path: &Path, expected: FileKind) -> SpectralResult<()> {
    let found = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| "(no extension)".to_string());
    if found != expected.suffix() {
        return Err(SpectralError::FileType {
            expected: expected.suffix(),
            found,
        });
    }
    Ok(())
}
