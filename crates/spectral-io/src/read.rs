//! Readers for the spectral file formats.
//!
//! Every reader checks the file extension strictly before parsing, then
//! reads the whole file as one JSON document and applies the model
//! invariants during the parse. IO errors propagate unchanged; JSON that
//! fails structural or invariant validation surfaces as a validation error.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use spectral_common::{BaseGeolocation, SpectralResult};
use spectral_model::{Spectrum, SpectrumGroup, SpectralCube, WavelengthSeries};

use crate::format::{check_extension, FileKind};
use crate::wire::{GeoSpectrumFile, PointSpectrumFile, RawSpectrumFile, SpectrumGroupFile};

/// Which 1-D spectrum file kind to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumKind {
    /// `.rawspec`, no location
    Raw,
    /// `.pntspec`, pixel point
    Point,
    /// `.geospec`, full geolocation
    Geo,
}

/// Which cube file kind to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeKind {
    /// `.spcub`, not georeferenced
    Plain,
    /// `.geospcub`, with a base geolocation
    Geo,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SpectralResult<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Read a `.wvl` file into a wavelength series.
pub fn read_wavelength(path: &Path) -> SpectralResult<WavelengthSeries> {
    check_extension(path, FileKind::Wavelength)?;
    debug!(path = %path.display(), "reading wavelength file");
    read_json(path)
}

/// Read a `.geodata` file into a base geolocation.
pub fn read_geodata(path: &Path) -> SpectralResult<BaseGeolocation> {
    check_extension(path, FileKind::Geodata)?;
    debug!(path = %path.display(), "reading geodata file");
    read_json(path)
}

/// Read a 1-D spectrum file of the given kind.
pub fn read_spectrum(path: &Path, kind: SpectrumKind) -> SpectralResult<Spectrum> {
    debug!(path = %path.display(), kind = ?kind, "reading spectrum file");
    match kind {
        SpectrumKind::Raw => {
            check_extension(path, FileKind::RawSpectrum)?;
            read_json::<RawSpectrumFile>(path)?.into_record()
        }
        SpectrumKind::Point => {
            check_extension(path, FileKind::PointSpectrum)?;
            read_json::<PointSpectrumFile>(path)?.into_record()
        }
        SpectrumKind::Geo => {
            check_extension(path, FileKind::GeoSpectrum)?;
            read_json::<GeoSpectrumFile>(path)?.into_record()
        }
    }
}

/// Read a `.specgrp` file into a spectrum group.
pub fn read_group(path: &Path) -> SpectralResult<SpectrumGroup> {
    check_extension(path, FileKind::SpectrumGroup)?;
    debug!(path = %path.display(), "reading spectrum group file");
    read_json::<SpectrumGroupFile>(path)?.into_record()
}

/// Read a cube file of the given kind.
///
/// A `.geospcub` record must carry its geolocation; reading one without it
/// fails validation.
pub fn read_cube(path: &Path, kind: CubeKind) -> SpectralResult<SpectralCube> {
    let expected = match kind {
        CubeKind::Plain => FileKind::Cube,
        CubeKind::Geo => FileKind::GeoCube,
    };
    check_extension(path, expected)?;
    debug!(path = %path.display(), kind = ?kind, "reading cube file");
    let cube: SpectralCube = read_json(path)?;
    if kind == CubeKind::Geo && cube.geodata().is_none() {
        return Err(spectral_common::SpectralError::validation(
            "geodata",
            "a .geospcub record must carry its geolocation",
        ));
    }
    Ok(cube)
}
