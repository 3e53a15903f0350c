//! On-disk shapes for the location-variant spectrum files.
//!
//! The model keeps the spectrum location as a sum type; on disk each
//! variant is its own file kind with its own fields. These mirror structs
//! hold the wire shapes apart from the model and revalidate invariants in
//! both directions.

use serde::{Deserialize, Serialize};

use spectral_common::{Point, PointGeolocation, SpectralError, SpectralResult};
use spectral_model::{Spectrum, SpectrumGroup, SpectrumLocation, WavelengthSeries};

fn build_spectrum(
    name: String,
    spectrum: Vec<f64>,
    wavelength: WavelengthSeries,
    bbl_applied: bool,
    location: SpectrumLocation,
) -> SpectralResult<Spectrum> {
    if bbl_applied {
        Spectrum::with_mask_applied(name, spectrum, wavelength, location)
    } else {
        Spectrum::new(name, spectrum, wavelength, location)
    }
}

/// `.rawspec` payload: a spectrum with no location.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawSpectrumFile {
    pub name: String,
    pub spectrum: Vec<f64>,
    pub wavelength: WavelengthSeries,
    #[serde(default)]
    pub bbl_applied: bool,
}

impl RawSpectrumFile {
    pub fn from_record(spec: &Spectrum) -> Self {
        Self {
            name: spec.name().to_string(),
            spectrum: spec.values().to_vec(),
            wavelength: spec.wavelength().clone(),
            bbl_applied: spec.mask_applied(),
        }
    }

    pub fn into_record(self) -> SpectralResult<Spectrum> {
        build_spectrum(
            self.name,
            self.spectrum,
            self.wavelength,
            self.bbl_applied,
            SpectrumLocation::Unlocated,
        )
    }
}

/// `.pntspec` payload: a spectrum with a pixel point.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PointSpectrumFile {
    pub name: String,
    pub spectrum: Vec<f64>,
    pub wavelength: WavelengthSeries,
    #[serde(default)]
    pub bbl_applied: bool,
    pub pixel: Point,
}

impl PointSpectrumFile {
    pub fn from_record(spec: &Spectrum) -> SpectralResult<Self> {
        let SpectrumLocation::Pixel(pixel) = spec.location() else {
            return Err(SpectralError::validation(
                "pixel",
                format!("spectrum '{}' is not pixel-located", spec.name()),
            ));
        };
        Ok(Self {
            name: spec.name().to_string(),
            spectrum: spec.values().to_vec(),
            wavelength: spec.wavelength().clone(),
            bbl_applied: spec.mask_applied(),
            pixel: *pixel,
        })
    }

    pub fn into_record(self) -> SpectralResult<Spectrum> {
        build_spectrum(
            self.name,
            self.spectrum,
            self.wavelength,
            self.bbl_applied,
            SpectrumLocation::Pixel(self.pixel),
        )
    }
}

/// `.geospec` payload: a spectrum with a full point geolocation.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeoSpectrumFile {
    pub name: String,
    pub spectrum: Vec<f64>,
    pub wavelength: WavelengthSeries,
    #[serde(default)]
    pub bbl_applied: bool,
    pub point: PointGeolocation,
}

impl GeoSpectrumFile {
    pub fn from_record(spec: &Spectrum) -> SpectralResult<Self> {
        let SpectrumLocation::Geo(point) = spec.location() else {
            return Err(SpectralError::validation(
                "point",
                format!("spectrum '{}' is not geo-located", spec.name()),
            ));
        };
        Ok(Self {
            name: spec.name().to_string(),
            spectrum: spec.values().to_vec(),
            wavelength: spec.wavelength().clone(),
            bbl_applied: spec.mask_applied(),
            point: point.clone(),
        })
    }

    pub fn into_record(self) -> SpectralResult<Spectrum> {
        build_spectrum(
            self.name,
            self.spectrum,
            self.wavelength,
            self.bbl_applied,
            SpectrumLocation::Geo(self.point),
        )
    }
}

/// `.specgrp` payload. Members are stored in the `.pntspec` shape; derived
/// fields are present for readability but recomputed on parse (except the
/// hull vertices, which are trusted — recomputing them would require the
/// external hull collaborator at read time).
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SpectrumGroupFile {
    pub name: String,
    pub spectra: Vec<PointSpectrumFile>,
    pub spectra_pts: Vec<(i64, i64)>,
    pub wavelength: WavelengthSeries,
    #[serde(default)]
    pub polygon_vertices: Vec<(f64, f64)>,
    #[serde(default)]
    pub nspectra: usize,
    #[serde(default)]
    pub bbl_applied: bool,
}

impl SpectrumGroupFile {
    pub fn from_record(group: &SpectrumGroup) -> SpectralResult<Self> {
        let spectra = group
            .spectra()
            .iter()
            .map(PointSpectrumFile::from_record)
            .collect::<SpectralResult<Vec<_>>>()?;
        Ok(Self {
            name: group.name().to_string(),
            spectra,
            spectra_pts: group.points().to_vec(),
            wavelength: group.wavelength().clone(),
            polygon_vertices: group.polygon_vertices().to_vec(),
            nspectra: group.member_count(),
            bbl_applied: group.mask_applied(),
        })
    }

    pub fn into_record(self) -> SpectralResult<SpectrumGroup> {
        let spectra = self
            .spectra
            .into_iter()
            .map(PointSpectrumFile::into_record)
            .collect::<SpectralResult<Vec<_>>>()?;
        SpectrumGroup::from_parts(
            self.name,
            spectra,
            self.spectra_pts,
            self.wavelength,
            self.polygon_vertices,
        )
    }
}
