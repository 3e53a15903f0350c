//! Writers for the spectral file formats.
//!
//! Writers pick the output suffix from the shape of the record being
//! written (see [`write_spectrum`] for the branching rules), force that
//! suffix onto the destination, and return the path actually written.
//! Destinations may be a directory — the file is then named after the
//! record — or a full path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use spectral_common::{
    BaseGeolocation, GeoTransform, LocationKind, Point, PointGeolocation, SpectralError,
    SpectralResult,
};
use spectral_model::{
    HullBuilder, RasterSource, Spectrum, SpectrumGroup, SpectralCube, SpectrumLocation,
    WavelengthSeries, WavelengthUnit,
};

use crate::format::FileKind;
use crate::read::{read_geodata, read_wavelength};
use crate::wire::{GeoSpectrumFile, PointSpectrumFile, RawSpectrumFile, SpectrumGroupFile};

/// A wavelength series given either directly or as a path to a `.wvl` file.
#[derive(Debug, Clone)]
pub enum WavelengthSource {
    Series(WavelengthSeries),
    File(PathBuf),
}

impl WavelengthSource {
    /// Resolve to a series, reading the `.wvl` file when necessary.
    ///
    /// A missing file surfaces as the underlying NotFound IO error,
    /// unchanged.
    pub fn resolve(&self) -> SpectralResult<WavelengthSeries> {
        match self {
            WavelengthSource::Series(series) => {
                debug!("wavelength series provided directly");
                Ok(series.clone())
            }
            WavelengthSource::File(path) => {
                if !path.exists() {
                    return Err(SpectralError::Io(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("{} does not exist", path.display()),
                    )));
                }
                read_wavelength(path)
            }
        }
    }
}

/// Spatial information for [`write_spectrum`].
#[derive(Debug, Clone, Default)]
pub struct LocationSpec {
    /// The (x, y) location of the spectrum, if any.
    pub location: Option<(f64, f64)>,
    /// Coordinate space of `location`. Defaults to pixel.
    pub kind: LocationKind,
    /// Path to a `.geodata` file resolving pixel and map coordinates into
    /// one another.
    pub geodata_fp: Option<PathBuf>,
}

fn write_json_pretty<T: Serialize>(value: &T, path: &Path) -> SpectralResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Final output path: directories get a file named after the record, full
/// paths get the suffix forced.
fn resolve_destination(dest: &Path, name: &str, kind: FileKind) -> PathBuf {
    if dest.is_dir() {
        dest.join(name).with_extension(kind.extension())
    } else {
        dest.with_extension(kind.extension())
    }
}

/// Write a `.wvl` file from raw wavelength values.
///
/// A missing bad-band list defaults to all-good.
pub fn write_wavelength(
    values: &[f64],
    unit: WavelengthUnit,
    bbl: Option<&[bool]>,
    fp: &Path,
) -> SpectralResult<PathBuf> {
    let series = WavelengthSeries::new(values.to_vec(), unit, bbl.map(<[bool]>::to_vec))?;
    let out_path = fp.with_extension(FileKind::Wavelength.extension());
    write_json_pretty(&series, &out_path)?;
    info!(path = %out_path.display(), "wrote wavelength file");
    Ok(out_path)
}

/// Write a `.geodata` file from a CRS identifier and a GDAL-style
/// geotransform sextuple.
pub fn write_geodata(
    crs: &str,
    geotransform: (f64, f64, f64, f64, f64, f64),
    fp: &Path,
) -> SpectralResult<PathBuf> {
    debug!(crs = %crs, "creating geotransform record");
    let geodata = BaseGeolocation {
        crs: crs.to_string(),
        geotransform: GeoTransform::from_gdal(geotransform),
    };
    let out_path = fp.with_extension(FileKind::Geodata.extension());
    write_json_pretty(&geodata, &out_path)?;
    info!(path = %out_path.display(), "wrote geodata file");
    Ok(out_path)
}

/// Write a 1-D spectrum, selecting the file kind from the spatial
/// information provided:
///
/// * no location ⇒ `.rawspec`
/// * pixel location, no geodata ⇒ `.pntspec`
/// * location plus geodata ⇒ `.geospec` (pixel and map coordinates both
///   recorded, derived through the geodata's transform)
///
/// A map location without geodata fails validation: map coordinates cannot
/// be resolved to pixel coordinates without a transform.
pub fn write_spectrum(
    values: &[f64],
    wavelength: &WavelengthSource,
    name: &str,
    dest: &Path,
    spatial: &LocationSpec,
) -> SpectralResult<PathBuf> {
    debug!(
        name = %name,
        dest = %dest.display(),
        location = ?spatial.location,
        kind = ?spatial.kind,
        geodata = ?spatial.geodata_fp,
        "writing 1-D spectrum"
    );
    let series = wavelength.resolve()?;

    let geodata = match &spatial.geodata_fp {
        Some(path) => {
            if !path.exists() {
                return Err(SpectralError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", path.display()),
                )));
            }
            Some(read_geodata(path)?)
        }
        None => None,
    };

    let out_path;
    match spatial.location {
        None => {
            let record =
                Spectrum::new(name, values.to_vec(), series, SpectrumLocation::Unlocated)?;
            out_path = resolve_destination(dest, name, FileKind::RawSpectrum);
            write_json_pretty(&RawSpectrumFile::from_record(&record), &out_path)?;
        }
        Some(location) => match geodata {
            Some(geodata) => {
                let point = PointGeolocation::from_base(&geodata, location, spatial.kind)?;
                let record =
                    Spectrum::new(name, values.to_vec(), series, SpectrumLocation::Geo(point))?;
                out_path = resolve_destination(dest, name, FileKind::GeoSpectrum);
                write_json_pretty(&GeoSpectrumFile::from_record(&record)?, &out_path)?;
            }
            None => {
                if spatial.kind == LocationKind::Map {
                    return Err(SpectralError::validation(
                        "location",
                        "a map-coordinate location requires a .geodata file to resolve \
                         pixel coordinates",
                    ));
                }
                let record = Spectrum::new(
                    name,
                    values.to_vec(),
                    series,
                    SpectrumLocation::Pixel(Point::new(location.0, location.1)),
                )?;
                out_path = resolve_destination(dest, name, FileKind::PointSpectrum);
                write_json_pretty(&PointSpectrumFile::from_record(&record)?, &out_path)?;
            }
        },
    }
    info!(path = %out_path.display(), "wrote spectrum file");
    Ok(out_path)
}

/// Write a `.specgrp` file from stacked spectra and their pixel locations.
///
/// Members are named `{name}_{n:04}`. Row widths must match the wavelength
/// band count; the boundary polygon is computed through `hull`.
pub fn write_group(
    rows: &[Vec<f64>],
    locations: &[(i64, i64)],
    wavelength: &WavelengthSource,
    name: &str,
    dest: &Path,
    hull: &dyn HullBuilder,
) -> SpectralResult<PathBuf> {
    let series = wavelength.resolve()?;
    if rows.len() != locations.len() {
        return Err(SpectralError::DimensionMismatch(format!(
            "{} spectra but {} locations",
            rows.len(),
            locations.len()
        )));
    }
    for (n, row) in rows.iter().enumerate() {
        if row.len() != series.band_count() {
            return Err(SpectralError::DimensionMismatch(format!(
                "spectrum {n} has {} values, wavelength has {} bands",
                row.len(),
                series.band_count()
            )));
        }
    }

    let mut spectra = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        let (x, y) = locations[n];
        spectra.push(Spectrum::new(
            format!("{name}_{n:04}"),
            row.clone(),
            series.clone(),
            SpectrumLocation::Pixel(Point::new(x as f64, y as f64)),
        )?);
    }
    let group = SpectrumGroup::new(name, spectra, locations.to_vec(), series, hull)?;

    let out_path = resolve_destination(dest, name, FileKind::SpectrumGroup);
    write_json_pretty(&SpectrumGroupFile::from_record(&group)?, &out_path)?;
    info!(path = %out_path.display(), members = group.member_count(), "wrote spectrum group");
    Ok(out_path)
}

/// Write each group member to `dir` as its own `.pntspec` file, named after
/// the member. Returns the written paths.
pub fn export_group_members(group: &SpectrumGroup, dir: &Path) -> SpectralResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(group.member_count());
    for spec in group.spectra() {
        let out_path = dir
            .join(spec.name())
            .with_extension(FileKind::PointSpectrum.extension());
        write_json_pretty(&PointSpectrumFile::from_record(spec)?, &out_path)?;
        written.push(out_path);
    }
    info!(dir = %dir.display(), count = written.len(), "exported group members");
    Ok(written)
}

/// Write a cube record, `.spcub` without geodata or `.geospcub` with it.
///
/// The raster payload is opened through `source` to take the pixel
/// dimensions; a band count that disagrees with the wavelength series fails
/// with a dimension mismatch.
pub fn write_cube(
    name: &str,
    wavelength: &WavelengthSource,
    raster_fp: &Path,
    dest: &Path,
    geodata_fp: Option<&Path>,
    source: &dyn RasterSource,
) -> SpectralResult<PathBuf> {
    let series = wavelength.resolve()?;
    let handle = source.open(raster_fp)?;
    let (height, width, count) = (handle.height(), handle.width(), handle.count());
    if count != series.band_count() {
        return Err(SpectralError::DimensionMismatch(format!(
            "raster has {count} bands, wavelength series has {}",
            series.band_count()
        )));
    }

    let (geodata, kind) = match geodata_fp {
        Some(path) => (Some(read_geodata(path)?), FileKind::GeoCube),
        None => (None, FileKind::Cube),
    };
    let cube = SpectralCube::new(
        name,
        series,
        height,
        width,
        raster_fp.to_path_buf(),
        geodata,
    )?;

    let out_path = resolve_destination(dest, name, kind);
    write_json_pretty(&cube, &out_path)?;
    info!(path = %out_path.display(), "wrote cube file");
    Ok(out_path)
}
