//! Write-then-read round trips for every file format.

use spectral_common::LocationKind;
use spectral_io::{
    export_group_members, read_cube, read_geodata, read_group, read_spectrum, read_wavelength,
    write_cube, write_geodata, write_group, write_spectrum, write_wavelength, CubeKind,
    LocationSpec, SpectrumKind, WavelengthSource,
};
use spectral_model::{SpectrumLocation, WavelengthUnit};
use test_utils::{temp_dir, vnir_series, MemoryRasters, RectHull};

// ============================================================================
// Wavelength (.wvl)
// ============================================================================

#[test]
fn test_wavelength_round_trip() {
    let dir = temp_dir();
    let path = write_wavelength(
        &[400.0, 500.0, 600.0, 700.0],
        WavelengthUnit::Nanometer,
        Some(&[true, false, true, true]),
        &dir.path().join("vnir"),
    )
    .unwrap();
    assert_eq!(path.extension().unwrap(), "wvl");

    let series = read_wavelength(&path).unwrap();
    assert_eq!(series, vnir_series());
}

#[test]
fn test_wavelength_default_bbl() {
    let dir = temp_dir();
    let path = write_wavelength(
        &[1.0, 2.0],
        WavelengthUnit::Micron,
        None,
        &dir.path().join("swir"),
    )
    .unwrap();
    let series = read_wavelength(&path).unwrap();
    assert_eq!(series.bbl(), &[true, true]);
}

// ============================================================================
// Geodata (.geodata)
// ============================================================================

#[test]
fn test_geodata_round_trip() {
    let dir = temp_dir();
    let gdal = (500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0);
    let path = write_geodata("EPSG:32611", gdal, &dir.path().join("scene")).unwrap();
    assert_eq!(path.extension().unwrap(), "geodata");

    let geodata = read_geodata(&path).unwrap();
    assert_eq!(geodata.crs, "EPSG:32611");
    assert_eq!(geodata.geotransform.to_gdal(), gdal);
}

// ============================================================================
// 1-D spectra (.rawspec / .pntspec / .geospec)
// ============================================================================

fn series_source() -> WavelengthSource {
    WavelengthSource::Series(vnir_series())
}

#[test]
fn test_raw_spectrum_round_trip() {
    let dir = temp_dir();
    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &series_source(),
        "basalt",
        dir.path(),
        &LocationSpec::default(),
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "basalt.rawspec");

    let spec = read_spectrum(&path, SpectrumKind::Raw).unwrap();
    assert_eq!(spec.name(), "basalt");
    assert_eq!(spec.values(), &[0.1, 0.2, 0.3, 0.4]);
    assert_eq!(*spec.location(), SpectrumLocation::Unlocated);
    assert!(!spec.mask_applied());
}

#[test]
fn test_point_spectrum_round_trip() {
    let dir = temp_dir();
    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &series_source(),
        "basalt",
        dir.path(),
        &LocationSpec {
            location: Some((10.0, 20.0)),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "basalt.pntspec");

    let spec = read_spectrum(&path, SpectrumKind::Point).unwrap();
    assert_eq!(spec.pixel_location(), Some((10.0, 20.0)));
}

#[test]
fn test_geo_spectrum_round_trip_from_pixel() {
    let dir = temp_dir();
    let geodata_fp = write_geodata(
        "EPSG:32611",
        (500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0),
        &dir.path().join("scene"),
    )
    .unwrap();

    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &series_source(),
        "basalt",
        dir.path(),
        &LocationSpec {
            location: Some((10.0, 20.0)),
            kind: LocationKind::Pixel,
            geodata_fp: Some(geodata_fp),
        },
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "basalt.geospec");

    let spec = read_spectrum(&path, SpectrumKind::Geo).unwrap();
    assert_eq!(spec.pixel_location(), Some((10.0, 20.0)));
    // map_location returns (y, x)
    assert_eq!(spec.map_location(), Some((4099400.0, 500300.0)));
    let SpectrumLocation::Geo(point) = spec.location() else {
        panic!("expected geo-located spectrum");
    };
    assert_eq!(point.crs, "EPSG:32611");
}

#[test]
fn test_geo_spectrum_from_map_location() {
    let dir = temp_dir();
    let geodata_fp = write_geodata(
        "EPSG:32611",
        (500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0),
        &dir.path().join("scene"),
    )
    .unwrap();

    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &series_source(),
        "basalt",
        dir.path(),
        &LocationSpec {
            location: Some((500300.0, 4099400.0)),
            kind: LocationKind::Map,
            geodata_fp: Some(geodata_fp),
        },
    )
    .unwrap();

    let spec = read_spectrum(&path, SpectrumKind::Geo).unwrap();
    assert_eq!(spec.pixel_location(), Some((10.0, 20.0)));
}

#[test]
fn test_full_path_destination_forces_suffix() {
    let dir = temp_dir();
    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &series_source(),
        "basalt",
        &dir.path().join("custom_name.txt"),
        &LocationSpec::default(),
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "custom_name.rawspec");
}

#[test]
fn test_wavelength_source_from_file() {
    let dir = temp_dir();
    let wvl_fp = write_wavelength(
        &[400.0, 500.0, 600.0, 700.0],
        WavelengthUnit::Nanometer,
        None,
        &dir.path().join("vnir"),
    )
    .unwrap();

    let path = write_spectrum(
        &[0.1, 0.2, 0.3, 0.4],
        &WavelengthSource::File(wvl_fp),
        "basalt",
        dir.path(),
        &LocationSpec::default(),
    )
    .unwrap();
    let spec = read_spectrum(&path, SpectrumKind::Raw).unwrap();
    assert_eq!(spec.wavelength().band_count(), 4);
}

// ============================================================================
// Spectrum groups (.specgrp)
// ============================================================================

#[test]
fn test_group_round_trip() {
    let dir = temp_dir();
    let rows = vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
        vec![9.0, 10.0, 11.0, 12.0],
    ];
    let locations = vec![(0, 0), (4, 0), (4, 3)];
    let path = write_group(
        &rows,
        &locations,
        &series_source(),
        "outcrop",
        dir.path(),
        &RectHull,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "outcrop.specgrp");

    let group = read_group(&path).unwrap();
    assert_eq!(group.name(), "outcrop");
    assert_eq!(group.member_count(), 3);
    assert_eq!(group.spectra()[0].name(), "outcrop_0000");
    assert_eq!(group.spectra()[2].values(), &[9.0, 10.0, 11.0, 12.0]);
    assert_eq!(group.points(), &locations[..]);
    // Stored hull vertices are preserved as-is.
    assert_eq!(group.polygon_vertices().len(), 4);
    assert_eq!(group.polygon_vertices()[2], (4.0, 3.0));
}

#[test]
fn test_export_group_members() {
    let dir = temp_dir();
    let rows = vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]];
    let path = write_group(
        &rows,
        &[(1, 1), (2, 2)],
        &series_source(),
        "outcrop",
        dir.path(),
        &RectHull,
    )
    .unwrap();
    let group = read_group(&path).unwrap();

    let written = export_group_members(&group, dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    let member = read_spectrum(&written[1], SpectrumKind::Point).unwrap();
    assert_eq!(member.name(), "outcrop_0001");
    assert_eq!(member.pixel_location(), Some((2.0, 2.0)));
}

// ============================================================================
// Cubes (.spcub / .geospcub)
// ============================================================================

#[test]
fn test_cube_round_trip() {
    let dir = temp_dir();
    let raster_fp = dir.path().join("scene.img");
    let mut rasters = MemoryRasters::new();
    rasters.insert_gradient(&raster_fp, 8, 6, 4);

    let path = write_cube(
        "scene",
        &series_source(),
        &raster_fp,
        dir.path(),
        None,
        &rasters,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "scene.spcub");

    let cube = read_cube(&path, CubeKind::Plain).unwrap();
    assert_eq!(cube.nrows(), 8);
    assert_eq!(cube.ncols(), 6);
    assert_eq!(cube.nbands(), 4);
    assert!(cube.geodata().is_none());

    let data = cube.load(&rasters, None).unwrap();
    assert_eq!(data.shape(), (8, 6, 4));
    assert_eq!(data.get(2, 3, 1), 231.0);
}

#[test]
fn test_geo_cube_round_trip() {
    let dir = temp_dir();
    let raster_fp = dir.path().join("scene.img");
    let mut rasters = MemoryRasters::new();
    rasters.insert_gradient(&raster_fp, 8, 6, 4);
    let geodata_fp = write_geodata(
        "EPSG:32611",
        (500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0),
        &dir.path().join("scene"),
    )
    .unwrap();

    let path = write_cube(
        "scene",
        &series_source(),
        &raster_fp,
        dir.path(),
        Some(&geodata_fp),
        &rasters,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "scene.geospcub");

    let cube = read_cube(&path, CubeKind::Geo).unwrap();
    let geodata = cube.geodata().unwrap();
    assert_eq!(geodata.crs, "EPSG:32611");
    assert_eq!(geodata.geotransform.xres, 30.0);
}
