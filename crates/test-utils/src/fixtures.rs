//! Pre-built records representing common test scenarios.

use spectral_common::{BaseGeolocation, GeoTransform, Point};
use spectral_model::{Spectrum, SpectrumLocation, WavelengthSeries, WavelengthUnit};

/// A short VNIR wavelength series in nanometers with one bad band.
pub fn vnir_series() -> WavelengthSeries {
    WavelengthSeries::new(
        vec![400.0, 500.0, 600.0, 700.0],
        WavelengthUnit::Nanometer,
        Some(vec![true, false, true, true]),
    )
    .unwrap()
}

/// A series with every band marked good.
pub fn clean_series() -> WavelengthSeries {
    WavelengthSeries::new(
        vec![400.0, 500.0, 600.0, 700.0],
        WavelengthUnit::Nanometer,
        None,
    )
    .unwrap()
}

/// A north-up UTM-style geotransform: 30 m pixels, origin at
/// (500000, 4100000).
pub fn utm_transform() -> GeoTransform {
    GeoTransform::from_gdal((500000.0, 30.0, 0.0, 4100000.0, -30.0, 0.0))
}

/// A base geolocation pairing [`utm_transform`] with a UTM zone 11N CRS.
pub fn utm_geolocation() -> BaseGeolocation {
    BaseGeolocation {
        crs: "EPSG:32611".to_string(),
        geotransform: utm_transform(),
    }
}

/// An unlocated spectrum over [`vnir_series`].
pub fn raw_spectrum() -> Spectrum {
    Spectrum::new(
        "basalt",
        vec![0.1, 0.2, 0.3, 0.4],
        vnir_series(),
        SpectrumLocation::Unlocated,
    )
    .unwrap()
}

/// A pixel-located spectrum over [`vnir_series`].
pub fn point_spectrum(name: &str, x: f64, y: f64) -> Spectrum {
    Spectrum::new(
        name,
        vec![0.1, 0.2, 0.3, 0.4],
        vnir_series(),
        SpectrumLocation::Pixel(Point::new(x, y)),
    )
    .unwrap()
}
