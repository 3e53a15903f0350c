//! Conversion-law tests across all wavelength unit pairs.

use spectral_model::{WavelengthSeries, WavelengthUnit};

const UNITS: [WavelengthUnit; 4] = [
    WavelengthUnit::Nanometer,
    WavelengthUnit::Micron,
    WavelengthUnit::Meter,
    WavelengthUnit::Wavenumber,
];

fn series(unit: WavelengthUnit) -> WavelengthSeries {
    // Values plausible for the unit so reciprocal conversions stay sane.
    let values = match unit {
        WavelengthUnit::Nanometer => vec![400.0, 550.0, 700.0, 1000.0],
        WavelengthUnit::Micron => vec![0.4, 0.55, 0.7, 1.0],
        WavelengthUnit::Meter => vec![4e-7, 5.5e-7, 7e-7, 1e-6],
        WavelengthUnit::Wavenumber => vec![2.5e6, 1.818e6, 1.428e6, 1e6],
    };
    WavelengthSeries::new(values, unit, None).unwrap()
}

#[test]
fn test_round_trip_all_unit_pairs() {
    for a in UNITS {
        let original = series(a);
        for b in UNITS {
            let mut s = original.clone();
            s.convert_to(b);
            assert_eq!(s.unit(), b);
            s.convert_to(a);
            assert_eq!(s.unit(), a);
            for (x, y) in s.values().iter().zip(original.values()) {
                let rel = ((x - y) / y).abs();
                assert!(rel < 1e-12, "{a:?} -> {b:?} -> {a:?}: {x} vs {y}");
            }
        }
    }
}

#[test]
fn test_identity_conversion_is_exact() {
    for unit in UNITS {
        let original = series(unit);
        let mut s = original.clone();
        s.convert_to(unit);
        assert_eq!(s, original);
    }
}

#[test]
fn test_derived_counts_survive_conversion() {
    let mut s = WavelengthSeries::new(
        vec![400.0, 500.0, 600.0],
        WavelengthUnit::Nanometer,
        Some(vec![true, false, true]),
    )
    .unwrap();
    for unit in UNITS {
        s.convert_to(unit);
        assert_eq!(s.band_count(), 3);
        assert_eq!(s.good_band_count(), 2);
    }
}

#[test]
fn test_known_conversion_constants() {
    let mut s = WavelengthSeries::new(vec![500.0], WavelengthUnit::Nanometer, None).unwrap();
    s.convert_to(WavelengthUnit::Micron);
    assert_eq!(s.values(), &[0.5]);
    s.convert_to(WavelengthUnit::Meter);
    assert_eq!(s.values(), &[5e-7]);
    s.convert_to(WavelengthUnit::Wavenumber);
    assert_eq!(s.values(), &[2e6]);
    s.convert_to(WavelengthUnit::Nanometer);
    assert_eq!(s.values(), &[500.0]);
}
