//! JSON file I/O for spectral records.
//!
//! One record per file, human-readable with indentation. Each record kind
//! has its own extension; readers check extensions strictly and writers
//! select them from the record shape.
//!
//! | Extension   | Payload                                |
//! |-------------|----------------------------------------|
//! | `.wvl`      | wavelength series                      |
//! | `.rawspec`  | spectrum, no location                  |
//! | `.pntspec`  | spectrum + pixel point                 |
//! | `.geospec`  | spectrum + full point geolocation      |
//! | `.specgrp`  | spectrum group                         |
//! | `.spcub`    | spectral cube                          |
//! | `.geospcub` | spectral cube + base geolocation       |
//! | `.geodata`  | base geolocation                       |

pub mod format;
pub mod read;
mod wire;
pub mod write;

pub use format::FileKind;
pub use read::{
    read_cube, read_geodata, read_group, read_spectrum, read_wavelength, CubeKind, SpectrumKind,
};
pub use write::{
    export_group_members, write_cube, write_geodata, write_group, write_spectrum,
    write_wavelength, LocationSpec, WavelengthSource,
};
