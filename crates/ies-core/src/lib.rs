//! Reader, analyzer and writer for IES LM-63 photometric files.
//!
//! [`parse_ies`] turns LM-63 text into an immutable [`IesData`] record that
//! carries the derived properties and CU table alongside the measured data.
//! Point and grid illuminance are computed from a record placed in the scene
//! with a [`FixturePose`].

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
pub mod parser;

pub use domain::{
    Ballast, BallastUpdate, CandelaMatrix, FixturePose, Header, HeaderKeyword, IesData, IesError,
    IesErrorCategory, IesResult, LuminaireGeometry, Orientation, PhotometricCalculationPoint,
    PhotometricType, Photometry, UnitsType,
};
pub use modules::{
    CalculationGrid, CuTable, DerivedProperties, IlluminanceGrid, Layout, LayoutError,
    PlacedFixture, calculate_point_illuminance, calculate_point_illuminance_on_surface,
    calculate_point_illuminance_with_symmetry, evaluate_grid, load_layout, write_ies,
    write_ies_file,
};
pub use parser::{parse_ies, parse_ies_bytes, read_ies_file};
