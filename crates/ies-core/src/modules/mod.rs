pub mod cu_table;
pub mod derived;
pub mod export;
pub mod grid;
pub mod illuminance;
pub mod layout;

pub use cu_table::{CuTable, SpacingCriteria, generate_cu_table};
pub use derived::{DerivedProperties, compute_derived_properties, compute_efficacy};
pub use export::{write_ies, write_ies_file};
pub use grid::{CalculationGrid, IlluminanceGrid, PlacedFixture, evaluate_grid};
pub use illuminance::{
    calculate_point_illuminance, calculate_point_illuminance_on_surface,
    calculate_point_illuminance_with_symmetry, interpolate_candela,
    interpolate_candela_with_symmetry,
};
pub use layout::{FixtureConfig, Layout, LayoutConfig, LayoutError, load_layout, resolve_layout};
