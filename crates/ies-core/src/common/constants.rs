//! Fixed engine constants shared by the derived-property, CU and
//! illuminance calculators.

pub const PI: f64 = std::f64::consts::PI;
pub const PI2: f64 = 2.0 * PI;
pub const RADDEG: f64 = 180.0 / PI;
pub const DEGRAD: f64 = PI / 180.0;

/// Fraction of peak intensity bounding the beam cone.
pub const BEAM_THRESHOLD: f64 = 0.5;
/// Fraction of peak intensity bounding the field cone.
pub const FIELD_THRESHOLD: f64 = 0.1;
/// Cone angle reported when no 0° horizontal plane was measured.
pub const DEFAULT_CONE_ANGLE: f64 = 180.0;
/// Zones whose mid-angle is at or below this vertical angle count as downward.
pub const HORIZON_ANGLE: f64 = 90.0;

pub const CU_ROOM_INDICES: [f64; 10] = [0.6, 0.8, 1.0, 1.25, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0];
pub const CU_CEILING_REFLECTANCES: [f64; 5] = [0.8, 0.7, 0.5, 0.3, 0.0];
pub const CU_WALL_REFLECTANCES: [f64; 4] = [0.7, 0.5, 0.3, 0.1];
pub const CU_FLOOR_REFLECTANCES: [f64; 1] = [0.2];
pub const CU_BASE_COEFFICIENT: f64 = 0.5;
pub const CU_CEILING_WEIGHT: f64 = 0.3;
pub const CU_WALL_WEIGHT: f64 = 0.2;
pub const CU_FLOOR_WEIGHT: f64 = 0.1;
pub const DEFAULT_LIGHT_LOSS_FACTOR: f64 = 0.8;
pub const SPACING_CRITERIA_MAXIMUM: f64 = 1.5;
pub const SPACING_CRITERIA_RECOMMENDED: f64 = 1.2;

/// Values per physical line in angle and candela blocks written to LM-63.
pub const VALUES_PER_LINE: usize = 10;

/// Largest working-plane grid a layout file may request.
pub const MAX_GRID_POINTS: usize = 1_000_000;
