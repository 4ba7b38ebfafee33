pub mod errors;

pub use errors::{IesError, IesErrorCategory, IesResult};

use crate::modules::cu_table::{CuTable, generate_cu_table};
use crate::modules::derived::{DerivedProperties, compute_derived_properties, compute_efficacy};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Header block of an LM-63 file: the lines between the version marker and
/// the `TILT=` line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Header {
    pub version: Option<String>,
    pub manufacturer: String,
    pub catalog_number: String,
    pub luminaire: String,
    pub lamp: String,
    pub date: String,
    pub ballast: String,
    pub keywords: Vec<HeaderKeyword>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderKeyword {
    pub name: String,
    pub value: String,
}

impl HeaderKeyword {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for HeaderKeyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhotometricType {
    C,
    B,
    A,
}

impl PhotometricType {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::C),
            2 => Some(Self::B),
            3 => Some(Self::A),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::C => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitsType {
    Feet,
    Meters,
}

impl UnitsType {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Feet),
            2 => Some(Self::Meters),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Feet => 1,
            Self::Meters => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LuminaireGeometry {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ballast {
    pub factor: f64,
    /// Middle value of the ballast line; kept only so the writer can
    /// reproduce it.
    pub reserved: f64,
    pub input_watts: f64,
}

impl Default for Ballast {
    fn default() -> Self {
        Self {
            factor: 1.0,
            reserved: 1.0,
            input_watts: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallastUpdate {
    pub factor: f64,
    pub input_watts: f64,
    pub description: String,
}

/// Dense row-major candela grid, one row per horizontal angle and one
/// column per vertical angle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CandelaMatrix {
    horizontal_count: usize,
    vertical_count: usize,
    values: Vec<f64>,
}

impl CandelaMatrix {
    /// Builds a matrix from rows; every row must hold `vertical_count`
    /// values.
    pub fn from_rows(rows: Vec<Vec<f64>>, vertical_count: usize) -> Option<Self> {
        if rows.iter().any(|row| row.len() != vertical_count) {
            return None;
        }
        let horizontal_count = rows.len();
        let values = rows.into_iter().flatten().collect();
        Some(Self {
            horizontal_count,
            vertical_count,
            values,
        })
    }

    pub fn horizontal_count(&self) -> usize {
        self.horizontal_count
    }

    pub fn vertical_count(&self) -> usize {
        self.vertical_count
    }

    pub fn get(&self, horizontal: usize, vertical: usize) -> Option<f64> {
        if horizontal >= self.horizontal_count || vertical >= self.vertical_count {
            return None;
        }
        self.values
            .get(horizontal * self.vertical_count + vertical)
            .copied()
    }

    pub fn row(&self, horizontal: usize) -> Option<&[f64]> {
        if horizontal >= self.horizontal_count {
            return None;
        }
        let start = horizontal * self.vertical_count;
        self.values.get(start..start + self.vertical_count)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.horizontal_count).filter_map(|horizontal| self.row(horizontal))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photometry {
    pub tilt: String,
    pub lamp_count: f64,
    pub lumens_per_lamp: f64,
    pub candela_multiplier: f64,
    pub photometric_type: PhotometricType,
    pub units: UnitsType,
    pub geometry: LuminaireGeometry,
    pub ballast: Ballast,
    pub vertical_angles: Vec<f64>,
    pub horizontal_angles: Vec<f64>,
    pub candela: CandelaMatrix,
}

/// A parsed LM-63 file together with everything derived from it.
///
/// The record is immutable: the update methods return a new value and
/// recompute only the derived properties that depend on the changed group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IesData {
    header: Header,
    photometry: Photometry,
    derived: DerivedProperties,
    cu_table: CuTable,
}

impl IesData {
    pub(crate) fn new(header: Header, photometry: Photometry) -> Self {
        let derived = compute_derived_properties(&photometry);
        let cu_table = generate_cu_table();
        Self {
            header,
            photometry,
            derived,
            cu_table,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn photometry(&self) -> &Photometry {
        &self.photometry
    }

    pub fn derived(&self) -> &DerivedProperties {
        &self.derived
    }

    pub fn cu_table(&self) -> &CuTable {
        &self.cu_table
    }

    pub fn with_header(&self, header: Header) -> Self {
        Self {
            header,
            ..self.clone()
        }
    }

    pub fn with_ballast(&self, update: BallastUpdate) -> Self {
        let mut next = self.clone();
        next.photometry.ballast.factor = update.factor;
        next.photometry.ballast.input_watts = update.input_watts;
        next.header.ballast = update.description;
        next.derived.efficacy = compute_efficacy(next.derived.total_lumens, update.input_watts);
        next
    }

    pub fn with_geometry(&self, geometry: LuminaireGeometry, units: UnitsType) -> Self {
        let mut next = self.clone();
        next.photometry.geometry = geometry;
        next.photometry.units = units;
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub roll: f64,
}

/// Placement of a luminaire. Zero orientation aims the nadir at `-z` with
/// the 0° horizontal plane along `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixturePose {
    pub position: [f64; 3],
    #[serde(default)]
    pub orientation: Orientation,
}

impl FixturePose {
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            orientation: Orientation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhotometricCalculationPoint {
    pub position: [f64; 3],
    pub illuminance: f64,
    pub luminance: Option<f64>,
    pub direction_to_source: [f64; 3],
    pub incident_angle: f64,
}
