//! Coefficient-of-utilization table.
//!
//! Cells come from a fixed additive model, `0.5 + 0.3·ρc + 0.2·ρw + 0.1·ρf`,
//! rather than a radiosity solve. Expect ±10–15% against measured rooms. The
//! coefficients do not vary with room index; the axis is kept so callers can
//! key lookups the way published CU tables are laid out.

use crate::common::constants::{
    CU_BASE_COEFFICIENT, CU_CEILING_REFLECTANCES, CU_CEILING_WEIGHT, CU_FLOOR_REFLECTANCES,
    CU_FLOOR_WEIGHT, CU_ROOM_INDICES, CU_WALL_REFLECTANCES, CU_WALL_WEIGHT,
    DEFAULT_LIGHT_LOSS_FACTOR, SPACING_CRITERIA_MAXIMUM, SPACING_CRITERIA_RECOMMENDED,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingCriteria {
    pub maximum: f64,
    pub recommended: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuTable {
    room_indices: Vec<f64>,
    ceiling_reflectances: Vec<f64>,
    wall_reflectances: Vec<f64>,
    floor_reflectances: Vec<f64>,
    /// Dense `[ceiling][wall][floor]` grid.
    coefficients: Vec<f64>,
    light_loss_factor: f64,
    spacing_criteria: SpacingCriteria,
}

impl CuTable {
    pub fn room_indices(&self) -> &[f64] {
        &self.room_indices
    }

    pub fn ceiling_reflectances(&self) -> &[f64] {
        &self.ceiling_reflectances
    }

    pub fn wall_reflectances(&self) -> &[f64] {
        &self.wall_reflectances
    }

    pub fn floor_reflectances(&self) -> &[f64] {
        &self.floor_reflectances
    }

    pub fn light_loss_factor(&self) -> f64 {
        self.light_loss_factor
    }

    pub fn spacing_criteria(&self) -> SpacingCriteria {
        self.spacing_criteria
    }

    pub fn coefficient(&self, ceiling: usize, wall: usize, floor: usize) -> Option<f64> {
        if ceiling >= self.ceiling_reflectances.len()
            || wall >= self.wall_reflectances.len()
            || floor >= self.floor_reflectances.len()
        {
            return None;
        }
        let walls = self.wall_reflectances.len();
        let floors = self.floor_reflectances.len();
        self.coefficients
            .get((ceiling * walls + wall) * floors + floor)
            .copied()
    }

    /// Looks a cell up by reflectance values, snapping each to the nearest
    /// tabulated reflectance.
    pub fn coefficient_for_reflectances(&self, ceiling: f64, wall: f64, floor: f64) -> Option<f64> {
        self.coefficient(
            nearest_index(&self.ceiling_reflectances, ceiling)?,
            nearest_index(&self.wall_reflectances, wall)?,
            nearest_index(&self.floor_reflectances, floor)?,
        )
    }
}

pub fn generate_cu_table() -> CuTable {
    let mut coefficients = Vec::with_capacity(
        CU_CEILING_REFLECTANCES.len() * CU_WALL_REFLECTANCES.len() * CU_FLOOR_REFLECTANCES.len(),
    );
    for ceiling in CU_CEILING_REFLECTANCES {
        for wall in CU_WALL_REFLECTANCES {
            for floor in CU_FLOOR_REFLECTANCES {
                coefficients.push(
                    CU_BASE_COEFFICIENT
                        + CU_CEILING_WEIGHT * ceiling
                        + CU_WALL_WEIGHT * wall
                        + CU_FLOOR_WEIGHT * floor,
                );
            }
        }
    }

    CuTable {
        room_indices: CU_ROOM_INDICES.to_vec(),
        ceiling_reflectances: CU_CEILING_REFLECTANCES.to_vec(),
        wall_reflectances: CU_WALL_REFLECTANCES.to_vec(),
        floor_reflectances: CU_FLOOR_REFLECTANCES.to_vec(),
        coefficients,
        light_loss_factor: DEFAULT_LIGHT_LOSS_FACTOR,
        spacing_criteria: SpacingCriteria {
            maximum: SPACING_CRITERIA_MAXIMUM,
            recommended: SPACING_CRITERIA_RECOMMENDED,
        },
    }
}

fn nearest_index(axis: &[f64], target: f64) -> Option<usize> {
    axis.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(index, _)| index)
}
