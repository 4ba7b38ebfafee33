use crate::common::constants::{
    BEAM_THRESHOLD, DEFAULT_CONE_ANGLE, FIELD_THRESHOLD, HORIZON_ANGLE,
};
use crate::domain::{CandelaMatrix, Photometry};
use crate::numerics::zonal_segments;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedProperties {
    pub total_lumens: f64,
    /// Lumens per input watt; zero when the input wattage is zero.
    pub efficacy: f64,
    pub max_candela: f64,
    pub mean_candela: f64,
    /// Full cone angle in degrees at 50% of peak intensity.
    pub beam_angle: f64,
    /// Full cone angle in degrees at 10% of peak intensity.
    pub field_angle: f64,
    pub downward_ratio: f64,
    pub upward_ratio: f64,
}

pub fn compute_derived_properties(photometry: &Photometry) -> DerivedProperties {
    let total_lumens = total_lumens(photometry);
    let (max_candela, mean_candela) = candela_statistics(&photometry.candela);
    let (beam_angle, field_angle) = cone_angles(photometry, max_candela);
    let (downward_ratio, upward_ratio) = light_distribution_ratios(photometry);

    DerivedProperties {
        total_lumens,
        efficacy: compute_efficacy(total_lumens, photometry.ballast.input_watts),
        max_candela,
        mean_candela,
        beam_angle,
        field_angle,
        downward_ratio,
        upward_ratio,
    }
}

/// Zonal-lumen total: each horizontal plane is integrated over its vertical
/// zones and the plane totals are averaged.
pub fn total_lumens(photometry: &Photometry) -> f64 {
    let candela = &photometry.candela;
    if candela.horizontal_count() == 0 {
        return 0.0;
    }

    let sum = candela
        .rows()
        .map(|row| {
            zonal_segments(&photometry.vertical_angles, row)
                .map(|segment| segment.lumens)
                .sum::<f64>()
        })
        .sum::<f64>();
    sum / candela.horizontal_count() as f64
}

pub fn compute_efficacy(total_lumens: f64, input_watts: f64) -> f64 {
    if input_watts == 0.0 {
        return 0.0;
    }
    total_lumens / input_watts
}

/// Returns `(max, mean)` over every candela value, or zeros for an empty
/// matrix.
pub fn candela_statistics(candela: &CandelaMatrix) -> (f64, f64) {
    let values = candela.values();
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (max, mean)
}

/// Beam and field angles measured on the 0° horizontal plane.
pub fn cone_angles(photometry: &Photometry, max_candela: f64) -> (f64, f64) {
    let Some(plane) = photometry
        .horizontal_angles
        .iter()
        .position(|angle| *angle == 0.0)
        .and_then(|index| photometry.candela.row(index))
    else {
        return (DEFAULT_CONE_ANGLE, DEFAULT_CONE_ANGLE);
    };

    let cone = |threshold: f64| {
        let limit = threshold * max_candela;
        photometry
            .vertical_angles
            .iter()
            .zip(plane)
            .filter(|(_, candela)| **candela >= limit)
            .map(|(angle, _)| *angle)
            .fold(None, |widest: Option<f64>, angle| {
                Some(widest.map_or(angle, |widest| widest.max(angle)))
            })
            .map_or(0.0, |half_angle| 2.0 * half_angle)
    };

    (cone(BEAM_THRESHOLD), cone(FIELD_THRESHOLD))
}

/// Returns `(downward, upward)` flux fractions. A zone counts as downward
/// when its mid-angle is at or below the horizon.
pub fn light_distribution_ratios(photometry: &Photometry) -> (f64, f64) {
    let mut downward = 0.0;
    let mut upward = 0.0;

    for row in photometry.candela.rows() {
        for segment in zonal_segments(&photometry.vertical_angles, row) {
            if segment.mid_angle <= HORIZON_ANGLE {
                downward += segment.lumens;
            } else {
                upward += segment.lumens;
            }
        }
    }

    let total = downward + upward;
    if total == 0.0 {
        return (0.0, 0.0);
    }
    (downward / total, upward / total)
}
