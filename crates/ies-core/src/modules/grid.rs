use crate::common::constants::MAX_GRID_POINTS;
use crate::domain::{FixturePose, IesData, PhotometricCalculationPoint};
use crate::modules::illuminance::calculate_point_illuminance;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rectangular working plane at `height`, starting at `origin` (x, y) and
/// extending `width` along x and `length` along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationGrid {
    pub origin: [f64; 2],
    pub width: f64,
    pub length: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    #[serde(default)]
    pub height: f64,
}

impl CalculationGrid {
    pub fn columns(&self) -> usize {
        axis_count(self.width, self.spacing_x)
    }

    pub fn rows(&self) -> usize {
        axis_count(self.length, self.spacing_y)
    }

    /// `columns × rows`, or `None` when the product does not fit in `usize`.
    pub fn point_count(&self) -> Option<usize> {
        self.columns().checked_mul(self.rows())
    }

    /// Grid points in row-major order (x varies fastest). Both edges are
    /// included when the extent is a whole multiple of the spacing.
    ///
    /// The point count is not bounded here; [`crate::modules::layout`]
    /// rejects grids above [`MAX_GRID_POINTS`] before evaluation.
    pub fn points(&self) -> Vec<[f64; 3]> {
        let columns = self.columns();
        let rows = self.rows();
        let capacity = self.point_count().unwrap_or(MAX_GRID_POINTS).min(MAX_GRID_POINTS);
        let mut points = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                points.push([
                    self.origin[0] + column as f64 * self.spacing_x,
                    self.origin[1] + row as f64 * self.spacing_y,
                    self.height,
                ]);
            }
        }
        points
    }
}

/// Degenerate extents or spacings collapse the axis to the origin.
fn axis_count(extent: f64, spacing: f64) -> usize {
    if !spacing.is_finite() || !extent.is_finite() || spacing <= 0.0 || extent <= 0.0 {
        return 1;
    }
    // Float-to-int `as` saturates, so absurd extents end at usize::MAX.
    ((extent / spacing + 1.0e-9).floor() as usize).saturating_add(1)
}

/// A parsed luminaire placed in the scene.
#[derive(Debug, Clone, Copy)]
pub struct PlacedFixture<'a> {
    pub data: &'a IesData,
    pub pose: FixturePose,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IlluminanceGrid {
    pub columns: usize,
    pub rows: usize,
    pub points: Vec<PhotometricCalculationPoint>,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    /// `min / average`; zero for an unlit grid.
    pub uniformity: f64,
}

pub fn evaluate_grid(fixtures: &[PlacedFixture<'_>], grid: &CalculationGrid) -> IlluminanceGrid {
    let positions = grid.points();
    let points = evaluate_points(fixtures, positions);

    let count = points.len();
    let (min, max, sum) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), point| {
            (
                min.min(point.illuminance),
                max.max(point.illuminance),
                sum + point.illuminance,
            )
        },
    );
    let (min, max, average) = if count == 0 {
        (0.0, 0.0, 0.0)
    } else {
        (min, max, sum / count as f64)
    };
    let uniformity = if average > 0.0 { min / average } else { 0.0 };

    tracing::debug!(
        fixtures = fixtures.len(),
        points = count,
        average,
        "evaluated illuminance grid"
    );

    IlluminanceGrid {
        columns: grid.columns(),
        rows: grid.rows(),
        points,
        min,
        max,
        average,
        uniformity,
    }
}

#[cfg(feature = "parallel")]
fn evaluate_points(
    fixtures: &[PlacedFixture<'_>],
    positions: Vec<[f64; 3]>,
) -> Vec<PhotometricCalculationPoint> {
    positions
        .into_par_iter()
        .map(|position| combine_fixtures(fixtures, position))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_points(
    fixtures: &[PlacedFixture<'_>],
    positions: Vec<[f64; 3]>,
) -> Vec<PhotometricCalculationPoint> {
    positions
        .into_iter()
        .map(|position| combine_fixtures(fixtures, position))
        .collect()
}

/// Sums every fixture's contribution. Direction and incident angle are
/// those of the strongest contributor.
fn combine_fixtures(
    fixtures: &[PlacedFixture<'_>],
    position: [f64; 3],
) -> PhotometricCalculationPoint {
    let mut combined = PhotometricCalculationPoint {
        position,
        illuminance: 0.0,
        luminance: None,
        direction_to_source: [0.0; 3],
        incident_angle: 0.0,
    };
    let mut strongest = 0.0;

    for fixture in fixtures {
        let contribution = calculate_point_illuminance(fixture.data, &fixture.pose, position);
        combined.illuminance += contribution.illuminance;
        if contribution.illuminance > strongest {
            strongest = contribution.illuminance;
            combined.direction_to_source = contribution.direction_to_source;
            combined.incident_angle = contribution.incident_angle;
        }
    }
    combined
}
