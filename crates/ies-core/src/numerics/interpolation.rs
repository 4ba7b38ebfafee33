use crate::domain::CandelaMatrix;

/// Position of a query angle between two entries of an angle axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBracket {
    pub lower: usize,
    pub upper: usize,
    pub fraction: f64,
}

impl AxisBracket {
    const fn at(index: usize) -> Self {
        Self {
            lower: index,
            upper: index,
            fraction: 0.0,
        }
    }

    fn blend(&self, lower_value: f64, upper_value: f64) -> f64 {
        lower_value * (1.0 - self.fraction) + upper_value * self.fraction
    }
}

/// Locates `target` on a non-decreasing axis. Targets outside the axis clamp
/// to the nearest edge; exact hits return a zero fraction.
pub fn bracket_axis(axis: &[f64], target: f64) -> Option<AxisBracket> {
    let last = axis.len().checked_sub(1)?;

    if target <= axis[0] || last == 0 {
        return Some(AxisBracket::at(0));
    }
    if target >= axis[last] {
        return Some(AxisBracket::at(last));
    }

    match axis.binary_search_by(|value| value.total_cmp(&target)) {
        Ok(index) => Some(AxisBracket::at(index)),
        Err(upper) => {
            let lower = upper - 1;
            let fraction = (target - axis[lower]) / (axis[upper] - axis[lower]);
            Some(AxisBracket {
                lower,
                upper,
                fraction,
            })
        }
    }
}

/// Bilinear candela lookup at `(vertical, horizontal)` degrees: blends along
/// the vertical axis for both horizontal bounds, then across them.
pub fn bilinear_interpolate(
    vertical_angles: &[f64],
    horizontal_angles: &[f64],
    candela: &CandelaMatrix,
    vertical: f64,
    horizontal: f64,
) -> f64 {
    let (Some(v), Some(h)) = (
        bracket_axis(vertical_angles, vertical),
        bracket_axis(horizontal_angles, horizontal),
    ) else {
        return 0.0;
    };

    let value = |row: usize, column: usize| candela.get(row, column).unwrap_or(0.0);
    let lower_plane = v.blend(value(h.lower, v.lower), value(h.lower, v.upper));
    let upper_plane = v.blend(value(h.upper, v.lower), value(h.upper, v.upper));
    h.blend(lower_plane, upper_plane)
}

#[cfg(test)]
mod tests {
    use super::{bilinear_interpolate, bracket_axis};
    use crate::domain::CandelaMatrix;

    fn sample_matrix() -> CandelaMatrix {
        CandelaMatrix::from_rows(
            vec![
                vec![1000.0, 800.0, 200.0],
                vec![900.0, 700.0, 100.0],
            ],
            3,
        )
        .expect("matrix should build")
    }

    #[test]
    fn bracket_reports_fraction_between_entries() {
        let bracket = bracket_axis(&[0.0, 10.0, 30.0], 20.0).expect("bracket");
        assert_eq!((bracket.lower, bracket.upper), (1, 2));
        assert!((bracket.fraction - 0.5).abs() < 1.0e-12);
    }

    #[test]
    fn bracket_clamps_out_of_range_targets() {
        let below = bracket_axis(&[10.0, 20.0], -5.0).expect("bracket");
        assert_eq!((below.lower, below.upper, below.fraction), (0, 0, 0.0));

        let above = bracket_axis(&[10.0, 20.0], 25.0).expect("bracket");
        assert_eq!((above.lower, above.upper, above.fraction), (1, 1, 0.0));

        let single = bracket_axis(&[0.0], 45.0).expect("bracket");
        assert_eq!((single.lower, single.upper), (0, 0));
        assert!(bracket_axis(&[], 1.0).is_none());
    }

    #[test]
    fn grid_points_are_reproduced_exactly() {
        let vertical = [0.0, 45.0, 90.0];
        let horizontal = [0.0, 90.0];
        let matrix = sample_matrix();

        for (h_index, h_angle) in horizontal.iter().enumerate() {
            for (v_index, v_angle) in vertical.iter().enumerate() {
                let expected = matrix.get(h_index, v_index).expect("grid value");
                let actual =
                    bilinear_interpolate(&vertical, &horizontal, &matrix, *v_angle, *h_angle);
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn interior_points_blend_all_four_neighbours() {
        let value = bilinear_interpolate(
            &[0.0, 45.0, 90.0],
            &[0.0, 90.0],
            &sample_matrix(),
            22.5,
            45.0,
        );
        // (900 + 800) / 2 blended between planes 0° and 90°
        assert!((value - 850.0).abs() < 1.0e-9);
    }

    #[test]
    fn out_of_range_angles_clamp_to_table_edges() {
        let matrix = sample_matrix();
        let clamped = bilinear_interpolate(&[0.0, 45.0, 90.0], &[0.0, 90.0], &matrix, 120.0, 180.0);
        assert_eq!(clamped, 100.0);
    }
}
