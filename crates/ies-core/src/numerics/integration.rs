use crate::common::constants::{DEGRAD, PI2};

/// Flux through the band between two consecutive vertical angles of one
/// horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonalSegment {
    /// Midpoint of the zone in degrees.
    pub mid_angle: f64,
    pub lumens: f64,
}

/// Zonal-lumen integration of one candela row: each zone contributes the
/// average candela of its bounds times the solid angle `2π(cos θ1 − cos θ2)`.
pub fn zonal_segments<'a>(
    vertical_angles: &'a [f64],
    candela: &'a [f64],
) -> impl Iterator<Item = ZonalSegment> + 'a {
    vertical_angles
        .windows(2)
        .zip(candela.windows(2))
        .map(|(angles, values)| {
            let solid_angle = PI2 * ((angles[0] * DEGRAD).cos() - (angles[1] * DEGRAD).cos());
            ZonalSegment {
                mid_angle: 0.5 * (angles[0] + angles[1]),
                lumens: 0.5 * (values[0] + values[1]) * solid_angle,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::zonal_segments;
    use crate::common::constants::PI2;

    #[test]
    fn uniform_hemisphere_integrates_to_two_pi_intensity() {
        let total: f64 = zonal_segments(&[0.0, 90.0], &[1000.0, 1000.0])
            .map(|segment| segment.lumens)
            .sum();
        assert!((total - PI2 * 1000.0).abs() < 1.0e-9);
    }

    #[test]
    fn finer_zones_sum_to_the_same_uniform_flux() {
        let angles = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0];
        let candela = [10.0; 7];
        let total: f64 = zonal_segments(&angles, &candela)
            .map(|segment| segment.lumens)
            .sum();
        assert!((total - 2.0 * PI2 * 10.0).abs() < 1.0e-9);
    }

    #[test]
    fn segments_report_zone_midpoints() {
        let segments = zonal_segments(&[0.0, 90.0, 180.0], &[1.0, 1.0, 1.0]).collect::<Vec<_>>();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].mid_angle, 45.0);
        assert_eq!(segments[1].mid_angle, 135.0);
    }

    #[test]
    fn single_angle_has_no_zones() {
        assert_eq!(zonal_segments(&[0.0], &[100.0]).count(), 0);
    }
}
