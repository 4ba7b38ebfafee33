use crate::common::constants::DEGRAD;
use crate::domain::Orientation;

pub fn sub3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale3(a: [f64; 3], factor: f64) -> [f64; 3] {
    [a[0] * factor, a[1] * factor, a[2] * factor]
}

pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm3(a: [f64; 3]) -> f64 {
    dot3(a, a).sqrt()
}

/// Expresses a world-space direction in the luminaire frame.
///
/// The luminaire is rotated by roll about x, then pitch about y, then yaw
/// about z (`R = Rz·Ry·Rx`); the local vector is `Rᵀ·v`.
pub fn rotate_into_local_frame(vector: [f64; 3], orientation: Orientation) -> [f64; 3] {
    if orientation == Orientation::default() {
        return vector;
    }

    let (sy, cy) = (orientation.yaw * DEGRAD).sin_cos();
    let (sp, cp) = (orientation.pitch * DEGRAD).sin_cos();
    let (sr, cr) = (orientation.roll * DEGRAD).sin_cos();

    let rotation = [
        [cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr],
        [sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr],
        [-sp, cp * sr, cp * cr],
    ];

    [
        rotation[0][0] * vector[0] + rotation[1][0] * vector[1] + rotation[2][0] * vector[2],
        rotation[0][1] * vector[0] + rotation[1][1] * vector[1] + rotation[2][1] * vector[2],
        rotation[0][2] * vector[0] + rotation[1][2] * vector[1] + rotation[2][2] * vector[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::{dot3, norm3, rotate_into_local_frame, scale3, sub3};
    use crate::domain::Orientation;

    fn assert_close(actual: [f64; 3], expected: [f64; 3]) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < 1.0e-12,
                "axis {axis}: {actual:?} != {expected:?}"
            );
        }
    }

    #[test]
    fn vector_helpers_match_hand_computation() {
        let delta = sub3([1.0, 2.0, 5.0], [1.0, -2.0, 2.0]);
        assert_eq!(delta, [0.0, 4.0, 3.0]);
        assert_eq!(norm3(delta), 5.0);
        assert_eq!(dot3(delta, [1.0, 1.0, 1.0]), 7.0);
        assert_eq!(scale3(delta, 2.0), [0.0, 8.0, 6.0]);
    }

    #[test]
    fn zero_orientation_is_identity() {
        let vector = [0.3, -0.4, -0.866];
        assert_eq!(rotate_into_local_frame(vector, Orientation::default()), vector);
    }

    #[test]
    fn yaw_rotates_horizontal_planes() {
        let orientation = Orientation {
            yaw: 90.0,
            ..Orientation::default()
        };
        // A luminaire yawed by 90° sees world +y along its own +x.
        assert_close(rotate_into_local_frame([0.0, 1.0, 0.0], orientation), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn pitch_tilts_the_nadir() {
        let orientation = Orientation {
            pitch: 90.0,
            ..Orientation::default()
        };
        // Pitching by 90° about y turns the nadir (-z) towards -x.
        assert_close(rotate_into_local_frame([-1.0, 0.0, 0.0], orientation), [0.0, 0.0, -1.0]);
    }
}
