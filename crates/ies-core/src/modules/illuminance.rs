use crate::common::constants::RADDEG;
use crate::domain::{FixturePose, IesData, PhotometricCalculationPoint, PhotometricType, Photometry};
use crate::numerics::{bilinear_interpolate, dot3, norm3, rotate_into_local_frame, scale3, sub3};

const HORIZONTAL_SURFACE_NORMAL: [f64; 3] = [0.0, 0.0, 1.0];

/// Illuminance on a horizontal, upward-facing surface at `point`.
///
/// The horizontal angle is the raw `atan2` bearing in (-180°, 180°]; bearings
/// outside the measured planes clamp to the nearest edge plane.
pub fn calculate_point_illuminance(
    data: &IesData,
    pose: &FixturePose,
    point: [f64; 3],
) -> PhotometricCalculationPoint {
    illuminance_at(data, pose, point, HORIZONTAL_SURFACE_NORMAL, interpolate_candela)
}

/// Illuminance on a surface with the given normal. A zero normal is treated
/// as horizontal. Light arriving from behind the surface contributes nothing.
pub fn calculate_point_illuminance_on_surface(
    data: &IesData,
    pose: &FixturePose,
    point: [f64; 3],
    surface_normal: [f64; 3],
) -> PhotometricCalculationPoint {
    illuminance_at(data, pose, point, surface_normal, interpolate_candela)
}

/// Like [`calculate_point_illuminance`], but Type C tables that cover only
/// part of the circle are mirrored onto the full circle first.
pub fn calculate_point_illuminance_with_symmetry(
    data: &IesData,
    pose: &FixturePose,
    point: [f64; 3],
) -> PhotometricCalculationPoint {
    illuminance_at(
        data,
        pose,
        point,
        HORIZONTAL_SURFACE_NORMAL,
        interpolate_candela_with_symmetry,
    )
}

type CandelaLookup = fn(&Photometry, f64, f64) -> f64;

fn illuminance_at(
    data: &IesData,
    pose: &FixturePose,
    point: [f64; 3],
    surface_normal: [f64; 3],
    lookup: CandelaLookup,
) -> PhotometricCalculationPoint {
    let displacement = sub3(point, pose.position);
    let distance = norm3(displacement);
    if distance == 0.0 {
        return PhotometricCalculationPoint {
            position: point,
            illuminance: 0.0,
            luminance: None,
            direction_to_source: [0.0; 3],
            incident_angle: 0.0,
        };
    }

    let unit = scale3(displacement, 1.0 / distance);
    let local = rotate_into_local_frame(unit, pose.orientation);
    let vertical = (-local[2]).clamp(-1.0, 1.0).acos() * RADDEG;
    let horizontal = local[1].atan2(local[0]) * RADDEG;
    let candela = lookup(data.photometry(), vertical, horizontal);

    let normal_length = norm3(surface_normal);
    let normal = if normal_length == 0.0 {
        HORIZONTAL_SURFACE_NORMAL
    } else {
        scale3(surface_normal, 1.0 / normal_length)
    };
    let toward_source = scale3(unit, -1.0);
    let cosine = dot3(toward_source, normal).clamp(-1.0, 1.0);
    let incident_angle = cosine.acos() * RADDEG;

    let illuminance = if cosine > 0.0 {
        candela / (distance * distance) * cosine
    } else {
        0.0
    };

    PhotometricCalculationPoint {
        position: point,
        illuminance,
        luminance: None,
        direction_to_source: toward_source,
        incident_angle,
    }
}

/// Candela toward `(vertical, horizontal)` degrees in the luminaire frame.
/// Angles outside the table clamp to its edges.
pub fn interpolate_candela(photometry: &Photometry, vertical: f64, horizontal: f64) -> f64 {
    bilinear_interpolate(
        &photometry.vertical_angles,
        &photometry.horizontal_angles,
        &photometry.candela,
        vertical,
        horizontal,
    )
}

/// Candela lookup that first folds Type C horizontal angles onto the
/// measured range, using the symmetry implied by the last horizontal angle
/// (0° axial, 90° quadrant, 180° bilateral). Type A and B angles are passed
/// through unchanged.
pub fn interpolate_candela_with_symmetry(
    photometry: &Photometry,
    vertical: f64,
    horizontal: f64,
) -> f64 {
    let horizontal = match photometry.photometric_type {
        PhotometricType::C => fold_type_c_horizontal(&photometry.horizontal_angles, horizontal),
        PhotometricType::A | PhotometricType::B => horizontal,
    };
    interpolate_candela(photometry, vertical, horizontal)
}

fn fold_type_c_horizontal(angles: &[f64], horizontal: f64) -> f64 {
    let (Some(first), Some(last)) = (angles.first(), angles.last()) else {
        return horizontal;
    };
    let angle = horizontal.rem_euclid(360.0);
    if *first != 0.0 {
        return angle;
    }

    if *last == 0.0 {
        0.0
    } else if *last == 90.0 {
        match angle {
            a if a <= 90.0 => a,
            a if a <= 180.0 => 180.0 - a,
            a if a <= 270.0 => a - 180.0,
            a => 360.0 - a,
        }
    } else if *last == 180.0 && angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}
