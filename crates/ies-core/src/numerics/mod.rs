pub mod geometry;
pub mod integration;
pub mod interpolation;

pub use geometry::{dot3, norm3, rotate_into_local_frame, scale3, sub3};
pub use integration::{ZonalSegment, zonal_segments};
pub use interpolation::{AxisBracket, bilinear_interpolate, bracket_axis};
