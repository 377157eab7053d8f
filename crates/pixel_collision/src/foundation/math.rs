//! Math utilities and types
//!
//! Provides the 2D math types used by sprite transforms and collision tests.
//! All 2D affine transforms are homogeneous 3x3 matrices acting on column
//! vectors, so `b * a` applies `a` first.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (homogeneous 2D affine transform)
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat3 with 2D affine helpers
pub trait Mat3Ext {
    /// Create a translation matrix
    fn translation(offset: Vec2) -> Mat3;

    /// Create a non-uniform scaling matrix
    fn scaling(scale: Vec2) -> Mat3;

    /// Create a rotation matrix around the Z axis (counter-clockwise with y up,
    /// clockwise on a y-down screen)
    fn rotation_z(angle: f32) -> Mat3;

    /// Determinant of the upper-left 2x2 (linear) block
    fn linear_determinant(&self) -> f32;
}

impl Mat3Ext for Mat3 {
    fn translation(offset: Vec2) -> Mat3 {
        Mat3::new_translation(&offset)
    }

    fn scaling(scale: Vec2) -> Mat3 {
        Mat3::new_nonuniform_scaling(&scale)
    }

    fn rotation_z(angle: f32) -> Mat3 {
        Mat3::new_rotation(angle)
    }

    fn linear_determinant(&self) -> f32 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}
