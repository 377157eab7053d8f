//! Sprite transforms
//!
//! A sprite's local pixel space has its origin at the texture's top-left
//! corner with x to the right and y down. [`build_transform`] places that
//! grid in world space: the pivot (`origin`) moves to zero, the grid is
//! scaled and rotated about it, then moved to `position`.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat3, Mat3Ext, Point2, Vec2};

/// Linear parts with a smaller absolute determinant are treated as singular
pub const SINGULAR_DETERMINANT_EPSILON: f32 = 1e-10;

/// Affine transform from a sprite's local pixel space into world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteTransform {
    matrix: Mat3,
}

impl Default for SpriteTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SpriteTransform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Mat3::identity(),
        }
    }

    /// Wrap a homogeneous 3x3 matrix (column vectors, last row `0 0 1`)
    pub const fn from_matrix(matrix: Mat3) -> Self {
        Self { matrix }
    }

    /// The underlying homogeneous matrix
    pub const fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Transform a point, including translation
    #[inline]
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        self.matrix.transform_point(point)
    }

    /// Transform a direction, ignoring translation
    #[inline]
    pub fn transform_vector(&self, vector: &Vec2) -> Vec2 {
        self.matrix.transform_vector(vector)
    }

    /// Compose two transforms: `self` is applied first, then `next`
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Determinant of the linear (rotation and scale) part
    pub fn determinant(&self) -> f32 {
        self.matrix.linear_determinant()
    }

    /// False when the transform collapses the plane (zero scale) or holds
    /// non-finite values
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > SINGULAR_DETERMINANT_EPSILON
    }

    /// The inverse transform, or `None` if the transform is singular
    pub fn try_inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        self.matrix.try_inverse().map(Self::from_matrix)
    }
}

/// Build the world transform for a sprite
///
/// Order is fixed: translate by `-origin`, scale, rotate about the (now
/// zero) origin, translate to `position`. `rotation` is in radians.
pub fn build_transform(position: Vec2, origin: Vec2, scale: Vec2, rotation: f32) -> SpriteTransform {
    let matrix = Mat3::translation(position)
        * Mat3::rotation_z(rotation)
        * Mat3::scaling(scale)
        * Mat3::translation(-origin);

    SpriteTransform::from_matrix(matrix)
}

/// Kinematic state of a sprite as owned by the game loop
///
/// Rebuild the transform with [`SpritePlacement::to_transform`] whenever a
/// field changes; nothing is cached here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpritePlacement {
    /// World position of the pivot
    pub position: Vec2,
    /// Pivot in local pixel coordinates
    pub origin: Vec2,
    /// Per-axis scale
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl Default for SpritePlacement {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            origin: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl SpritePlacement {
    /// Placement at a position with default origin, scale and rotation
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Build the world transform
    pub fn to_transform(&self) -> SpriteTransform {
        build_transform(self.position, self.origin, self.scale, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_inputs_give_identity() {
        let t = build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::new(1.0, 1.0), 0.0);
        assert_relative_eq!(*t.matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_origin_maps_to_position() {
        let t = build_transform(Vec2::new(400.0, 0.0), Vec2::new(243.0, 679.0), Vec2::new(0.5, 0.5), 1.3);
        let pivot = t.transform_point(&Point2::new(243.0, 679.0));
        assert_relative_eq!(pivot, Point2::new(400.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_composition_order() {
        // Scale first, then rotate a quarter turn, then translate
        let t = build_transform(Vec2::new(10.0, 20.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 3.0), HALF_PI);

        // (3, 0) -> (2, 0) -> (4, 0) -> (0, 4) -> (10, 24)
        assert_relative_eq!(t.transform_point(&Point2::new(3.0, 0.0)), Point2::new(10.0, 24.0), epsilon = EPSILON);
        // (1, 1) -> (0, 1) -> (0, 3) -> (-3, 0) -> (7, 20)
        assert_relative_eq!(t.transform_point(&Point2::new(1.0, 1.0)), Point2::new(7.0, 20.0), epsilon = EPSILON);
    }

    #[test]
    fn test_order_does_not_commute() {
        let scale = Vec2::new(2.0, 1.0);
        let built = build_transform(Vec2::zeros(), Vec2::new(5.0, 0.0), scale, 0.0);
        let swapped = SpriteTransform::from_matrix(Mat3::translation(Vec2::new(-5.0, 0.0)) * Mat3::scaling(scale));

        let p = Point2::new(5.0, 0.0);
        assert_relative_eq!(built.transform_point(&p), Point2::new(0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(swapped.transform_point(&p), Point2::new(5.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let t = build_transform(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), PI);
        assert_relative_eq!(t.transform_vector(&Vec2::new(1.0, 0.0)), Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_then_applies_receiver_first() {
        let move_right = SpriteTransform::from_matrix(Mat3::translation(Vec2::new(1.0, 0.0)));
        let double = SpriteTransform::from_matrix(Mat3::scaling(Vec2::new(2.0, 2.0)));

        let p = Point2::new(1.0, 1.0);
        assert_relative_eq!(move_right.then(&double).transform_point(&p), Point2::new(4.0, 2.0), epsilon = EPSILON);
        assert_relative_eq!(double.then(&move_right).transform_point(&p), Point2::new(3.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = build_transform(Vec2::new(-3.0, 8.0), Vec2::new(4.0, 4.0), Vec2::new(1.5, 0.25), 0.7);
        let inverse = t.try_inverse().expect("transform is invertible");

        let p = Point2::new(12.0, -7.5);
        assert_relative_eq!(inverse.transform_point(&t.transform_point(&p)), p, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_scale_is_singular() {
        let flat = build_transform(Vec2::new(1.0, 1.0), Vec2::zeros(), Vec2::new(0.0, 1.0), 0.3);
        assert!(!flat.is_invertible());
        assert!(flat.try_inverse().is_none());

        let nan = build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::new(f32::NAN, 1.0), 0.0);
        assert!(nan.try_inverse().is_none());
    }

    #[test]
    fn test_placement_defaults() {
        let placement = SpritePlacement::at(Vec2::new(2.0, 3.0));
        assert_eq!(placement.scale, Vec2::new(1.0, 1.0));
        assert_relative_eq!(
            placement.to_transform().transform_point(&Point2::origin()),
            Point2::new(2.0, 3.0),
            epsilon = EPSILON
        );
    }
}
