//! Pixel intersection engine
//!
//! Decides whether any opaque texel of one sprite lands on an opaque texel
//! of another. The sprite with fewer texels drives the test: its grid is
//! walked texel by texel while each texel centre is mapped into the other
//! sprite's (the target's) local pixel space and rounded to the nearest
//! target texel.
//!
//! The map from driving to target space is affine, so one step along the
//! driving grid always moves the mapped position by the same vector. The
//! walk therefore only adds vectors after a single setup in [`TexelStepper`].

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use super::bounds::SpriteBounds;
use super::mask::OpacityMask;
use super::transform::SpriteTransform;
use crate::foundation::math::{Point2, Vec2};

/// Which operand of an intersection test an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First operand
    A,
    /// Second operand
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Errors reported by [`try_intersect`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// The stated sprite size differs from the size of its mask
    #[error("Sprite {side} is {width}x{height} but its mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        /// Offending operand
        side: Side,
        /// Stated width
        width: u32,
        /// Stated height
        height: u32,
        /// Mask width
        mask_width: u32,
        /// Mask height
        mask_height: u32,
    },

    /// The sprite's transform cannot be inverted (zero scale or non-finite values)
    #[error("Sprite {side} has a singular transform")]
    SingularTransform {
        /// Offending operand
        side: Side,
    },
}

/// Everything one side of an intersection test needs
#[derive(Debug, Clone, Copy)]
pub struct SpriteCollisionState<'a> {
    /// Local pixel space to world space
    pub transform: SpriteTransform,
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
    /// Opacity mask; `None` never collides
    pub mask: Option<&'a OpacityMask>,
}

impl<'a> SpriteCollisionState<'a> {
    /// State whose dimensions come from the mask
    pub const fn new(transform: SpriteTransform, mask: &'a OpacityMask) -> Self {
        Self {
            transform,
            width: mask.width(),
            height: mask.height(),
            mask: Some(mask),
        }
    }

    /// State with explicitly stated dimensions and an optional mask
    pub const fn with_dimensions(
        transform: SpriteTransform,
        width: u32,
        height: u32,
        mask: Option<&'a OpacityMask>,
    ) -> Self {
        Self {
            transform,
            width,
            height,
            mask,
        }
    }

    /// Number of texels
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// World-space bounds of the sprite's texels
    pub fn bounds(&self) -> SpriteBounds {
        SpriteBounds::of_sprite(&self.transform, self.width, self.height)
    }

    fn check_dimensions(&self, side: Side) -> Result<(), CollisionError> {
        match self.mask {
            Some(mask) if mask.dimensions() != (self.width, self.height) => Err(CollisionError::DimensionMismatch {
                side,
                width: self.width,
                height: self.height,
                mask_width: mask.width(),
                mask_height: mask.height(),
            }),
            _ => Ok(()),
        }
    }

}

/// Incremental mapping of a driving sprite's texel grid into a target
/// sprite's local pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexelStepper {
    origin: Point2,
    step_x: Vec2,
    step_y: Vec2,
}

impl TexelStepper {
    /// Set up the walk of `driving`'s grid through `target`'s local space
    ///
    /// Returns `None` when `target` is singular.
    pub fn between(driving: &SpriteTransform, target: &SpriteTransform) -> Option<Self> {
        let driving_to_target = driving.then(&target.try_inverse()?);
        Some(Self::from_transform(&driving_to_target))
    }

    /// Stepper for an explicit driving-to-target transform
    pub fn from_transform(driving_to_target: &SpriteTransform) -> Self {
        Self {
            origin: driving_to_target.transform_point(&Point2::origin()),
            step_x: driving_to_target.transform_vector(&Vec2::x()),
            step_y: driving_to_target.transform_vector(&Vec2::y()),
        }
    }

    /// Target-space position of driving texel `(0, 0)`
    pub const fn origin(&self) -> Point2 {
        self.origin
    }

    /// Target-space displacement of one step along the driving x axis
    pub const fn step_x(&self) -> Vec2 {
        self.step_x
    }

    /// Target-space displacement of one step along the driving y axis
    pub const fn step_y(&self) -> Vec2 {
        self.step_y
    }

    /// Target-space position of driving texel `(x, y)`, computed directly
    #[allow(clippy::cast_precision_loss)]
    pub fn position_of(&self, x: u32, y: u32) -> Point2 {
        self.origin + self.step_x * x as f32 + self.step_y * y as f32
    }

    /// Walk `width x height` driving texels, calling `visit(x, y, position)`
    /// until it returns `true`. Returns whether a visit stopped the walk.
    pub fn walk<F>(&self, width: u32, height: u32, mut visit: F) -> bool
    where
        F: FnMut(u32, u32, Point2) -> bool,
    {
        let mut row_start = self.origin;
        for y in 0..height {
            let mut position = row_start;
            for x in 0..width {
                if visit(x, y, position) {
                    return true;
                }
                position += self.step_x;
            }
            row_start += self.step_y;
        }
        false
    }
}

fn compare_matrices(a: &SpriteTransform, b: &SpriteTransform) -> Ordering {
    a.matrix()
        .iter()
        .zip(b.matrix().iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Total order used to pick the driving sprite: fewer texels first, with
/// ties broken independently of argument order so the test stays symmetric
fn driving_order(a: &SpriteCollisionState<'_>, b: &SpriteCollisionState<'_>, mask_a: &OpacityMask, mask_b: &OpacityMask) -> Ordering {
    a.area()
        .cmp(&b.area())
        .then_with(|| (a.width, a.height).cmp(&(b.width, b.height)))
        .then_with(|| compare_matrices(&a.transform, &b.transform))
        .then_with(|| mask_a.as_slice().cmp(mask_b.as_slice()))
}

/// Test two sprites for overlapping opaque texels, reporting bad input
///
/// Checks run in order: mask dimensions, then missing masks (`Ok(false)`,
/// not an error). A singular transform only matters on the target side: a
/// collapsed sprite still drives the walk, so when exactly one side is
/// singular the invertible one becomes the target. Two singular sprites
/// report the side that would have been the target.
pub fn try_intersect(a: &SpriteCollisionState<'_>, b: &SpriteCollisionState<'_>) -> Result<bool, CollisionError> {
    a.check_dimensions(Side::A)?;
    b.check_dimensions(Side::B)?;

    let (Some(mask_a), Some(mask_b)) = (a.mask, b.mask) else {
        return Ok(false);
    };

    let a_first = match (a.transform.is_invertible(), b.transform.is_invertible()) {
        (false, true) => true,
        (true, false) => false,
        _ => driving_order(a, b, mask_a, mask_b) != Ordering::Greater,
    };
    let ((driving, driving_mask), (target_side, target, target_mask)) = if a_first {
        ((a, mask_a), (Side::B, b, mask_b))
    } else {
        ((b, mask_b), (Side::A, a, mask_a))
    };

    let Some(stepper) = TexelStepper::between(&driving.transform, &target.transform) else {
        return Err(CollisionError::SingularTransform { side: target_side });
    };

    Ok(stepper.walk(driving.width, driving.height, |x, y, position| {
        driving_mask.is_opaque(x, y)
            && target_mask
                .nearest_texel(&position)
                .is_some_and(|(tx, ty)| target_mask.is_opaque(tx, ty))
    }))
}

/// Test two sprites for overlapping opaque texels
///
/// Missing masks and pairs of singular transforms report no collision.
///
/// # Panics
///
/// Panics when a mask's dimensions differ from the stated sprite size; that
/// is a caller bug, not a runtime condition.
pub fn intersect(a: &SpriteCollisionState<'_>, b: &SpriteCollisionState<'_>) -> bool {
    match try_intersect(a, b) {
        Ok(hit) => hit,
        Err(CollisionError::SingularTransform { side }) => {
            log::trace!("Sprite {side} has a singular transform; reporting no collision");
            false
        }
        Err(err @ CollisionError::DimensionMismatch { .. }) => panic!("{err}"),
    }
}

/// Test two sprites given as transform, size and optional mask
///
/// # Panics
///
/// Panics when a mask's dimensions differ from the stated sprite size.
pub fn intersect_pixels(
    transform_a: &SpriteTransform,
    width_a: u32,
    height_a: u32,
    mask_a: Option<&OpacityMask>,
    transform_b: &SpriteTransform,
    width_b: u32,
    height_b: u32,
    mask_b: Option<&OpacityMask>,
) -> bool {
    intersect(
        &SpriteCollisionState::with_dimensions(*transform_a, width_a, height_a, mask_a),
        &SpriteCollisionState::with_dimensions(*transform_b, width_b, height_b, mask_b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::transform::build_transform;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    fn placed(x: f32, y: f32) -> SpriteTransform {
        build_transform(Vec2::new(x, y), Vec2::zeros(), Vec2::new(1.0, 1.0), 0.0)
    }

    #[test]
    fn test_diagonal_neighbours() {
        let mask = OpacityMask::filled(2, 2, true);
        let a = SpriteCollisionState::new(placed(0.0, 0.0), &mask);

        assert!(intersect(&a, &SpriteCollisionState::new(placed(1.0, 1.0), &mask)));
        assert!(!intersect(&a, &SpriteCollisionState::new(placed(2.0, 2.0), &mask)));
    }

    #[test]
    fn test_eight_argument_signature() {
        let mask = OpacityMask::filled(2, 2, true);
        let a = placed(0.0, 0.0);
        let b = placed(1.0, 1.0);

        assert!(intersect_pixels(&a, 2, 2, Some(&mask), &b, 2, 2, Some(&mask)));
        assert!(!intersect_pixels(&a, 2, 2, None, &b, 2, 2, Some(&mask)));
        assert!(!intersect_pixels(&a, 2, 2, Some(&mask), &b, 2, 2, None));
    }

    #[test]
    fn test_transparent_texels_do_not_collide() {
        // A's only opaque texel is (0, 0); B covers A's (1, 1) only
        let corner = OpacityMask::new(2, 2, vec![true, false, false, false]).unwrap();
        let full = OpacityMask::filled(2, 2, true);

        let a = SpriteCollisionState::new(placed(0.0, 0.0), &corner);
        assert!(!intersect(&a, &SpriteCollisionState::new(placed(1.0, 1.0), &full)));
        assert!(intersect(&a, &SpriteCollisionState::new(placed(-1.0, -1.0), &full)));
    }

    #[test]
    fn test_smaller_sprite_drives() {
        // A 1x1 dot inside a large sprite's hole must not collide, and one
        // on an opaque texel must, whichever order the arguments come in
        let mut texels = vec![true; 100];
        texels[5 + 5 * 10] = false;
        let big = OpacityMask::new(10, 10, texels).unwrap();
        let dot = OpacityMask::filled(1, 1, true);

        let big_state = SpriteCollisionState::new(placed(0.0, 0.0), &big);
        let in_hole = SpriteCollisionState::new(placed(5.0, 5.0), &dot);
        let on_solid = SpriteCollisionState::new(placed(4.0, 5.0), &dot);

        assert!(!intersect(&big_state, &in_hole));
        assert!(!intersect(&in_hole, &big_state));
        assert!(intersect(&big_state, &on_solid));
        assert!(intersect(&on_solid, &big_state));
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let mask = OpacityMask::filled(2, 2, true);
        let good = SpriteCollisionState::new(placed(0.0, 0.0), &mask);
        let bad = SpriteCollisionState::with_dimensions(placed(0.0, 0.0), 3, 2, Some(&mask));

        assert_eq!(
            try_intersect(&good, &bad),
            Err(CollisionError::DimensionMismatch {
                side: Side::B,
                width: 3,
                height: 2,
                mask_width: 2,
                mask_height: 2,
            })
        );
    }

    #[test]
    #[should_panic(expected = "mask is 2x2")]
    fn test_dimension_mismatch_panics() {
        let mask = OpacityMask::filled(2, 2, true);
        let a = placed(0.0, 0.0);
        intersect_pixels(&a, 4, 1, Some(&mask), &a, 2, 2, Some(&mask));
    }

    #[test]
    fn test_singular_transform_policy() {
        let mask = OpacityMask::filled(4, 4, true);
        let good = SpriteCollisionState::new(placed(0.0, 0.0), &mask);
        let flat = SpriteCollisionState::new(
            build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::new(0.0, 1.0), 0.0),
            &mask,
        );
        let point = SpriteCollisionState::new(
            build_transform(Vec2::new(1.0, 1.0), Vec2::zeros(), Vec2::zeros(), 0.0),
            &mask,
        );

        // One collapsed side drives the walk through the invertible one
        assert_eq!(try_intersect(&good, &flat), Ok(true));
        assert_eq!(try_intersect(&flat, &good), Ok(true));

        // With both collapsed there is nothing to map into
        assert!(matches!(try_intersect(&flat, &point), Err(CollisionError::SingularTransform { .. })));
        assert!(matches!(try_intersect(&point, &flat), Err(CollisionError::SingularTransform { .. })));
        assert!(!intersect(&flat, &point));
        assert!(!intersect(&point, &flat));
    }

    #[test]
    fn test_collapsed_bar_hits_solid_sprite() {
        let bar = OpacityMask::filled(3, 1, true);
        let solid = OpacityMask::filled(10, 10, true);
        let big = SpriteCollisionState::new(placed(0.0, 0.0), &solid);

        let collapsed = |scale: Vec2| {
            SpriteCollisionState::new(build_transform(Vec2::new(5.0, 5.0), Vec2::zeros(), scale, 0.0), &bar)
        };
        for scale in [Vec2::zeros(), Vec2::new(1.0, 0.0)] {
            let small = collapsed(scale);
            assert_eq!(try_intersect(&small, &big), Ok(true));
            assert_eq!(try_intersect(&big, &small), Ok(true));
        }

        // Collapsed onto a transparent texel, it still misses
        let mut texels = vec![true; 100];
        texels[5 + 5 * 10] = false;
        let holed = OpacityMask::new(10, 10, texels).unwrap();
        let with_hole = SpriteCollisionState::new(placed(0.0, 0.0), &holed);
        assert!(!intersect(&collapsed(Vec2::zeros()), &with_hole));
        assert!(!intersect(&with_hole, &collapsed(Vec2::zeros())));
    }

    #[test]
    fn test_missing_mask_wins_over_singular_transform() {
        let mask = OpacityMask::filled(2, 2, true);
        let flat = build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::zeros(), 0.0);
        let a = SpriteCollisionState::with_dimensions(flat, 2, 2, None);
        let b = SpriteCollisionState::new(placed(0.0, 0.0), &mask);

        assert_eq!(try_intersect(&a, &b), Ok(false));
    }

    #[test]
    fn test_empty_mask_never_collides() {
        let empty = OpacityMask::filled(0, 0, true);
        let full = OpacityMask::filled(3, 3, true);

        let a = SpriteCollisionState::new(placed(0.0, 0.0), &empty);
        let b = SpriteCollisionState::new(placed(0.0, 0.0), &full);
        assert_eq!(try_intersect(&a, &b), Ok(false));
    }

    #[test]
    fn test_rotated_overlap() {
        // A 1x5 bar rotated a quarter turn about its first texel lies along
        // the y axis, crossing a horizontal bar at (0, 3)
        let bar = OpacityMask::filled(5, 1, true);
        let upright = SpriteCollisionState::new(
            build_transform(Vec2::new(0.0, 0.0), Vec2::zeros(), Vec2::new(1.0, 1.0), HALF_PI),
            &bar,
        );
        let crossing = SpriteCollisionState::new(placed(-2.0, 3.0), &bar);
        let beside = SpriteCollisionState::new(placed(1.0, 3.0), &bar);

        assert!(intersect(&upright, &crossing));
        assert!(!intersect(&upright, &beside));
    }

    #[test]
    fn test_scaled_sprite() {
        // A 2x2 sprite scaled by 4 covers world texels up to about 4; its
        // texel (1, 1) maps to world (4, 4)
        let mask = OpacityMask::new(2, 2, vec![false, false, false, true]).unwrap();
        let dot = OpacityMask::filled(1, 1, true);
        let scaled = SpriteCollisionState::new(
            build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::new(4.0, 4.0), 0.0),
            &mask,
        );

        assert!(intersect(&scaled, &SpriteCollisionState::new(placed(4.0, 4.0), &dot)));
        assert!(!intersect(&scaled, &SpriteCollisionState::new(placed(0.0, 0.0), &dot)));
    }

    #[test]
    fn test_stepper_walk_visits_every_texel_in_order() {
        let stepper = TexelStepper::from_transform(&placed(10.0, 20.0));
        let mut visited = Vec::new();
        let stopped = stepper.walk(3, 2, |x, y, position| {
            visited.push((x, y, position));
            false
        });

        assert!(!stopped);
        assert_eq!(visited.len(), 6);
        assert_eq!((visited[4].0, visited[4].1), (1, 1));
        assert_relative_eq!(visited[4].2, Point2::new(11.0, 21.0), epsilon = 1e-6);
    }

    #[test]
    fn test_stepper_walk_stops_early() {
        let stepper = TexelStepper::from_transform(&SpriteTransform::identity());
        let mut calls = 0;
        assert!(stepper.walk(10, 10, |x, y, _| {
            calls += 1;
            x == 2 && y == 1
        }));
        assert_eq!(calls, 13);
    }
}
