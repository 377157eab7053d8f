//! Sprite colliders and a brute-force broad phase
//!
//! A [`PixelCollider`] ties a shared opacity mask to a sprite's current
//! transform and world bounds. The game loop calls
//! [`PixelCollider::set_placement`] whenever the sprite moves; tests then
//! reject far-apart pairs on bounds before walking any texels.

use super::bounds::SpriteBounds;
use super::mask::OpacityMask;
use super::pixel::{intersect, SpriteCollisionState};
use super::transform::{SpritePlacement, SpriteTransform};
use crate::config::CollisionConfig;

/// Collision pair reported by [`find_colliding_pairs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Index of the first collider (always the smaller index)
    pub first: usize,
    /// Index of the second collider
    pub second: usize,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller index first)
    pub const fn new(a: usize, b: usize) -> Self {
        if a < b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// A sprite ready for pixel collision tests
#[derive(Debug, Clone)]
pub struct PixelCollider<'a> {
    mask: &'a OpacityMask,
    transform: SpriteTransform,
    bounds: SpriteBounds,
}

impl<'a> PixelCollider<'a> {
    /// Create a collider for a mask at the given placement
    pub fn new(mask: &'a OpacityMask, placement: &SpritePlacement) -> Self {
        Self::from_transform(mask, placement.to_transform())
    }

    /// Create a collider from an already built transform
    pub fn from_transform(mask: &'a OpacityMask, transform: SpriteTransform) -> Self {
        let bounds = SpriteBounds::of_sprite(&transform, mask.width(), mask.height());
        Self { mask, transform, bounds }
    }

    /// Rebuild the transform and bounds after the sprite moved
    pub fn set_placement(&mut self, placement: &SpritePlacement) {
        self.transform = placement.to_transform();
        self.bounds = SpriteBounds::of_sprite(&self.transform, self.mask.width(), self.mask.height());
    }

    /// The sprite's opacity mask
    pub const fn mask(&self) -> &'a OpacityMask {
        self.mask
    }

    /// Current local-to-world transform
    pub const fn transform(&self) -> &SpriteTransform {
        &self.transform
    }

    /// Current world bounds
    pub const fn bounds(&self) -> &SpriteBounds {
        &self.bounds
    }

    /// One side of a pixel intersection test
    pub fn state(&self) -> SpriteCollisionState<'a> {
        SpriteCollisionState::new(self.transform, self.mask)
    }

    /// Bounds check followed by the pixel test
    pub fn collides_with(&self, other: &PixelCollider<'_>) -> bool {
        self.bounds.intersects(&other.bounds) && self.collides_with_pixels(other)
    }

    /// Pixel test without the bounds check
    pub fn collides_with_pixels(&self, other: &PixelCollider<'_>) -> bool {
        intersect(&self.state(), &other.state())
    }
}

/// Test every pair of colliders once
pub fn find_colliding_pairs(colliders: &[PixelCollider<'_>], config: &CollisionConfig) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    let mut pixel_tests = 0usize;

    for (i, a) in colliders.iter().enumerate() {
        for (j, b) in colliders.iter().enumerate().skip(i + 1) {
            if config.bounds_precheck && !a.bounds.intersects(&b.bounds) {
                continue;
            }
            pixel_tests += 1;
            if a.collides_with_pixels(b) {
                pairs.push(CollisionPair::new(i, j));
            }
        }
    }

    log::debug!(
        "Broad phase: {} colliders, {} pixel tests, {} colliding pairs",
        colliders.len(),
        pixel_tests,
        pairs.len()
    );
    pairs
}
