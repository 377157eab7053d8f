//! Pixel-accurate sprite collision
//!
//! Sprites are tested by their opaque texels rather than their rectangles.
//!
//! # Pipeline
//!
//! 1. **Load time**: one [`OpacityMask`] per texture, built from its alpha data
//! 2. **Every change**: [`build_transform`] places the sprite's pixel grid in world space
//! 3. **Per test**: [`SpriteBounds`] pre-check, then [`intersect`] walks the
//!    smaller sprite's texels through the other sprite's local space
//!
//! # Module Organization
//!
//! - [`mask`] - Opacity masks and their extraction from pixel data
//! - [`transform`] - Sprite transforms and placements
//! - [`pixel`] - The per-texel intersection engine
//! - [`bounds`] - World-space bounds for cheap rejection
//! - [`collider`] - Colliders and a brute-force broad phase

pub mod bounds;
pub mod collider;
pub mod mask;
pub mod pixel;
pub mod transform;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use bounds::SpriteBounds;
pub use collider::{find_colliding_pairs, CollisionPair, PixelCollider};
pub use mask::{MaskError, MaskOptions, OpacityMask};
pub use pixel::{intersect, intersect_pixels, try_intersect, CollisionError, Side, SpriteCollisionState, TexelStepper};
pub use transform::{build_transform, SpritePlacement, SpriteTransform};
