//! # Pixel Collision
//!
//! Pixel-accurate collision detection between rotated, scaled and translated
//! 2D sprites, using per-texel opacity masks instead of bounding boxes.
//!
//! ## Features
//!
//! - **Transform Builder**: origin, scale, rotation and position composed into one affine matrix
//! - **Opacity Masks**: built once per texture from alpha data, shared read-only afterwards
//! - **Pixel Intersection**: walks the smaller sprite's grid in the other sprite's local space
//! - **Bounds Pre-check**: cheap world-space rectangles to skip pairs that cannot touch
//!
//! ## Quick Start
//!
//! ```rust
//! use pixel_collision::prelude::*;
//!
//! let mask = OpacityMask::filled(2, 2, true);
//!
//! let a = build_transform(Vec2::zeros(), Vec2::zeros(), Vec2::new(1.0, 1.0), 0.0);
//! let b = build_transform(Vec2::new(1.0, 1.0), Vec2::zeros(), Vec2::new(1.0, 1.0), 0.0);
//!
//! assert!(intersect_pixels(&a, 2, 2, Some(&mask), &b, 2, 2, Some(&mask)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod config;
pub mod foundation;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        collision::{
            bounds::SpriteBounds,
            collider::{find_colliding_pairs, CollisionPair, PixelCollider},
            mask::{MaskError, MaskOptions, OpacityMask},
            pixel::{intersect, intersect_pixels, try_intersect, CollisionError, Side, SpriteCollisionState},
            transform::{build_transform, SpritePlacement, SpriteTransform},
        },
        config::{CollisionConfig, Config, ConfigError},
        foundation::math::{Mat3, Point2, Vec2},
    };
}
