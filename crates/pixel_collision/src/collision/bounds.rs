//! World-space bounds for sprites
//!
//! A cheap conservative pre-check before the per-texel test. The pixel test
//! matches a target texel for any mapped position within half a texel of
//! it, so the local rectangle is padded by half a texel on every side before
//! its corners are transformed.

use super::transform::SpriteTransform;
use crate::foundation::math::{Point2, Vec2};

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBounds {
    /// Minimum corner
    pub min: Point2,
    /// Maximum corner
    pub max: Point2,
}

impl SpriteBounds {
    /// Create bounds from min and max corners
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle containing all the points
    ///
    /// An empty iterator yields inverted bounds that intersect nothing.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2>,
    {
        let empty = Self::new(
            Point2::new(f32::INFINITY, f32::INFINITY),
            Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        );
        points.into_iter().fold(empty, |bounds, p| Self {
            min: Point2::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y)),
            max: Point2::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y)),
        })
    }

    /// Bounds of a `width x height` sprite placed by `transform`
    #[allow(clippy::cast_precision_loss)]
    pub fn of_sprite(transform: &SpriteTransform, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::from_points(std::iter::empty());
        }

        let (left, top) = (-0.5, -0.5);
        let (right, bottom) = (width as f32 - 0.5, height as f32 - 0.5);

        Self::from_points(
            [
                Point2::new(left, top),
                Point2::new(right, top),
                Point2::new(left, bottom),
                Point2::new(right, bottom),
            ]
            .iter()
            .map(|corner| transform.transform_point(corner)),
        )
    }

    /// Centre of the rectangle
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether the point lies inside or on the edge
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Whether the rectangles overlap or touch
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x && self.min.y <= other.max.y && self.max.y >= other.min.y
    }
}
