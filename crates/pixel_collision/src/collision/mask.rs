//! Opacity masks
//!
//! An [`OpacityMask`] is the per-texel collision data of a texture: one
//! boolean per texel, `true` where the texture is not fully transparent.
//! Extracting it means reading pixel data back, so build it once per texture
//! at load time and share it by reference (or `Arc`) afterwards.

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Point2;

/// Bytes per texel in an RGBA8 buffer
const RGBA8_STRIDE: usize = 4;

/// Errors raised while building an opacity mask
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The texel count does not match `width * height`
    #[error("Mask of {width}x{height} does not match {len} texels")]
    DimensionMismatch {
        /// Stated width in texels
        width: u32,
        /// Stated height in texels
        height: u32,
        /// Number of texels supplied
        len: usize,
    },

    /// A raw pixel buffer has the wrong byte length
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// `width * height` does not fit in memory
    #[error("Mask of {width}x{height} is too large")]
    TooLarge {
        /// Requested width in texels
        width: u32,
        /// Requested height in texels
        height: u32,
    },
}

/// Options controlling how alpha values become opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    /// A texel is opaque when its alpha is strictly greater than this value.
    /// `0` means "any alpha other than zero".
    pub alpha_threshold: u8,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self { alpha_threshold: 0 }
    }
}

impl MaskOptions {
    /// Whether a texel with the given alpha counts as opaque
    #[inline]
    pub const fn is_opaque(&self, alpha: u8) -> bool {
        alpha > self.alpha_threshold
    }
}

/// Immutable width x height grid of per-texel opacity, row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    texels: Vec<bool>,
}

fn texel_count(width: u32, height: u32) -> Result<usize, MaskError> {
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .ok_or(MaskError::TooLarge { width, height })
}

impl OpacityMask {
    /// Create a mask from row-major texel opacity (`index = x + y * width`)
    pub fn new(width: u32, height: u32, texels: Vec<bool>) -> Result<Self, MaskError> {
        if texels.len() != texel_count(width, height)? {
            return Err(MaskError::DimensionMismatch {
                width,
                height,
                len: texels.len(),
            });
        }

        Ok(Self { width, height, texels })
    }

    /// Create a mask where every texel has the same opacity
    ///
    /// # Panics
    ///
    /// Panics when `width * height` does not fit in `usize`.
    pub fn filled(width: u32, height: u32, opaque: bool) -> Self {
        let count = texel_count(width, height).unwrap_or_else(|err| panic!("{err}"));
        Self {
            width,
            height,
            texels: vec![opaque; count],
        }
    }

    /// Build a mask from one alpha byte per texel
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], options: &MaskOptions) -> Result<Self, MaskError> {
        let expected = texel_count(width, height)?;
        if alpha.len() != expected {
            return Err(MaskError::BufferLength {
                expected,
                actual: alpha.len(),
            });
        }

        let texels = alpha.iter().map(|&a| options.is_opaque(a)).collect();
        Ok(Self::log_built(Self { width, height, texels }))
    }

    /// Build a mask from a row-major RGBA8 buffer (alpha is the fourth byte)
    pub fn from_rgba8(width: u32, height: u32, data: &[u8], options: &MaskOptions) -> Result<Self, MaskError> {
        let expected = texel_count(width, height)?
            .checked_mul(RGBA8_STRIDE)
            .ok_or(MaskError::TooLarge { width, height })?;
        if data.len() != expected {
            return Err(MaskError::BufferLength {
                expected,
                actual: data.len(),
            });
        }

        let texels = data
            .chunks_exact(RGBA8_STRIDE)
            .map(|pixel| options.is_opaque(pixel[3]))
            .collect();
        Ok(Self::log_built(Self { width, height, texels }))
    }

    /// Build a mask from a decoded RGBA image
    pub fn from_image(image: &RgbaImage, options: &MaskOptions) -> Self {
        let (width, height) = image.dimensions();
        let texels = image.pixels().map(|pixel| options.is_opaque(pixel.0[3])).collect();
        Self::log_built(Self { width, height, texels })
    }

    /// Build a mask from an image in any pixel format
    ///
    /// Formats without an alpha channel convert to fully opaque texels.
    pub fn from_dynamic_image(image: &DynamicImage, options: &MaskOptions) -> Self {
        match image {
            DynamicImage::ImageRgba8(rgba) => Self::from_image(rgba, options),
            other => Self::from_image(&other.to_rgba8(), options),
        }
    }

    fn log_built(mask: Self) -> Self {
        log::debug!(
            "Built opacity mask {}x{} ({} of {} texels opaque)",
            mask.width,
            mask.height,
            mask.opaque_count(),
            mask.texels.len()
        );
        mask
    }

    /// Width in texels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in texels
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of texels
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    /// True for a zero-area mask
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// Row-major opacity values
    pub fn as_slice(&self) -> &[bool] {
        &self.texels
    }

    /// Number of opaque texels
    pub fn opaque_count(&self) -> usize {
        self.texels.iter().filter(|&&opaque| opaque).count()
    }

    /// Opacity of texel `(x, y)`; out-of-range texels are transparent
    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.texels[x as usize + y as usize * self.width as usize]
    }

    /// Nearest texel to a point in this mask's local pixel space
    ///
    /// Coordinates round half to even, so `0.5` maps to texel 0 and `1.5`
    /// to texel 2. Returns `None` outside `[0, width) x [0, height)` and for
    /// non-finite points.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn nearest_texel(&self, point: &Point2) -> Option<(u32, u32)> {
        let x = point.x.round_ties_even();
        let y = point.y.round_ties_even();

        // NaN fails every comparison and falls through to None
        if x >= 0.0 && x < self.width as f32 && y >= 0.0 && y < self.height as f32 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }
}
