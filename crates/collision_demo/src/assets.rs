//! Procedural demo textures
//!
//! Stand-ins for the axe and spike ball artwork, drawn straight into RGBA
//! buffers so the demo needs no files on disk.

use image::{Rgba, RgbaImage};
use pixel_collision::foundation::math::constants::TAU;

use crate::config::{AxeConfig, BallConfig};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const STEEL: Rgba<u8> = Rgba([180, 186, 196, 255]);
const WOOD: Rgba<u8> = Rgba([120, 78, 40, 255]);
const IRON: Rgba<u8> = Rgba([70, 70, 78, 255]);

/// Axe texture: a handle down the middle with a rounded blade at the top.
/// The pivot sits at the bottom of the handle.
#[allow(clippy::cast_precision_loss)]
pub fn axe_texture(config: &AxeConfig) -> RgbaImage {
    let (width, height) = (config.width as f32, config.height as f32);
    let center_x = width / 2.0;
    let handle_half_width = (width * 0.05).max(1.0);
    let blade_center_y = height * 0.2;
    let (blade_rx, blade_ry) = (width / 2.0, height * 0.17);

    RgbaImage::from_fn(config.width, config.height, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        let dx = (px - center_x) / blade_rx;
        let dy = (py - blade_center_y) / blade_ry;
        if dx * dx + dy * dy <= 1.0 {
            STEEL
        } else if (px - center_x).abs() <= handle_half_width && py >= blade_center_y {
            WOOD
        } else {
            TRANSPARENT
        }
    })
}

/// Spike ball texture: a round core with tapered spikes around it
#[allow(clippy::cast_precision_loss)]
pub fn spike_ball_texture(config: &BallConfig) -> RgbaImage {
    let outer = config.core_radius + config.spike_length;
    let size = outer * 2;
    let center = outer as f32;
    let (core, outer) = (config.core_radius as f32, outer as f32);
    let spikes = config.spikes.max(1) as f32;

    RgbaImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 + 0.5 - center, y as f32 + 0.5 - center);
        let r = dx.hypot(dy);
        if r <= core {
            return IRON;
        }
        if r > outer {
            return TRANSPARENT;
        }

        // Distance to the nearest spike axis, in fractions of the spike spacing
        let phase = (dy.atan2(dx) / TAU * spikes).rem_euclid(1.0);
        let off_axis = phase.min(1.0 - phase);
        let taper = (outer - r) / (outer - core);
        if off_axis <= 0.2 * taper {
            IRON
        } else {
            TRANSPARENT
        }
    })
}
