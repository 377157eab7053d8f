//! Demo configuration

use pixel_collision::config::{CollisionConfig, Config};
use pixel_collision::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Fixed-step loop settings
    pub simulation: SimulationConfig,

    /// Swinging axe settings
    pub axe: AxeConfig,

    /// Spike ball settings
    pub ball: BallConfig,

    /// Mask extraction and broad-phase settings
    pub collision: CollisionConfig,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of frames to simulate
    pub frames: u32,

    /// Seconds per frame
    pub timestep: f32,

    /// Seed for the pointer path
    pub seed: u64,

    /// Arena size the pointer wanders in
    pub arena: Vec2,
}

/// Axe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxeConfig {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pivot in texture pixels (the end of the handle)
    pub pivot: Vec2,

    /// World position of the pivot
    pub position: Vec2,

    /// Per-axis scale
    pub scale: Vec2,

    /// Rotation at rest in degrees
    pub rest_angle: f32,

    /// Swing amplitude in degrees
    pub swing_angle: f32,

    /// Swing angular frequency in radians per second
    pub swing_frequency: f32,
}

/// Spike ball configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Radius of the core in pixels
    pub core_radius: u32,

    /// Length of each spike beyond the core in pixels
    pub spike_length: u32,

    /// Number of spikes
    pub spikes: u32,

    /// Spin in radians per second (negative spins counter-clockwise on screen)
    pub spin_speed: f32,

    /// Pointer speed in pixels per second
    pub pointer_speed: f32,

    /// Starting position
    pub start: Vec2,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            axe: AxeConfig::default(),
            ball: BallConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            timestep: 1.0 / 60.0,
            seed: 0x00C0_FFEE,
            arena: Vec2::new(800.0, 480.0),
        }
    }
}

impl Default for AxeConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 340,
            pivot: Vec2::new(60.0, 330.0),
            position: Vec2::new(400.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            rest_angle: 180.0,
            swing_angle: 72.0,
            swing_frequency: 1.0,
        }
    }
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            core_radius: 18,
            spike_length: 12,
            spikes: 8,
            spin_speed: -2.5,
            pointer_speed: 240.0,
            start: Vec2::new(400.0, 340.0),
        }
    }
}

impl Config for DemoConfig {}
