//! Demo scene: a swinging axe and a spike ball chasing a wandering pointer

use pixel_collision::collision::{OpacityMask, PixelCollider, SpritePlacement};
use pixel_collision::foundation::math::utils::{deg_to_rad, rad_to_deg};
use pixel_collision::foundation::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets;
use crate::config::DemoConfig;

/// A sprite with its cached collision mask
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Name used in log output
    pub name: &'static str,
    /// Opacity mask, built once from the texture
    pub mask: OpacityMask,
    /// Current placement, updated every frame
    pub placement: SpritePlacement,
}

impl Sprite {
    /// Collider for the current placement
    pub fn collider(&self) -> PixelCollider<'_> {
        PixelCollider::new(&self.mask, &self.placement)
    }
}

/// Stand-in for the mouse: wanders between random points in the arena
#[derive(Debug, Clone)]
struct Pointer {
    position: Vec2,
    target: Vec2,
    speed: f32,
    arena: Vec2,
    rng: StdRng,
}

impl Pointer {
    fn new(start: Vec2, speed: f32, arena: Vec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let target = Self::random_point(&mut rng, arena);
        Self {
            position: start,
            target,
            speed,
            arena,
            rng,
        }
    }

    fn random_point(rng: &mut StdRng, arena: Vec2) -> Vec2 {
        Vec2::new(
            rng.gen_range(0.0..=arena.x.max(0.0)),
            rng.gen_range(0.0..=arena.y.max(0.0)),
        )
    }

    fn update(&mut self, delta_time: f32) {
        let to_target = self.target - self.position;
        let step = self.speed * delta_time;

        if to_target.norm() <= step {
            self.position = self.target;
            self.target = Self::random_point(&mut self.rng, self.arena);
        } else {
            self.position += to_target.normalize() * step;
        }
    }
}

/// Totals of a simulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u32,
    /// Frames in which the sprites overlapped
    pub colliding_frames: u32,
    /// Number of times the sprites started touching
    pub contacts: u32,
}

/// The demo scene
#[derive(Debug, Clone)]
pub struct Scene {
    config: DemoConfig,
    /// The swinging axe
    pub axe: Sprite,
    /// The spike ball following the pointer
    pub ball: Sprite,
    pointer: Pointer,
    elapsed: f32,
    colliding: bool,
}

impl Scene {
    /// Build textures and masks and place both sprites at rest
    pub fn new(config: &DemoConfig) -> Self {
        let mask_options = config.collision.mask;

        let axe_mask = OpacityMask::from_image(&assets::axe_texture(&config.axe), &mask_options);
        let axe = Sprite {
            name: "axe",
            mask: axe_mask,
            placement: SpritePlacement {
                position: config.axe.position,
                origin: config.axe.pivot,
                scale: config.axe.scale,
                rotation: deg_to_rad(config.axe.rest_angle),
            },
        };

        let ball_image = assets::spike_ball_texture(&config.ball);
        let (ball_width, ball_height) = ball_image.dimensions();
        let ball_mask = OpacityMask::from_image(&ball_image, &mask_options);
        #[allow(clippy::cast_precision_loss)]
        let ball = Sprite {
            name: "spike ball",
            mask: ball_mask,
            placement: SpritePlacement {
                position: config.ball.start,
                origin: Vec2::new(ball_width as f32 / 2.0, ball_height as f32 / 2.0),
                ..SpritePlacement::default()
            },
        };

        log::info!(
            "Scene ready: {} mask {}x{}, {} mask {}x{}",
            axe.name,
            axe.mask.width(),
            axe.mask.height(),
            ball.name,
            ball.mask.width(),
            ball.mask.height()
        );

        let pointer = Pointer::new(
            config.ball.start,
            config.ball.pointer_speed,
            config.simulation.arena,
            config.simulation.seed,
        );

        Self {
            config: config.clone(),
            axe,
            ball,
            pointer,
            elapsed: 0.0,
            colliding: false,
        }
    }

    /// Seconds simulated so far
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance animation and movement by one step
    pub fn update(&mut self, delta_time: f32) {
        self.elapsed += delta_time;

        let axe = &self.config.axe;
        self.axe.placement.rotation =
            deg_to_rad(axe.rest_angle + axe.swing_angle * (axe.swing_frequency * self.elapsed).sin());

        self.ball.placement.rotation += self.config.ball.spin_speed * delta_time;
        self.pointer.update(delta_time);
        self.ball.placement.position = self.pointer.position;
    }

    /// Test the sprites at their current placements
    pub fn sprites_collide(&self) -> bool {
        self.axe.collider().collides_with(&self.ball.collider())
    }

    /// Run the configured number of frames, logging contact changes
    pub fn run(&mut self) -> RunSummary {
        let timestep = self.config.simulation.timestep;
        let mut summary = RunSummary::default();

        for frame in 0..self.config.simulation.frames {
            self.update(timestep);
            let colliding = self.sprites_collide();

            if colliding && !self.colliding {
                summary.contacts += 1;
                log::info!(
                    "Frame {frame} (t={:.2}s): {} at {:.1}° hits {} at ({:.1}, {:.1})",
                    self.elapsed,
                    self.axe.name,
                    rad_to_deg(self.axe.placement.rotation),
                    self.ball.name,
                    self.ball.placement.position.x,
                    self.ball.placement.position.y
                );
            } else if !colliding && self.colliding {
                log::debug!("Frame {frame} (t={:.2}s): sprites clear", self.elapsed);
            }

            self.colliding = colliding;
            summary.frames += 1;
            summary.colliding_frames += u32::from(colliding);
        }

        summary
    }
}
