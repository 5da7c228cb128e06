//! Decorative particle bursts
//!
//! Particles live in surface pixel space, not grid space. They have no effect
//! on the game: the controller spawns a burst when food is eaten and advances
//! the live set once per tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Cell, Grid};

/// Tunables for particle bursts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles spawned per burst
    pub burst_size: usize,
    /// Alpha lost per tick
    pub fade_rate: f32,
    /// Smallest radius (inclusive)
    pub min_radius: f32,
    /// Largest radius (exclusive)
    pub max_radius: f32,
    /// Each velocity component is drawn from `[-max_speed, max_speed]`
    pub max_speed: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_size: 10,
            fade_rate: 0.03,
            min_radius: 1.0,
            max_radius: 4.0,
            max_speed: 2.5,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fade_rate > 0.0 && self.fade_rate.is_finite()) {
            return Err(format!(
                "particles.fade_rate must be positive, got {}",
                self.fade_rate
            ));
        }

        if !(self.min_radius >= 0.0 && self.min_radius < self.max_radius)
            || !self.max_radius.is_finite()
        {
            return Err(format!(
                "particles radius range [{}, {}) is empty or invalid",
                self.min_radius, self.max_radius
            ));
        }

        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(format!(
                "particles.max_speed must be non-negative, got {}",
                self.max_speed
            ));
        }

        Ok(())
    }

    /// Ticks until a freshly spawned particle has faded out
    pub fn lifetime_ticks(&self) -> u32 {
        (1.0 / self.fade_rate).ceil() as u32
    }
}

/// Hue on the colour wheel, drawn at full saturation and half lightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hue(pub f32);

impl Hue {
    /// sRGB components of `hsl(hue, 100%, 50%)`
    pub fn rgb(&self) -> (u8, u8, u8) {
        hsl_to_rgb(self.0, 1.0, 0.5)
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

/// A single short-lived particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hue: Hue,
    /// Opacity in `(0, 1]` while alive
    pub alpha: f32,
    pub velocity: (f32, f32),
}

impl Particle {
    /// The particle one tick later, or `None` once it has faded out
    pub fn advanced(mut self, fade_rate: f32) -> Option<Particle> {
        self.x += self.velocity.0;
        self.y += self.velocity.1;
        self.alpha -= fade_rate;
        (self.alpha > 0.0).then_some(self)
    }

    /// Colour pre-multiplied by alpha against a black background
    pub fn faded_rgb(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.hue.rgb();
        let scale = |v: u8| (v as f32 * self.alpha.clamp(0.0, 1.0)).round() as u8;
        (scale(r), scale(g), scale(b))
    }
}

/// Spawn one burst centred on the pixel midpoint of `cell`
pub fn spawn_burst<R: Rng>(
    cell: Cell,
    grid: &Grid,
    config: &ParticleConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let (cx, cy) = grid.cell_center(cell);
    let speed = config.max_speed;

    (0..config.burst_size)
        .map(|_| Particle {
            x: cx,
            y: cy,
            radius: rng.gen_range(config.min_radius..config.max_radius),
            hue: Hue(rng.gen_range(0.0..360.0)),
            alpha: 1.0,
            velocity: (
                rng.gen_range(-speed..=speed),
                rng.gen_range(-speed..=speed),
            ),
        })
        .collect()
}

/// Advance every particle by one tick, dropping those that faded out.
///
/// Each particle is judged on its own; a dead particle early in the input
/// does not cut off the ones after it.
pub fn advance(
    particles: impl IntoIterator<Item = Particle>,
    fade_rate: f32,
) -> impl Iterator<Item = Particle> {
    particles
        .into_iter()
        .filter_map(move |particle| particle.advanced(fade_rate))
}

/// The live particle set, replaced wholesale every tick
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    config: ParticleConfig,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
        }
    }

    pub fn spawn_burst<R: Rng>(&mut self, cell: Cell, grid: &Grid, rng: &mut R) {
        let burst = spawn_burst(cell, grid, &self.config, rng);
        self.particles.extend(burst);
    }

    pub fn advance(&mut self) {
        let current = std::mem::take(&mut self.particles);
        self.particles = advance(current, self.config.fade_rate).collect();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
