pub mod particle;

pub use particle::{advance, spawn_burst, Hue, Particle, ParticleConfig, ParticleSystem};
