//! Jump particles
//!
//! Purely visual: particles never touch gameplay state and are not scrolled
//! with the world.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::{JUMP_PARTICLES, PARTICLE_GRAVITY, PARTICLE_LIFE};

/// Particle tint
pub const PARTICLE_COLOR: Rgb = [200, 200, 200];

/// A single particle of a jump burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining lifetime in ticks
    pub life: i32,
}

impl Particle {
    /// Spawn a particle at `pos` with a random radius and drift
    pub fn spawn<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-2.0..=0.0)),
            radius: rng.random_range(2..=4) as f32,
            life: PARTICLE_LIFE,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.life -= 1;
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity derived from remaining life (0-255)
    pub fn alpha(&self) -> u8 {
        let t = (self.life as f32 / PARTICLE_LIFE as f32).clamp(0.0, 1.0);
        (255.0 * t) as u8
    }
}

/// Emit the burst that accompanies a jump
pub fn emit_jump_burst<R: Rng + ?Sized>(particles: &mut Vec<Particle>, origin: Vec2, rng: &mut R) {
    particles.extend((0..JUMP_PARTICLES).map(|_| Particle::spawn(origin, rng)));
}

/// Advance all particles and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(Particle::is_alive);
}
