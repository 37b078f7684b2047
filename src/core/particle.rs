use glam::Vec2;

use crate::error::{Result, SimulationError};

/// Point mass advanced with semi-implicit Euler.
///
/// Velocity is the authoritative state; `prev_position` is bookkeeping
/// only and is never used to derive velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub prev_position: Vec2,
    mass: f32,
    inverse_mass: f32,
}

impl Particle {
    /// Unit-mass particle at rest.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            prev_position: position,
            mass: 1.0,
            inverse_mass: 1.0,
        }
    }

    pub fn with_mass(position: Vec2, mass: f32) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            inverse_mass: 1.0 / mass,
            ..Self::new(position)
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Accumulates a force into velocity (`v += f / m`).
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity += force * self.inverse_mass;
    }

    /// Advances position by the current velocity.
    pub fn integrate(&mut self) {
        self.prev_position = self.position;
        self.position += self.velocity;
    }

    /// Moves the particle and its bookkeeping position together.
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
        self.prev_position += offset;
    }
}
