use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::{config::SimulationConfig, core::particle::Particle, dynamics::flow::FlowField};

/// Per-tick values shared by every force generator.
#[derive(Debug, Clone, Copy)]
pub struct ForceContext {
    pub time: f64,
    pub flow_intensity: f32,
}

/// Trait describing a per-particle velocity update applied every tick.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, particle: &mut Particle, ctx: &ForceContext, rng: &mut dyn RngCore);
}

/// Zero-mean white-noise kick in a uniformly random direction.
pub struct BrownianForce {
    pub scale: f32,
}

impl ForceGenerator for BrownianForce {
    fn apply(&self, particle: &mut Particle, _ctx: &ForceContext, rng: &mut dyn RngCore) {
        let angle = rng.gen::<f32>() * TAU;
        let magnitude = self.scale * (rng.gen::<f32>() - 0.5);
        particle.velocity += Vec2::from_angle(angle) * magnitude;
    }
}

/// Drag toward the ambient flow velocity (exponential approach, not a force add).
pub struct FlowDrag {
    pub field: FlowField,
    pub coupling_factor: f32,
}

impl ForceGenerator for FlowDrag {
    fn apply(&self, particle: &mut Particle, ctx: &ForceContext, _rng: &mut dyn RngCore) {
        let flow = self
            .field
            .velocity(particle.position, ctx.time, ctx.flow_intensity);
        particle.velocity += (flow - particle.velocity) * self.coupling_factor;
    }
}

/// Multiplicative velocity friction.
pub struct Damping {
    pub friction: f32,
}

impl ForceGenerator for Damping {
    fn apply(&self, particle: &mut Particle, _ctx: &ForceContext, _rng: &mut dyn RngCore) {
        particle.velocity *= self.friction;
    }
}

/// Ordered collection of force generators; order of insertion is order of application.
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    /// Brownian kick, then flow drag, then damping.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut registry = Self::new();
        registry.add_force(BrownianForce {
            scale: config.brownian_force_scale,
        });
        registry.add_force(FlowDrag {
            field: FlowField::new(config.flow, config.height),
            coupling_factor: config.coupling_factor,
        });
        registry.add_force(Damping {
            friction: config.friction,
        });
        registry
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Runs every generator on one particle, in order.
    pub fn apply_to(&self, particle: &mut Particle, ctx: &ForceContext, rng: &mut dyn RngCore) {
        for force in &self.forces {
            force.apply(particle, ctx, rng);
        }
    }
}
