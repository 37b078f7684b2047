use std::f32::consts::{FRAC_PI_6, TAU};

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::{
    core::{
        particle::Particle,
        types::{ChainColor, Domain},
    },
    dynamics::{
        forces::{ForceContext, ForceRegistry},
        solver::{centroid, ChainMetrics, ConstraintSolver},
    },
};

/// A polymer: an ordered run of particles that exclusively belong to it.
///
/// Particle count is fixed for the lifetime of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    particles: Vec<Particle>,
    color: ChainColor,
}

impl Chain {
    pub fn new(particles: Vec<Particle>, color: ChainColor) -> Self {
        Self { particles, color }
    }

    /// Lays out `segment_count` particles from `anchor`, `segment_length` apart.
    ///
    /// The heading starts uniformly random and turns by at most 30 degrees
    /// per node, so freshly spawned chains never violate a bend minimum of
    /// 90 degrees or less.
    pub fn spawn<R: Rng + ?Sized>(
        anchor: Vec2,
        segment_count: usize,
        segment_length: f32,
        color: ChainColor,
        rng: &mut R,
    ) -> Self {
        let mut particles = Vec::with_capacity(segment_count);
        let mut heading = rng.gen::<f32>() * TAU;
        let mut cursor = anchor;

        for i in 0..segment_count {
            if i > 0 {
                heading += rng.gen_range(-FRAC_PI_6..=FRAC_PI_6);
                cursor += Vec2::from_angle(heading) * segment_length;
            }
            particles.push(Particle::new(cursor));
        }

        Self { particles, color }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Ordered particle positions for rendering.
    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn color(&self) -> ChainColor {
        self.color
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn centroid(&self) -> Vec2 {
        centroid(&self.particles)
    }

    /// Largest distance between any two particles.
    pub fn extent(&self) -> f32 {
        let mut extent = 0.0_f32;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                extent = extent.max(a.position.distance(b.position));
            }
        }
        extent
    }

    /// Applies every force to each particle in order, integrating it immediately after.
    pub fn apply_forces(
        &mut self,
        forces: &ForceRegistry,
        ctx: &ForceContext,
        rng: &mut dyn RngCore,
    ) {
        for particle in &mut self.particles {
            forces.apply_to(particle, ctx, rng);
            particle.integrate();
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        for particle in &mut self.particles {
            particle.translate(offset);
        }
    }

    /// Shifts the whole chain by one period when its centroid leaves the
    /// domain plus `margin`. Returns whether a wrap happened.
    pub fn wrap(&mut self, domain: Domain, margin: f32) -> bool {
        let offset = domain.wrap_offset(self.centroid(), margin);
        if offset == Vec2::ZERO {
            return false;
        }
        self.translate(offset);
        true
    }

    pub fn relax(&mut self, solver: &ConstraintSolver) {
        solver.relax(&mut self.particles);
    }

    /// Force/integrate/wrap phase of a tick. Returns whether the chain wrapped.
    pub fn advance_dynamics(
        &mut self,
        forces: &ForceRegistry,
        ctx: &ForceContext,
        domain: Domain,
        margin: f32,
        rng: &mut dyn RngCore,
    ) -> bool {
        self.apply_forces(forces, ctx, rng);
        let wrapped = self.wrap(domain, margin);
        if wrapped {
            log::trace!("chain wrapped to centroid {:?}", self.centroid());
        }
        wrapped
    }

    pub fn measure(&self, solver: &ConstraintSolver) -> ChainMetrics {
        solver.measure(&self.particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn spawn_respects_length_and_angle() {
        let mut rng = SmallRng::seed_from_u64(11);
        let chain = Chain::spawn(Vec2::new(50.0, 50.0), 12, 4.0, ChainColor(1), &mut rng);
        let solver = ConstraintSolver::new(4.0, 0, 90.0);
        let metrics = chain.measure(&solver);

        assert_eq!(chain.len(), 12);
        assert_eq!(chain.particles()[0].position, Vec2::new(50.0, 50.0));
        assert!(metrics.max_segment_error < 1e-3);
        assert!(metrics.min_bend_angle_deg >= 150.0 - 1e-2);
    }

    #[test]
    fn extent_of_straight_chain() {
        let particles = (0..4)
            .map(|i| Particle::new(Vec2::new(i as f32 * 2.0, 0.0)))
            .collect();
        let chain = Chain::new(particles, ChainColor(0));
        assert!((chain.extent() - 6.0).abs() < 1e-6);
    }
}
