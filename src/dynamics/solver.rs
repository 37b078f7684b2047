//! Fixed-iteration relaxation of chain geometry.
//!
//! Each pass runs one distance sweep followed by one angular sweep.
//! Corrections are Gauss-Seidel: every pair/triple sees the positions
//! already moved earlier in the same sweep. The iteration count is fixed
//! so the per-tick cost is bounded; exact convergence is not required.

use glam::Vec2;

use crate::{config::SimulationConfig, core::particle::Particle};

/// Segments shorter than this are skipped by the angular sweep.
const DEGENERATE_SEGMENT: f32 = 0.001;

/// Geometry quality of a single chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainMetrics {
    pub max_segment_error: f32,
    pub mean_segment_error: f32,
    /// Smallest interior bend angle, or 180 for chains without interior nodes.
    pub min_bend_angle_deg: f32,
    pub centroid: Vec2,
}

/// Aggregate geometry quality across a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverMetrics {
    pub chains: usize,
    pub max_segment_error: f32,
    pub mean_segment_error: f32,
    pub min_bend_angle_deg: f32,
}

impl Default for SolverMetrics {
    fn default() -> Self {
        Self {
            chains: 0,
            max_segment_error: 0.0,
            mean_segment_error: 0.0,
            min_bend_angle_deg: 180.0,
        }
    }
}

impl SolverMetrics {
    pub fn record_chain(&mut self, chain: &ChainMetrics) {
        let total = self.mean_segment_error * self.chains as f32 + chain.mean_segment_error;
        self.chains += 1;
        self.mean_segment_error = total / self.chains as f32;
        self.max_segment_error = self.max_segment_error.max(chain.max_segment_error);
        self.min_bend_angle_deg = self.min_bend_angle_deg.min(chain.min_bend_angle_deg);
    }
}

/// Distance and minimum-bend-angle relaxation solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSolver {
    pub segment_length: f32,
    pub iterations: usize,
    pub min_angle_deg: f32,
    /// Gain on `(dot - cos(min_angle))` when a bend is too sharp.
    pub push_gain: f32,
}

impl ConstraintSolver {
    pub fn new(segment_length: f32, iterations: usize, min_angle_deg: f32) -> Self {
        Self {
            segment_length,
            iterations,
            min_angle_deg,
            push_gain: crate::config::DEFAULT_ANGULAR_PUSH_GAIN,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            segment_length: config.segment_length,
            iterations: config.angular_constraint_iterations,
            min_angle_deg: config.min_angle_deg,
            push_gain: config.angular_push_gain,
        }
    }

    pub fn min_angle_cos(&self) -> f32 {
        self.min_angle_deg.to_radians().cos()
    }

    /// Runs `iterations` passes of distance-then-angle relaxation.
    pub fn relax(&self, particles: &mut [Particle]) {
        for _ in 0..self.iterations {
            self.solve_distances(particles);
            self.solve_angles(particles);
        }
    }

    /// One Gauss-Seidel sweep over adjacent pairs, splitting each correction evenly.
    pub fn solve_distances(&self, particles: &mut [Particle]) {
        for i in 1..particles.len() {
            let delta = particles[i].position - particles[i - 1].position;
            let distance = delta.length();
            if distance == 0.0 {
                continue;
            }

            let correction = (distance - self.segment_length) / distance * 0.5;
            let offset = delta * correction;
            particles[i - 1].position += offset;
            particles[i].position -= offset;
        }
    }

    /// One sweep over interior nodes pushing the outer neighbours of a too-sharp bend apart.
    ///
    /// The middle node is never moved.
    pub fn solve_angles(&self, particles: &mut [Particle]) {
        if particles.len() < 3 {
            return;
        }
        let min_cos = self.min_angle_cos();

        for i in 1..particles.len() - 1 {
            let prev = particles[i - 1].position;
            let curr = particles[i].position;
            let next = particles[i + 1].position;

            let Some(dot) = bend_cosine(prev, curr, next) else {
                continue;
            };
            if dot <= min_cos {
                continue;
            }

            let Some(direction) = (next - prev).try_normalize() else {
                continue;
            };
            let push = direction * (self.push_gain * (dot - min_cos) * self.segment_length);
            particles[i - 1].position -= push;
            particles[i + 1].position += push;
        }
    }

    pub fn measure(&self, particles: &[Particle]) -> ChainMetrics {
        let centroid = centroid(particles);

        let mut max_error = 0.0_f32;
        let mut total_error = 0.0_f32;
        for pair in particles.windows(2) {
            let error = (pair[0].position.distance(pair[1].position) - self.segment_length).abs();
            max_error = max_error.max(error);
            total_error += error;
        }
        let links = particles.len().saturating_sub(1);
        let mean_error = if links == 0 {
            0.0
        } else {
            total_error / links as f32
        };

        let min_angle = particles
            .windows(3)
            .filter_map(|t| bend_cosine(t[0].position, t[1].position, t[2].position))
            .map(|dot| dot.clamp(-1.0, 1.0).acos().to_degrees())
            .fold(180.0_f32, f32::min);

        ChainMetrics {
            max_segment_error: max_error,
            mean_segment_error: mean_error,
            min_bend_angle_deg: min_angle,
            centroid,
        }
    }
}

/// Cosine of the interior angle at `curr`, or `None` for a degenerate segment.
pub fn bend_cosine(prev: Vec2, curr: Vec2, next: Vec2) -> Option<f32> {
    let to_prev = prev - curr;
    let to_next = next - curr;
    let len_prev = to_prev.length();
    let len_next = to_next.length();
    if len_prev < DEGENERATE_SEGMENT || len_next < DEGENERATE_SEGMENT {
        return None;
    }
    Some((to_prev / len_prev).dot(to_next / len_next))
}

/// Arithmetic mean of particle positions (origin for an empty slice).
pub fn centroid(particles: &[Particle]) -> Vec2 {
    if particles.is_empty() {
        return Vec2::ZERO;
    }
    let sum: Vec2 = particles.iter().map(|p| p.position).sum();
    sum / particles.len() as f32
}
