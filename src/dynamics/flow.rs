//! Ambient flow field: drift, turbulence and a linear shear-alignment term.

use glam::Vec2;

use crate::{config::FlowParams, core::types::Domain};

/// Upper bound on samples a single grid request may produce.
pub const MAX_GRID_SAMPLES: usize = 1 << 22;

/// One sample of the flow field, used by visualization consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSample {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Stateless flow velocity as a function of position, time and intensity.
///
/// The particle pass and the visualization grid share [`FlowField::evaluate`]
/// and differ only in the turbulence gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowField {
    pub params: FlowParams,
    /// Domain height; the shear term vanishes at `height / 2`.
    pub height: f32,
}

impl FlowField {
    pub fn new(params: FlowParams, height: f32) -> Self {
        Self { params, height }
    }

    /// Flow velocity driving particle drag.
    pub fn velocity(&self, position: Vec2, time: f64, intensity: f32) -> Vec2 {
        self.evaluate(position, time, intensity, self.params.force_gain)
    }

    /// Flow velocity at the lower gain used for the visualization grid.
    pub fn visual_velocity(&self, position: Vec2, time: f64, intensity: f32) -> Vec2 {
        self.evaluate(position, time, intensity, self.params.visual_gain)
    }

    /// Evaluates the field with an explicit turbulence gain.
    ///
    /// Phase terms are computed in `f64` so long-running simulations keep
    /// a precise time argument.
    pub fn evaluate(&self, position: Vec2, time: f64, intensity: f32, gain: f32) -> Vec2 {
        let px = f64::from(position.x);
        let py = f64::from(position.y);
        let scale = f64::from(self.params.spatial_scale);
        let turbulence = f64::from(intensity) * f64::from(gain);

        let shear = f64::from(intensity) / 100.0
            * (py - f64::from(self.height) * 0.5)
            * f64::from(self.params.shear_coefficient);

        let vx = f64::from(self.params.drift_speed)
            + turbulence * ((py * scale + time).sin() + (px * scale * 0.5 + time * 0.7).cos())
            + shear;
        let vy = turbulence * ((px * scale - time * 0.5).sin() + (py * scale * 0.5 + time).cos());

        Vec2::new(vx as f32, vy as f32)
    }

    /// Samples the visualization field on a regular grid covering `domain`.
    ///
    /// Samples sit at cell centers, row-major from the top-left. A
    /// non-positive spacing, or one so fine the grid would exceed
    /// [`MAX_GRID_SAMPLES`], yields no samples.
    pub fn sample_grid(
        &self,
        domain: Domain,
        spacing: f32,
        time: f64,
        intensity: f32,
    ) -> Vec<FlowSample> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Vec::new();
        }

        let columns = (domain.width / spacing).ceil() as usize;
        let rows = (domain.height / spacing).ceil() as usize;
        let count = match columns.checked_mul(rows) {
            Some(count) if count <= MAX_GRID_SAMPLES => count,
            _ => {
                log::warn!("flow grid spacing {spacing} too fine for {columns}x{rows} cells");
                return Vec::new();
            }
        };
        let mut samples = Vec::with_capacity(count);

        for row in 0..rows {
            for column in 0..columns {
                let position = Vec2::new(
                    (column as f32 + 0.5) * spacing,
                    (row as f32 + 0.5) * spacing,
                );
                samples.push(FlowSample {
                    position,
                    velocity: self.visual_velocity(position, time, intensity),
                });
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FlowField {
        FlowField::new(FlowParams::default(), 800.0)
    }

    #[test]
    fn zero_intensity_is_pure_drift() {
        let field = field();
        for &(x, y, t) in &[(0.0, 0.0, 0.0), (313.0, 17.0, 12.5), (1100.0, 790.0, 9e5)] {
            let v = field.velocity(Vec2::new(x, y), t, 0.0);
            assert_eq!(v, Vec2::new(0.5, 0.0));
        }
    }

    #[test]
    fn shear_changes_sign_across_center() {
        let mut params = FlowParams::default();
        params.force_gain = 0.0;
        let field = FlowField::new(params, 800.0);

        let above = field.velocity(Vec2::new(10.0, 100.0), 0.0, 100.0);
        let center = field.velocity(Vec2::new(10.0, 400.0), 0.0, 100.0);
        let below = field.velocity(Vec2::new(10.0, 700.0), 0.0, 100.0);

        assert!((center.x - 0.5).abs() < 1e-6);
        assert!(above.x < 0.5);
        assert!(below.x > 0.5);
    }

    #[test]
    fn visual_and_force_passes_share_form() {
        let field = field();
        let position = Vec2::new(250.0, 130.0);
        let ratio = field.params.visual_gain / field.params.force_gain;
        let visual = field.visual_velocity(position, 3.0, 60.0);
        let scaled = field.velocity(position, 3.0, 60.0 * ratio);
        assert!((visual.y - scaled.y).abs() < 1e-4);
    }

    #[test]
    fn grid_covers_domain() {
        let samples = field().sample_grid(Domain::new(100.0, 40.0), 20.0, 0.0, 50.0);
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0].position, Vec2::new(10.0, 10.0));
        assert!(field()
            .sample_grid(Domain::new(100.0, 40.0), 0.0, 0.0, 50.0)
            .is_empty());
    }

    #[test]
    fn grid_rejects_spacing_too_fine_to_allocate() {
        let domain = Domain::new(1200.0, 800.0);
        assert!(field().sample_grid(domain, 1e-30, 0.0, 50.0).is_empty());
        assert!(field().sample_grid(domain, 0.1, 0.0, 50.0).is_empty());
        assert_eq!(field().sample_grid(domain, 1.0, 0.0, 50.0).len(), 1200 * 800);
    }
}
