//! Global configuration constants and the tunable simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Default working domain width.
pub const DEFAULT_WIDTH: f32 = 1200.0;

/// Default working domain height.
pub const DEFAULT_HEIGHT: f32 = 800.0;

/// Default number of particles per chain.
pub const DEFAULT_SEGMENT_COUNT: usize = 20;

/// Default rest distance between adjacent particles.
pub const DEFAULT_SEGMENT_LENGTH: f32 = 6.0;

/// Default number of chains.
pub const DEFAULT_POPULATION: usize = 150;

/// Default number of clusters chains are seeded around.
pub const DEFAULT_CLUSTER_COUNT: usize = 5;

/// Default flow intensity on the [0, 100] control scale.
pub const DEFAULT_FLOW_INTENSITY: f32 = 20.0;

/// Relaxation passes (distance sweep then angle sweep) per tick.
pub const DEFAULT_ANGULAR_CONSTRAINT_ITERATIONS: usize = 10;

/// Minimum interior bend angle in degrees.
pub const DEFAULT_MIN_ANGLE_DEG: f32 = 90.0;

/// Gain applied to the angular violation when pushing neighbours apart.
pub const DEFAULT_ANGULAR_PUSH_GAIN: f32 = 0.05;

/// Peak-to-peak magnitude of the per-tick Brownian kick.
pub const DEFAULT_BROWNIAN_FORCE_SCALE: f32 = 1.5;

/// Fraction of the velocity/flow mismatch removed per tick.
pub const DEFAULT_COUPLING_FACTOR: f32 = 0.1;

/// Velocity multiplier applied every tick after flow coupling.
pub const DEFAULT_FRICTION: f32 = 0.9;

/// Distance outside the domain a centroid may travel before wrapping.
pub const DEFAULT_WRAP_MARGIN: f32 = 200.0;

/// Radius of the disk chains are scattered in around a cluster center.
pub const DEFAULT_CLUSTER_RADIUS: f32 = 80.0;

/// Fraction of each domain extent kept clear of cluster centers.
pub const DEFAULT_CLUSTER_INSET: f32 = 0.2;

/// Global time advanced per tick.
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Tick duration above which a warning is logged.
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 16.0;

/// Shape parameters of the ambient flow field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// Constant rightward drift velocity.
    pub drift_speed: f32,
    /// Spatial frequency of the turbulence terms.
    pub spatial_scale: f32,
    /// Turbulence gain per unit of intensity when driving particles.
    pub force_gain: f32,
    /// Turbulence gain per unit of intensity for the visualization grid.
    pub visual_gain: f32,
    /// Linear-in-height shear strength at full intensity.
    pub shear_coefficient: f32,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            drift_speed: 0.5,
            spatial_scale: 0.005,
            force_gain: 0.15,
            visual_gain: 0.03,
            shear_coefficient: 0.01,
        }
    }
}

/// Full set of simulation parameters.
///
/// Builder pattern:
/// ```
/// use polymer_flow::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_population(1)
///     .with_segment_count(5)
///     .with_segment_length(5.0)
///     .with_flow_intensity(0.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    /// Particles per chain. Only read when chains are constructed.
    pub segment_count: usize,
    pub segment_length: f32,
    pub population: usize,
    pub cluster_count: usize,
    pub flow_intensity: f32,
    pub angular_constraint_iterations: usize,
    pub min_angle_deg: f32,
    pub angular_push_gain: f32,
    pub brownian_force_scale: f32,
    pub coupling_factor: f32,
    pub friction: f32,
    pub wrap_margin: f32,
    pub cluster_radius: f32,
    pub cluster_inset: f32,
    pub time_step: f64,
    pub frame_budget_ms: f32,
    pub flow: FlowParams,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            segment_count: DEFAULT_SEGMENT_COUNT,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            population: DEFAULT_POPULATION,
            cluster_count: DEFAULT_CLUSTER_COUNT,
            flow_intensity: DEFAULT_FLOW_INTENSITY,
            angular_constraint_iterations: DEFAULT_ANGULAR_CONSTRAINT_ITERATIONS,
            min_angle_deg: DEFAULT_MIN_ANGLE_DEG,
            angular_push_gain: DEFAULT_ANGULAR_PUSH_GAIN,
            brownian_force_scale: DEFAULT_BROWNIAN_FORCE_SCALE,
            coupling_factor: DEFAULT_COUPLING_FACTOR,
            friction: DEFAULT_FRICTION,
            wrap_margin: DEFAULT_WRAP_MARGIN,
            cluster_radius: DEFAULT_CLUSTER_RADIUS,
            cluster_inset: DEFAULT_CLUSTER_INSET,
            time_step: DEFAULT_TIME_STEP,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            flow: FlowParams::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_domain(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    pub fn with_segment_length(mut self, segment_length: f32) -> Self {
        self.segment_length = segment_length;
        self
    }

    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    pub fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    pub fn with_flow_intensity(mut self, flow_intensity: f32) -> Self {
        self.flow_intensity = flow_intensity;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.angular_constraint_iterations = iterations;
        self
    }

    pub fn with_min_angle_deg(mut self, min_angle_deg: f32) -> Self {
        self.min_angle_deg = min_angle_deg;
        self
    }

    pub fn with_brownian_force_scale(mut self, scale: f32) -> Self {
        self.brownian_force_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every structural and tuning parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(SimulationError::InvalidDomain {
                width: self.width,
                height: self.height,
            });
        }
        validate_segment_count(self.segment_count)?;
        validate_segment_length(self.segment_length)?;
        if self.population > 0 && self.cluster_count == 0 {
            return Err(SimulationError::InvalidClusterCount);
        }

        check_unit("coupling_factor", self.coupling_factor)?;
        check_unit("friction", self.friction)?;
        check_non_negative("cluster_inset", self.cluster_inset)?;
        check_non_negative("min_angle_deg", self.min_angle_deg)?;
        check_non_negative("angular_push_gain", self.angular_push_gain)?;
        check_non_negative("brownian_force_scale", self.brownian_force_scale)?;
        check_non_negative("wrap_margin", self.wrap_margin)?;
        check_non_negative("cluster_radius", self.cluster_radius)?;
        check_non_negative("time_step", self.time_step as f32)?;
        if self.min_angle_deg > 180.0 {
            return Err(SimulationError::InvalidParameter {
                name: "min_angle_deg",
                value: self.min_angle_deg,
            });
        }
        if self.cluster_inset >= 0.5 {
            return Err(SimulationError::InvalidParameter {
                name: "cluster_inset",
                value: self.cluster_inset,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_segment_count(segment_count: usize) -> Result<()> {
    if segment_count == 0 {
        return Err(SimulationError::InvalidSegmentCount);
    }
    Ok(())
}

pub(crate) fn validate_segment_length(segment_length: f32) -> Result<()> {
    if !segment_length.is_finite() || segment_length <= 0.0 {
        return Err(SimulationError::InvalidSegmentLength(segment_length));
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::InvalidParameter { name, value });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::InvalidParameter { name, value });
    }
    Ok(())
}
