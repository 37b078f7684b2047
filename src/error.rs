//! Error types for simulation configuration.
//!
//! The tick itself never fails; only configuration writes are validated.

use std::fmt;

/// Configuration errors reported by [`crate::Simulation`] and [`crate::SimulationConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Chains need at least one particle.
    InvalidSegmentCount,
    /// Segment length must be positive and finite.
    InvalidSegmentLength(f32),
    /// Domain extents must be positive and finite.
    InvalidDomain { width: f32, height: f32 },
    /// At least one cluster is required to place a non-empty population.
    InvalidClusterCount,
    /// Particle mass must be positive and finite.
    InvalidMass(f32),
    /// A tuning parameter is outside its accepted range.
    InvalidParameter { name: &'static str, value: f32 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSegmentCount => write!(f, "segment count must be at least 1"),
            Self::InvalidSegmentLength(len) => {
                write!(f, "segment length must be positive and finite, got {len}")
            }
            Self::InvalidDomain { width, height } => {
                write!(f, "domain must have positive extents, got {width} x {height}")
            }
            Self::InvalidClusterCount => {
                write!(f, "cluster count must be at least 1 for a non-empty population")
            }
            Self::InvalidMass(mass) => write!(f, "mass must be positive and finite, got {mass}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "parameter `{name}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;
