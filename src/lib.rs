//! Polymer Flow – constrained particle chains in a turbulent shear flow.
//!
//! Every tick, each chain's particles receive a Brownian kick, are dragged
//! toward an analytic flow field, damped and integrated; chains whose
//! centroid leaves the domain wrap toroidally, and a fixed number of
//! distance/bend-angle relaxation passes restore their geometry.
//!
//! Rendering, charts and UI widgets are external: they read chain positions
//! and the flow intensity through [`Simulation`], and write configuration
//! through its setters or a [`ControlPanel`].

pub mod config;
pub mod control;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod simulation;
pub mod utils;

pub use glam::Vec2;

pub use config::{FlowParams, SimulationConfig};
pub use control::{ControlPanel, PendingControls};
pub use crate::core::{
    chain::Chain,
    particle::Particle,
    types::{ChainColor, Domain, CHAIN_PALETTE},
};
pub use dynamics::{
    flow::{FlowField, FlowSample},
    forces::{BrownianForce, Damping, FlowDrag, ForceContext, ForceGenerator, ForceRegistry},
    solver::{ChainMetrics, ConstraintSolver, SolverMetrics},
};
pub use error::{Result, SimulationError};
pub use simulation::Simulation;
pub use utils::profiling::TickProfiler;
