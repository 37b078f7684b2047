//! Simulation dynamics: flow field, force generators, constraint relaxation and parallel stepping.

pub mod flow;
pub mod forces;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod solver;

pub use flow::{FlowField, FlowSample};
pub use forces::{BrownianForce, Damping, FlowDrag, ForceContext, ForceGenerator, ForceRegistry};
pub use solver::{ChainMetrics, ConstraintSolver, SolverMetrics};
