//! Core simulation entities: particles, chains and shared value types.

pub mod chain;
pub mod particle;
pub mod types;

pub use chain::Chain;
pub use particle::Particle;
pub use types::{ChainColor, Domain, CHAIN_PALETTE};
