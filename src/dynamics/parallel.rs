use rand::{rngs::SmallRng, SeedableRng};
use rayon::prelude::*;

use crate::{
    core::{chain::Chain, types::Domain},
    dynamics::{
        forces::{ForceContext, ForceRegistry},
        solver::ConstraintSolver,
    },
};

/// Data-parallel tick phases using Rayon. Chains share no state, so each
/// runs independently with its own pre-drawn RNG seed.
pub struct ParallelStepper;

impl ParallelStepper {
    /// Returns the number of chains that wrapped.
    pub fn advance_dynamics(
        chains: &mut [Chain],
        seeds: &[u64],
        forces: &ForceRegistry,
        ctx: &ForceContext,
        domain: Domain,
        margin: f32,
    ) -> usize {
        chains
            .par_iter_mut()
            .zip(seeds.par_iter())
            .map(|(chain, &seed)| {
                let mut rng = SmallRng::seed_from_u64(seed);
                chain.advance_dynamics(forces, ctx, domain, margin, &mut rng)
            })
            .filter(|&wrapped| wrapped)
            .count()
    }

    pub fn relax(chains: &mut [Chain], solver: &ConstraintSolver) {
        chains.par_iter_mut().for_each(|chain| chain.relax(solver));
    }
}
