//! Random baseline scheduler.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::profile::ProfilingCatalog;
use crate::sim::{Action, ActionSpace};

/// Picks uniformly among the legal assignments of each layer.
///
/// Boundary layers only enumerate the all-edge assignment, so the boundary
/// rule holds by construction. Lower-bound baseline for the learned agent.
pub struct RandomPolicy {
    actions: ActionSpace,
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a seeded random policy over `catalog`'s layers.
    pub fn new(catalog: Arc<ProfilingCatalog>, seed: u64) -> Self {
        Self {
            actions: ActionSpace::new(catalog),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn action_for(&mut self, layer: usize) -> Action {
        let mut candidates = self.actions.enumerate(layer);
        let pick = self.rng.gen_range(0..candidates.len());
        candidates.swap_remove(pick)
    }

    fn name(&self) -> &str {
        "random"
    }
}
