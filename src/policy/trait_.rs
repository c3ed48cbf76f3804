//! Policy trait shared by the baseline schedulers.

use crate::sim::Action;

/// A per-layer assignment source.
///
/// Anything producing legal assignments can stand in for the learned agent
/// in an evaluation run. Implementations must honor the boundary rule:
/// layer 0 and the last layer only ever receive all-edge assignments.
pub trait Policy: Send + Sync {
    /// Produces the assignment to execute for `layer`.
    fn action_for(&mut self, layer: usize) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
