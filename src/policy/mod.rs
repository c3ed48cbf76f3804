//! Baseline scheduling policies.
//!
//! Non-learning assignment sources that satisfy the same per-layer contract
//! as the agent's selection, for apples-to-apples comparison runs.

pub mod fixed;
pub mod random;
pub mod trait_;

pub use fixed::{AllCloudPolicy, AllEdgePolicy};
pub use random::RandomPolicy;
pub use trait_::Policy;
