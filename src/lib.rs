//! offlearn - Offload Learning for Edge/Cloud Pipelines
//!
//! Models a multi-layer computation pipeline whose per-layer work units can
//! run locally on an edge device or be offloaded to the cloud, and learns
//! energy-minimal assignments under an end-to-end deadline with tabular
//! double Q-learning over a stochastic channel and cloud-queue simulator.

pub mod agent;
pub mod policy;
pub mod profile;
pub mod sim;
pub mod trainer;

pub use agent::{AgentConfig, DoubleQAgent, QTable, StateKey, TrainOutcome};
pub use policy::{AllCloudPolicy, AllEdgePolicy, Policy, RandomPolicy};
pub use profile::{PipelineParams, ProfileError, ProfilingCatalog};
pub use sim::{
    Action, ActionKey, ActionSpace, Placement, SimConfig, Simulator, State, StepOutcome,
    Transition,
};
pub use trainer::RunMetrics;
