//! Double Q-learning agent: discretization, value tables, and training.

pub mod config;
pub mod discretize;
pub mod double_q;


pub use config::AgentConfig;
pub use discretize::{bin_index, state_key, StateKey};
pub use double_q::{DoubleQAgent, QTable, TrainOutcome};
