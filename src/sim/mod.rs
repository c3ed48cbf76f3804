//! Environment simulation: actions, state, and the stochastic step model.

pub mod action;
pub mod config;
pub mod simulator;
pub mod state;

pub use action::{Action, ActionKey, ActionSpace, Placement};
pub use config::SimConfig;
pub use simulator::{Simulator, StepOutcome, Transition};
pub use state::State;
