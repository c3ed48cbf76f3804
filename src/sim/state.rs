//! Step state carried through an episode.

use super::action::Action;

/// Scheduling context right before one layer is placed.
///
/// Produced fresh by the simulator each step; the driver owns it between
/// steps. `layer` advances by exactly one per non-terminal step.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Current network bandwidth (Mbps).
    pub bandwidth_mbps: f64,
    /// Outstanding cloud queue delay (ms), never negative.
    pub cloud_pending_ms: f64,
    /// Index of the layer about to be scheduled.
    pub layer: usize,
    /// Assignment executed for the previous layer, `None` at episode start.
    pub prev_action: Option<Action>,
    /// Signed schedule slack carried from earlier layers (s); negative means
    /// the pipeline is behind schedule.
    pub surplus_s: f64,
}

impl State {
    /// Episode-start state at layer 0 with an empty cloud queue.
    pub fn initial(bandwidth_mbps: f64) -> Self {
        Self {
            bandwidth_mbps,
            cloud_pending_ms: 0.0,
            layer: 0,
            prev_action: None,
            surplus_s: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_starts_clean() {
        let state = State::initial(12.5);
        assert_eq!(state.bandwidth_mbps, 12.5);
        assert_eq!(state.cloud_pending_ms, 0.0);
        assert_eq!(state.layer, 0);
        assert!(state.prev_action.is_none());
        assert_eq!(state.surplus_s, 0.0);
    }
}
