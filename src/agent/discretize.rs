//! State-key derivation for the Q-tables.
//!
//! Continuous state components are bucketed against configured bin edges;
//! the layer index and the previous assignment pattern are kept exact.

use super::config::AgentConfig;
use crate::sim::State;

/// Index of the nearest bin edge at or below `value`.
///
/// `edges` must be sorted ascending. Values below the first edge fall into
/// bin 0; values at or above the last edge fall into the last bin.
pub fn bin_index(value: f64, edges: &[f64]) -> usize {
    edges.partition_point(|edge| *edge <= value).saturating_sub(1)
}

/// Discretized, hashable state used to key the Q-tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateKey {
    /// Bandwidth bin index.
    pub bandwidth_bin: usize,
    /// Cloud-pending bin index.
    pub cloud_pending_bin: usize,
    /// Exact layer index.
    pub layer: usize,
    /// Packed bits of the previous assignment, `None` at episode start.
    pub prev_bits: Option<u64>,
}

/// Discretizes a full state against the agent's bin edges.
pub fn state_key(state: &State, config: &AgentConfig) -> StateKey {
    StateKey {
        bandwidth_bin: bin_index(state.bandwidth_mbps, &config.bandwidth_bin_edges_mbps),
        cloud_pending_bin: bin_index(state.cloud_pending_ms, &config.cloud_pending_bin_edges_ms),
        layer: state.layer,
        prev_bits: state.prev_action.as_ref().map(|a| a.bits()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Action;

    const EDGES: [f64; 4] = [0.0, 10.0, 25.0, 50.0];

    #[test]
    fn value_below_first_edge_maps_to_bin_zero() {
        assert_eq!(bin_index(-3.0, &EDGES), 0);
    }

    #[test]
    fn value_on_edge_maps_to_that_bin() {
        assert_eq!(bin_index(0.0, &EDGES), 0);
        assert_eq!(bin_index(10.0, &EDGES), 1);
        assert_eq!(bin_index(50.0, &EDGES), 3);
    }

    #[test]
    fn value_between_edges_maps_to_lower_bin() {
        assert_eq!(bin_index(9.99, &EDGES), 0);
        assert_eq!(bin_index(26.0, &EDGES), 2);
    }

    #[test]
    fn value_above_last_edge_maps_to_last_bin() {
        assert_eq!(bin_index(1e9, &EDGES), 3);
    }

    #[test]
    fn state_key_keeps_layer_and_pattern_exact() {
        let config = AgentConfig::default();
        let mut state = State::initial(10.0);
        state.layer = 3;
        state.prev_action = Some(Action::from_bits(2, 3, 0b101));

        let key = state_key(&state, &config);
        assert_eq!(key.layer, 3);
        assert_eq!(key.prev_bits, Some(0b101));
    }

    #[test]
    fn state_key_buckets_continuous_components() {
        let config = AgentConfig::default();
        let near = state_key(&State::initial(11.0), &config);
        let same_bin = state_key(&State::initial(14.9), &config);
        let other_bin = state_key(&State::initial(29.0), &config);
        assert_eq!(near, same_bin);
        assert_ne!(near, other_bin);
    }

    #[test]
    fn episode_start_has_no_prev_bits() {
        let config = AgentConfig::default();
        let key = state_key(&State::initial(5.0), &config);
        assert_eq!(key.prev_bits, None);
    }
}
