//! Stochastic environment model for one pipeline pass.
//!
//! A step covers a single layer: given the state before that layer and an
//! assignment for its nodes, the simulator evolves the cloud queue and the
//! channel, prices the step in joules and seconds, and scores it against
//! the layer's share of the end-to-end deadline.

use std::sync::Arc;

use rand::Rng;

use super::action::{Action, Placement};
use super::config::SimConfig;
use super::state::State;
use crate::profile::ProfilingCatalog;

/// Floor applied to bandwidth before it is used as a divisor (Mbps).
const BANDWIDTH_EPS: f64 = 1e-6;

/// Next state plus the episode-termination flag.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State after the step; carries the refreshed cloud-pending time.
    pub state: State,
    /// True when the stepped layer was the last one.
    pub terminal: bool,
}

/// Everything a driver needs back from one full step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// State handed to the next step, slack already rolled forward.
    pub next_state: State,
    /// True when the stepped layer was the last one.
    pub terminal: bool,
    /// Shaped reward for the step.
    pub reward: f64,
    /// Energy spent by the edge device this step (J).
    pub energy_j: f64,
    /// Completion time of this step (s).
    pub time_s: f64,
}

/// Stochastic single-layer step model over a profiling catalog.
///
/// Holds no mutable state of its own; every random draw goes through the
/// caller-supplied generator, so seeded runs are bit-reproducible.
#[derive(Debug, Clone)]
pub struct Simulator {
    catalog: Arc<ProfilingCatalog>,
    config: SimConfig,
}

impl Simulator {
    /// Creates a simulator over `catalog` with the given noise bounds.
    pub fn new(catalog: Arc<ProfilingCatalog>, config: SimConfig) -> Self {
        Self { catalog, config }
    }

    /// The shared profiling catalog.
    pub fn catalog(&self) -> &Arc<ProfilingCatalog> {
        &self.catalog
    }

    /// The noise and penalty configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Evolves the environment after executing `action` at `state.layer`.
    ///
    /// Cloud dispatch replaces the pending time with the slowest dispatched
    /// node's cloud time plus a congestion draw; with no dispatch the queue
    /// drains (faster right after cloud work, slower when idle). Bandwidth
    /// takes a symmetric jitter draw clamped to the configured floor/cap.
    /// The layer advances unless it was the last, in which case the returned
    /// state must not be stepped again.
    pub fn transition<R: Rng>(&self, state: &State, action: &Action, rng: &mut R) -> Transition {
        self.check_action(state, action);

        let cloud_pending_ms = if action.has_cloud() {
            let slowest = action
                .cloud_nodes()
                .map(|node| self.catalog.cloud_time_ms(state.layer, node))
                .fold(0.0f64, f64::max);
            slowest + rng.gen_range(0.0..=self.config.congestion_max_ms)
        } else if state.prev_action.as_ref().is_some_and(|a| a.has_cloud()) {
            let drain = rng.gen_range(0.0..=self.config.drain_decay_max_ms);
            (state.cloud_pending_ms - drain).max(0.0)
        } else {
            let drift = rng.gen_range(0.0..=self.config.idle_decay_max_ms);
            (state.cloud_pending_ms - drift).max(0.0)
        };

        let jitter = self.config.bandwidth_jitter_mbps;
        let bandwidth_mbps = (state.bandwidth_mbps + rng.gen_range(-jitter..=jitter))
            .max(self.config.bandwidth_floor_mbps)
            .min(self.config.bandwidth_cap_mbps);

        let terminal = state.layer == self.catalog.last_layer();
        let layer = if terminal { state.layer } else { state.layer + 1 };

        Transition {
            state: State {
                bandwidth_mbps,
                cloud_pending_ms,
                layer,
                prev_action: Some(action.clone()),
                surplus_s: state.surplus_s,
            },
            terminal,
        }
    }

    /// Prices one step, returning `(energy_joules, completion_seconds)`.
    ///
    /// `state` is the pre-transition state: its bandwidth and previous
    /// action set the transmission context. `cloud_pending_ms` is the
    /// refreshed pending time produced by [`Simulator::transition`] for the
    /// same step.
    ///
    /// Cost terms, in order: the slowest handoff between differently-placed
    /// node pairs across the layer boundary (payload KB converted to bits
    /// against bandwidth in bits/s), edge compute for edge-assigned nodes,
    /// and edge idle draw while the cloud queue outlasts local work.
    pub fn energy_and_time(
        &self,
        state: &State,
        action: &Action,
        cloud_pending_ms: f64,
    ) -> (f64, f64) {
        self.check_action(state, action);

        let mut transmission_s = 0.0f64;
        if let Some(prev) = &state.prev_action {
            let bits = self.catalog.output_size_kb() * 8.0 * 1024.0;
            let bits_per_s = state.bandwidth_mbps.max(BANDWIDTH_EPS) * 1e6;
            let handoff_s = bits / bits_per_s;
            for prev_placement in prev.assignments() {
                for placement in action.assignments() {
                    if prev_placement != placement {
                        transmission_s = transmission_s.max(handoff_s);
                    }
                }
            }
        }
        let mut energy_j = self.catalog.edge_communication_power_w() * transmission_s;

        let mut edge_busy_s = 0.0;
        for (node, placement) in action.assignments().iter().enumerate() {
            if *placement == Placement::Edge {
                let time_s = self.catalog.edge_time_ms(state.layer, node) / 1000.0;
                energy_j += self.catalog.edge_power_w(state.layer, node) * time_s;
                edge_busy_s += time_s;
            }
        }

        let mut idle_s = 0.0;
        if action.has_cloud() {
            idle_s = (cloud_pending_ms / 1000.0 - edge_busy_s).max(0.0);
            energy_j += self.catalog.edge_idle_power_w() * idle_s;
        }

        (energy_j, idle_s + edge_busy_s + transmission_s)
    }

    /// Scores one step and rolls the schedule slack forward.
    ///
    /// The layer's time budget is its share of the end-to-end deadline,
    /// apportioned by its all-edge execution time, plus any carried slack.
    /// Returns `(reward, new_surplus_s)`: reward is `-energy` when the step
    /// fits its budget and `-(energy + penalty × overrun)` otherwise, so
    /// rewards are always non-positive and a miss is strictly worse than
    /// any on-time outcome.
    pub fn reward(
        &self,
        layer: usize,
        energy_j: f64,
        completion_s: f64,
        carried_surplus_s: f64,
    ) -> (f64, f64) {
        let total_ms = self.catalog.total_edge_time_ms();
        let share = if total_ms > 0.0 {
            self.catalog.layer_edge_time_ms(layer) / total_ms
        } else {
            // Fully unprofiled catalog: split the deadline by node count.
            self.catalog.node_count(layer) as f64 / self.catalog.total_node_count() as f64
        };
        let available_s = share * self.catalog.deadline_ms() / 1000.0 + carried_surplus_s;
        let surplus_s = available_s - completion_s;
        let reward = if surplus_s >= 0.0 {
            -energy_j
        } else {
            -(energy_j + self.config.overrun_penalty_per_s * -surplus_s)
        };
        (reward, surplus_s)
    }

    /// Full step: transition, price, and score in one call.
    ///
    /// The returned next state carries the updated slack.
    pub fn step<R: Rng>(&self, state: &State, action: &Action, rng: &mut R) -> StepOutcome {
        let transition = self.transition(state, action, rng);
        let (energy_j, time_s) =
            self.energy_and_time(state, action, transition.state.cloud_pending_ms);
        let (reward, surplus_s) = self.reward(state.layer, energy_j, time_s, state.surplus_s);

        let mut next_state = transition.state;
        next_state.surplus_s = surplus_s;
        StepOutcome {
            next_state,
            terminal: transition.terminal,
            reward,
            energy_j,
            time_s,
        }
    }

    fn check_action(&self, state: &State, action: &Action) {
        assert_eq!(
            action.layer(),
            state.layer,
            "action layer must match the state's layer"
        );
        assert_eq!(
            action.node_count(),
            self.catalog.node_count(state.layer),
            "action width must match the layer's node count"
        );
    }
}
