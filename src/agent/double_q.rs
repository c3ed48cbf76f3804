//! Tabular double Q-learning over discretized offload states.
//!
//! Two value tables decouple action selection from value estimation: each
//! update flips a fair coin, lets the chosen table pick the best next
//! action, and bootstraps that action's value from the other table.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AgentConfig;
use super::discretize::{state_key, StateKey};
use crate::profile::ProfilingCatalog;
use crate::sim::{Action, ActionKey, ActionSpace, SimConfig, Simulator, State};

/// One value table: (state key, action key) → estimated return.
///
/// Unseen pairs read as 0.0. Entries are only ever created by updates, so
/// the table grows with the visited state/action set, not the full product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<(StateKey, ActionKey), f64>,
}

impl QTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored for a pair, 0.0 when unseen.
    pub fn get(&self, state: StateKey, action: ActionKey) -> f64 {
        self.values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Moves the stored value a fraction `alpha` toward `target`.
    pub fn update_toward(&mut self, state: StateKey, action: ActionKey, alpha: f64, target: f64) {
        let value = self.values.entry((state, action)).or_insert(0.0);
        *value += alpha * (target - *value);
    }

    /// Sets a value directly.
    pub fn insert(&mut self, state: StateKey, action: ActionKey, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no pair has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates stored entries in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (StateKey, ActionKey, f64)> + '_ {
        self.values.iter().map(|(&(state, action), &value)| (state, action, value))
    }
}

/// Result of one training step, mirroring the episode-driver contract.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Assignment executed for the stepped layer.
    pub action: Action,
    /// Shaped reward for the step.
    pub reward: f64,
    /// State to hand to the next step.
    pub next_state: State,
    /// True when the stepped layer was the last one.
    pub terminal: bool,
    /// Energy spent by the edge device this step (J).
    pub energy_j: f64,
    /// Completion time of this step (s).
    pub time_s: f64,
    /// Bandwidth observed in the next state (Mbps); drivers reuse it to
    /// seed the following episode.
    pub next_bandwidth_mbps: f64,
}

/// Tabular double Q-learning agent driving the offload simulator.
///
/// # Lifecycle
///
/// 1. Build with [`DoubleQAgent::new`] from a shared catalog, simulator
///    noise bounds, hyperparameters, and an RNG seed.
/// 2. Repeatedly call [`DoubleQAgent::train`] with the current state until
///    it reports `terminal`, then reset to [`State::initial`].
/// 3. Read the learned policy back with [`DoubleQAgent::greedy_action`].
#[derive(Debug, Clone)]
pub struct DoubleQAgent {
    catalog: Arc<ProfilingCatalog>,
    simulator: Simulator,
    actions: ActionSpace,
    config: AgentConfig,
    q1: QTable,
    q2: QTable,
    rng: StdRng,
}

impl DoubleQAgent {
    /// Creates an agent with empty tables.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Shared profiling data
    /// * `sim_config` - Environment noise bounds and penalty weight
    /// * `config` - Learning hyperparameters and bin edges
    /// * `seed` - Seed for every random draw the agent makes
    pub fn new(
        catalog: Arc<ProfilingCatalog>,
        sim_config: SimConfig,
        config: AgentConfig,
        seed: u64,
    ) -> Self {
        Self {
            simulator: Simulator::new(Arc::clone(&catalog), sim_config),
            actions: ActionSpace::new(Arc::clone(&catalog)),
            catalog,
            config,
            q1: QTable::new(),
            q2: QTable::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects the action to execute at `state.layer`.
    ///
    /// Boundary layers always take their single legal action. Interior
    /// layers are ε-greedy: with probability ε a uniformly random legal
    /// action, otherwise the argmax of `Q1 + Q2` with ties resolved to the
    /// first enumerated maximum.
    pub fn choose_action(&mut self, state: &State) -> Action {
        let mut candidates = self.actions.enumerate(state.layer);
        if !self.catalog.is_boundary(state.layer) && self.rng.gen::<f64>() < self.config.epsilon {
            let pick = self.rng.gen_range(0..candidates.len());
            return candidates.swap_remove(pick);
        }
        let key = state_key(state, &self.config);
        let best = argmax_index(&self.q1, &self.q2, key, &candidates);
        candidates.swap_remove(best)
    }

    /// Greedy action for `state` under the current tables, no exploration.
    pub fn greedy_action(&self, state: &State) -> Action {
        let key = state_key(state, &self.config);
        let mut candidates = self.actions.enumerate(state.layer);
        let best = argmax_index(&self.q1, &self.q2, key, &candidates);
        candidates.swap_remove(best)
    }

    /// Runs one full learning step from `state`.
    ///
    /// Select, step the simulator, then update one table: a fair coin picks
    /// the table to update; that table chooses the best next action and the
    /// other table prices it for the bootstrap target
    /// `reward + γ × other[next, argmax_a chosen[next, a]]` (plain `reward`
    /// on terminal steps). The update itself is
    /// `chosen[s, a] += α × (target - chosen[s, a])`.
    pub fn train(&mut self, state: &State) -> TrainOutcome {
        let action = self.choose_action(state);
        let outcome = self.simulator.step(state, &action, &mut self.rng);

        let key = state_key(state, &self.config);
        let action_key = action.key();
        let next_key = state_key(&outcome.next_state, &self.config);
        let next_actions: Vec<ActionKey> = self
            .actions
            .enumerate(outcome.next_state.layer)
            .iter()
            .map(Action::key)
            .collect();

        let (chosen, other) = if self.rng.gen_bool(0.5) {
            (&mut self.q1, &self.q2)
        } else {
            (&mut self.q2, &self.q1)
        };
        let target = if outcome.terminal {
            outcome.reward
        } else {
            match best_action(chosen, next_key, &next_actions) {
                Some(best) => outcome.reward + self.config.gamma * other.get(next_key, best),
                None => outcome.reward,
            }
        };
        chosen.update_toward(key, action_key, self.config.alpha, target);

        let next_bandwidth_mbps = outcome.next_state.bandwidth_mbps;
        TrainOutcome {
            action,
            reward: outcome.reward,
            next_state: outcome.next_state,
            terminal: outcome.terminal,
            energy_j: outcome.energy_j,
            time_s: outcome.time_s,
            next_bandwidth_mbps,
        }
    }

    /// The two learned tables `(Q1, Q2)`.
    pub fn qtables(&self) -> (&QTable, &QTable) {
        (&self.q1, &self.q2)
    }

    /// Replaces both tables, e.g. from a deserialized snapshot.
    pub fn restore_tables(&mut self, q1: QTable, q2: QTable) {
        self.q1 = q1;
        self.q2 = q2;
    }

    /// The underlying simulator.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// The learning configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The shared profiling catalog.
    pub fn catalog(&self) -> &Arc<ProfilingCatalog> {
        &self.catalog
    }
}

/// Index of the first candidate maximizing `Q1 + Q2` at `key`.
fn argmax_index(q1: &QTable, q2: &QTable, key: StateKey, candidates: &[Action]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, action) in candidates.iter().enumerate() {
        let value = q1.get(key, action.key()) + q2.get(key, action.key());
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}

/// First action key maximizing `table` at `key`, `None` for an empty slice.
fn best_action(table: &QTable, key: StateKey, actions: &[ActionKey]) -> Option<ActionKey> {
    let mut best: Option<(f64, ActionKey)> = None;
    for &action in actions {
        let value = table.get(key, action);
        if best.map_or(true, |(best_value, _)| value > best_value) {
            best = Some((value, action));
        }
    }
    best.map(|(_, action)| action)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::{SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// One table entry in snapshot form.
    #[derive(Serialize, Deserialize)]
    struct QEntry {
        state: StateKey,
        action: ActionKey,
        value: f64,
    }

    impl Serialize for QTable {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (state, action, value) in self.entries() {
                seq.serialize_element(&QEntry {
                    state,
                    action,
                    value,
                })?;
            }
            seq.end()
        }
    }

    impl<'de> Deserialize<'de> for QTable {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct QTableVisitor;

            impl<'de> Visitor<'de> for QTableVisitor {
                type Value = QTable;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a sequence of Q-table entries")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let mut table = QTable::new();
                    while let Some(entry) = seq.next_element::<QEntry>()? {
                        table.insert(entry.state, entry.action, entry.value);
                    }
                    Ok(table)
                }
            }

            deserializer.deserialize_seq(QTableVisitor)
        }
    }
}
