//! Multi-episode drivers and run-level metrics.
//!
//! Two loops share one shape: train the double-Q agent online, or roll a
//! fixed baseline policy through the simulator without learning. Both cap
//! episode length and carry the bandwidth observed at episode end into the
//! next episode's start state, modeling a channel that persists across
//! pipeline passes.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::agent::DoubleQAgent;
use crate::policy::Policy;
use crate::sim::{Simulator, State};

/// Default per-episode step cap.
pub const DEFAULT_MAX_STEPS: usize = 20;

/// Aggregated results over a batch of episodes.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Mean total energy per episode (J).
    pub mean_energy_j: f64,
    /// Mean total completion time per episode (ms).
    pub mean_time_ms: f64,
    /// Mean cumulative reward per episode.
    pub mean_reward: f64,
    /// Number of episodes run.
    pub episodes: usize,
}

impl RunMetrics {
    /// Trains `agent` online for `episodes` episodes and aggregates totals.
    ///
    /// Each episode is cut off after `max_steps` steps even without a
    /// terminal flag; a well-formed topology terminates on its own.
    pub fn from_training(agent: &mut DoubleQAgent, episodes: usize, max_steps: usize) -> Self {
        let mut bandwidth = agent.catalog().bandwidth_mbps();
        let mut totals = Vec::with_capacity(episodes);

        for episode in 0..episodes {
            let mut state = State::initial(bandwidth);
            let mut energy_j = 0.0;
            let mut time_s = 0.0;
            let mut reward = 0.0;

            for _ in 0..max_steps {
                let outcome = agent.train(&state);
                energy_j += outcome.energy_j;
                time_s += outcome.time_s;
                reward += outcome.reward;
                bandwidth = outcome.next_bandwidth_mbps;
                if outcome.terminal {
                    break;
                }
                state = outcome.next_state;
            }

            debug!(
                episode,
                energy_j,
                time_ms = time_s * 1000.0,
                reward,
                "training episode finished"
            );
            totals.push((energy_j, time_s, reward));
        }

        let metrics = Self::aggregate(&totals);
        info!(
            episodes = metrics.episodes,
            mean_energy_j = metrics.mean_energy_j,
            mean_time_ms = metrics.mean_time_ms,
            mean_reward = metrics.mean_reward,
            "training run complete"
        );
        metrics
    }

    /// Rolls `policy` through `simulator` without learning and aggregates.
    ///
    /// The random source for the environment draws is seeded independently
    /// of the policy's own seed, so two policies can share a channel trace.
    pub fn from_policy(
        policy: &mut dyn Policy,
        simulator: &Simulator,
        episodes: usize,
        max_steps: usize,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bandwidth = simulator.catalog().bandwidth_mbps();
        let mut totals = Vec::with_capacity(episodes);

        for episode in 0..episodes {
            let mut state = State::initial(bandwidth);
            let mut energy_j = 0.0;
            let mut time_s = 0.0;
            let mut reward = 0.0;

            for _ in 0..max_steps {
                let action = policy.action_for(state.layer);
                let outcome = simulator.step(&state, &action, &mut rng);
                energy_j += outcome.energy_j;
                time_s += outcome.time_s;
                reward += outcome.reward;
                bandwidth = outcome.next_state.bandwidth_mbps;
                if outcome.terminal {
                    break;
                }
                state = outcome.next_state;
            }

            debug!(
                episode,
                policy = policy.name(),
                energy_j,
                time_ms = time_s * 1000.0,
                reward,
                "evaluation episode finished"
            );
            totals.push((energy_j, time_s, reward));
        }

        let metrics = Self::aggregate(&totals);
        info!(
            policy = policy.name(),
            episodes = metrics.episodes,
            mean_energy_j = metrics.mean_energy_j,
            mean_time_ms = metrics.mean_time_ms,
            mean_reward = metrics.mean_reward,
            "evaluation run complete"
        );
        metrics
    }

    fn aggregate(totals: &[(f64, f64, f64)]) -> Self {
        let n = totals.len().max(1) as f64;
        Self {
            mean_energy_j: totals.iter().map(|t| t.0).sum::<f64>() / n,
            mean_time_ms: totals.iter().map(|t| t.1).sum::<f64>() / n * 1000.0,
            mean_reward: totals.iter().map(|t| t.2).sum::<f64>() / n,
            episodes: totals.len(),
        }
    }
}

impl fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run metrics ({} episodes) ===", self.episodes)?;
        writeln!(f, "  Mean energy:  {:.4} J", self.mean_energy_j)?;
        writeln!(f, "  Mean time:    {:.2} ms", self.mean_time_ms)?;
        writeln!(f, "  Mean reward:  {:.4}", self.mean_reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentConfig;
    use crate::policy::{AllCloudPolicy, AllEdgePolicy, RandomPolicy};
    use crate::profile::{PipelineParams, ProfilingCatalog};
    use crate::sim::SimConfig;
    use std::sync::Arc;

    // Topology [1, 2, 1], 10 ms / 1 W per node on edge, 5 ms on cloud,
    // 10 Mbps channel, 100 ms deadline, no idle or transmission power.
    fn make_catalog() -> Arc<ProfilingCatalog> {
        let params = PipelineParams {
            bandwidth_mbps: 10.0,
            rtt_ms: 0.0,
            output_size_kb: 0.0,
            edge_idle_power_w: 0.0,
            edge_communication_power_w: 0.0,
            deadline_ms: 100.0,
        };
        Arc::new(ProfilingCatalog::uniform(vec![1, 2, 1], 10.0, 5.0, 1.0, params).unwrap())
    }

    #[test]
    fn training_run_aggregates_episodes() {
        let mut agent = DoubleQAgent::new(
            make_catalog(),
            SimConfig::noiseless(),
            AgentConfig::default(),
            6,
        );
        let metrics = RunMetrics::from_training(&mut agent, 5, DEFAULT_MAX_STEPS);
        assert_eq!(metrics.episodes, 5);
        assert!(metrics.mean_energy_j > 0.0);
        assert!(metrics.mean_reward <= 0.0);
    }

    #[test]
    fn all_edge_rollout_is_exact_without_noise() {
        let catalog = make_catalog();
        let simulator = Simulator::new(Arc::clone(&catalog), SimConfig::noiseless());
        let mut policy = AllEdgePolicy::new(catalog);

        let metrics = RunMetrics::from_policy(&mut policy, &simulator, 4, DEFAULT_MAX_STEPS, 1);
        // Four nodes at 10 ms / 1 W each, every episode identical.
        assert!((metrics.mean_energy_j - 0.04).abs() < 1e-12);
        assert!((metrics.mean_time_ms - 40.0).abs() < 1e-9);
        assert!((metrics.mean_reward + 0.04).abs() < 1e-12);
        assert_eq!(metrics.episodes, 4);
    }

    #[test]
    fn all_cloud_rollout_spends_less_edge_energy() {
        let catalog = make_catalog();
        let simulator = Simulator::new(Arc::clone(&catalog), SimConfig::noiseless());

        let mut edge = AllEdgePolicy::new(Arc::clone(&catalog));
        let mut cloud = AllCloudPolicy::new(catalog);
        let edge_metrics = RunMetrics::from_policy(&mut edge, &simulator, 3, DEFAULT_MAX_STEPS, 1);
        let cloud_metrics =
            RunMetrics::from_policy(&mut cloud, &simulator, 3, DEFAULT_MAX_STEPS, 1);

        assert!(cloud_metrics.mean_energy_j < edge_metrics.mean_energy_j);
    }

    #[test]
    fn random_rollout_stays_within_episode_cap() {
        let catalog = make_catalog();
        let simulator = Simulator::new(Arc::clone(&catalog), SimConfig::default());
        let mut policy = RandomPolicy::new(catalog, 12);

        let metrics = RunMetrics::from_policy(&mut policy, &simulator, 10, 2, 1);
        assert_eq!(metrics.episodes, 10);
        assert!(metrics.mean_time_ms.is_finite());
    }

    #[test]
    fn display_lists_every_aggregate() {
        let metrics = RunMetrics {
            mean_energy_j: 0.1234,
            mean_time_ms: 56.7,
            mean_reward: -0.1234,
            episodes: 3,
        };
        let text = metrics.to_string();
        assert!(text.contains("3 episodes"));
        assert!(text.contains("0.1234 J"));
        assert!(text.contains("56.70 ms"));
        assert!(text.contains("-0.1234"));
    }
}
