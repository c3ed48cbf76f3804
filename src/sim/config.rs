//! Simulation noise and penalty configuration.

/// Channel/queue noise bounds and the deadline overrun penalty.
///
/// All noise draws are uniform over `[0, max]` (or `[-jitter, +jitter]` for
/// bandwidth); bounds must be non-negative.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Lower clamp for bandwidth (Mbps); also floors divisions.
    pub bandwidth_floor_mbps: f64,
    /// Upper clamp for bandwidth (Mbps).
    pub bandwidth_cap_mbps: f64,
    /// Half-width of the symmetric per-step bandwidth perturbation (Mbps).
    pub bandwidth_jitter_mbps: f64,
    /// Upper bound of the congestion term added on cloud dispatch (ms).
    pub congestion_max_ms: f64,
    /// Upper bound of the pending-time decay right after cloud work stops (ms).
    pub drain_decay_max_ms: f64,
    /// Upper bound of the pending-time drift while the cloud sits idle (ms).
    pub idle_decay_max_ms: f64,
    /// Reward penalty per second of deadline overrun.
    pub overrun_penalty_per_s: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bandwidth_floor_mbps: 1.0,
            bandwidth_cap_mbps: 30.0,
            bandwidth_jitter_mbps: 5.0,
            congestion_max_ms: 5.0,
            drain_decay_max_ms: 5.0,
            idle_decay_max_ms: 2.0,
            overrun_penalty_per_s: 1000.0,
        }
    }
}

impl SimConfig {
    /// Configuration with every noise bound at zero.
    ///
    /// Makes transitions fully deterministic; useful for tests and for
    /// inspecting a learned policy without channel variance.
    pub fn noiseless() -> Self {
        Self {
            bandwidth_jitter_mbps: 0.0,
            congestion_max_ms: 0.0,
            drain_decay_max_ms: 0.0,
            idle_decay_max_ms: 0.0,
            ..Self::default()
        }
    }
}
