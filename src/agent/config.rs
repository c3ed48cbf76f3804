//! Learning hyperparameters and the discretization grid.

/// Double Q-learning hyperparameters.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Learning rate α applied to each table update.
    pub alpha: f64,
    /// Discount factor γ for bootstrapped targets.
    pub gamma: f64,
    /// Exploration probability ε at interior layers.
    pub epsilon: f64,
    /// Ascending bin edges for bandwidth discretization (Mbps).
    pub bandwidth_bin_edges_mbps: Vec<f64>,
    /// Ascending bin edges for cloud-pending discretization (ms).
    pub cloud_pending_bin_edges_ms: Vec<f64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            bandwidth_bin_edges_mbps: vec![1.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
            cloud_pending_bin_edges_ms: vec![0.0, 10.0, 25.0, 50.0, 100.0, 200.0],
        }
    }
}

impl AgentConfig {
    /// A copy of this configuration with exploration turned off.
    pub fn greedy(mut self) -> Self {
        self.epsilon = 0.0;
        self
    }
}
