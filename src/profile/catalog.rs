//! Read-only profiling data for a layered pipeline.
//!
//! Holds per-(layer, node) execution times and power draws plus the
//! pipeline-wide channel and deadline constants. All lookups are total:
//! coordinates absent from the tables price at zero, so sparse or partial
//! profiling campaigns still produce a usable catalog.

use super::error::ProfileError;

/// Pipeline-wide scalar parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    /// Initial network bandwidth between edge and cloud (Mbps).
    pub bandwidth_mbps: f64,
    /// Round-trip time to the cloud tier (ms).
    pub rtt_ms: f64,
    /// Size of one inter-layer payload (KB).
    pub output_size_kb: f64,
    /// Edge device power draw while waiting on the cloud (W).
    pub edge_idle_power_w: f64,
    /// Edge device power draw while transmitting (W).
    pub edge_communication_power_w: f64,
    /// End-to-end deadline for one pipeline pass (ms).
    pub deadline_ms: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            bandwidth_mbps: 5.0,
            rtt_ms: 10.0,
            output_size_kb: 5.0,
            edge_idle_power_w: 4.0,
            edge_communication_power_w: 5.0,
            deadline_ms: 300.0,
        }
    }
}

/// Validated profiling catalog for one pipeline.
///
/// Construction checks the topology and the scalar parameters; the
/// per-node tables themselves may be sparse (missing entries read as 0.0).
/// Per-layer all-edge execution times are precomputed at build time for
/// deadline apportioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilingCatalog {
    topology: Vec<usize>,
    edge_times_ms: Vec<Vec<f64>>,
    cloud_times_ms: Vec<Vec<f64>>,
    edge_powers_w: Vec<Vec<f64>>,
    params: PipelineParams,
    layer_edge_times_ms: Vec<f64>,
    total_edge_time_ms: f64,
}

impl ProfilingCatalog {
    /// Largest per-layer node count the action enumeration will accept.
    pub const MAX_LAYER_WIDTH: usize = 16;

    /// Builds a catalog from per-layer tables.
    ///
    /// # Arguments
    ///
    /// * `topology` - Node count per layer, in pipeline order
    /// * `edge_times_ms` - Edge execution time rows, one per layer
    /// * `cloud_times_ms` - Cloud execution time rows, one per layer
    /// * `edge_powers_w` - Edge power draw rows, one per layer
    /// * `params` - Pipeline-wide scalars
    ///
    /// Rows shorter than the layer's node count are allowed; absent cells
    /// read as 0.0.
    pub fn new(
        topology: Vec<usize>,
        edge_times_ms: Vec<Vec<f64>>,
        cloud_times_ms: Vec<Vec<f64>>,
        edge_powers_w: Vec<Vec<f64>>,
        params: PipelineParams,
    ) -> Result<Self, ProfileError> {
        if topology.is_empty() {
            return Err(ProfileError::EmptyTopology);
        }
        for (layer, &nodes) in topology.iter().enumerate() {
            if nodes == 0 {
                return Err(ProfileError::EmptyLayer { layer });
            }
            if nodes > Self::MAX_LAYER_WIDTH {
                return Err(ProfileError::LayerTooWide {
                    layer,
                    nodes,
                    max: Self::MAX_LAYER_WIDTH,
                });
            }
        }
        if !params.deadline_ms.is_finite() || params.deadline_ms <= 0.0 {
            return Err(ProfileError::NonPositiveDeadline(params.deadline_ms));
        }
        for (name, value) in [
            ("bandwidth_mbps", params.bandwidth_mbps),
            ("rtt_ms", params.rtt_ms),
            ("output_size_kb", params.output_size_kb),
            ("edge_idle_power_w", params.edge_idle_power_w),
            ("edge_communication_power_w", params.edge_communication_power_w),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidParameter { name, value });
            }
        }

        let layer_edge_times_ms: Vec<f64> = topology
            .iter()
            .enumerate()
            .map(|(layer, &nodes)| {
                (0..nodes)
                    .map(|node| table_lookup(&edge_times_ms, layer, node))
                    .sum()
            })
            .collect();
        let total_edge_time_ms = layer_edge_times_ms.iter().sum();

        Ok(Self {
            topology,
            edge_times_ms,
            cloud_times_ms,
            edge_powers_w,
            params,
            layer_edge_times_ms,
            total_edge_time_ms,
        })
    }

    /// Builds a catalog where every node shares the same times and power.
    ///
    /// Convenience for tests and synthetic workloads.
    pub fn uniform(
        topology: Vec<usize>,
        edge_time_ms: f64,
        cloud_time_ms: f64,
        edge_power_w: f64,
        params: PipelineParams,
    ) -> Result<Self, ProfileError> {
        let edge_times = topology.iter().map(|&n| vec![edge_time_ms; n]).collect();
        let cloud_times = topology.iter().map(|&n| vec![cloud_time_ms; n]).collect();
        let powers = topology.iter().map(|&n| vec![edge_power_w; n]).collect();
        Self::new(topology, edge_times, cloud_times, powers, params)
    }

    /// Number of layers in the pipeline.
    pub fn layer_count(&self) -> usize {
        self.topology.len()
    }

    /// Index of the final layer.
    pub fn last_layer(&self) -> usize {
        self.topology.len() - 1
    }

    /// Node count of `layer`, 0 when out of range.
    pub fn node_count(&self, layer: usize) -> usize {
        self.topology.get(layer).copied().unwrap_or(0)
    }

    /// Total node count across all layers.
    pub fn total_node_count(&self) -> usize {
        self.topology.iter().sum()
    }

    /// Whether `layer` is the pipeline input or output layer.
    pub fn is_boundary(&self, layer: usize) -> bool {
        layer == 0 || layer + 1 == self.topology.len()
    }

    /// Edge execution time of one node (ms), 0.0 when unprofiled.
    pub fn edge_time_ms(&self, layer: usize, node: usize) -> f64 {
        table_lookup(&self.edge_times_ms, layer, node)
    }

    /// Cloud execution time of one node (ms), 0.0 when unprofiled.
    pub fn cloud_time_ms(&self, layer: usize, node: usize) -> f64 {
        table_lookup(&self.cloud_times_ms, layer, node)
    }

    /// Edge power draw of one node (W), 0.0 when unprofiled.
    pub fn edge_power_w(&self, layer: usize, node: usize) -> f64 {
        table_lookup(&self.edge_powers_w, layer, node)
    }

    /// Summed edge execution time of `layer` (ms), 0.0 when out of range.
    pub fn layer_edge_time_ms(&self, layer: usize) -> f64 {
        self.layer_edge_times_ms.get(layer).copied().unwrap_or(0.0)
    }

    /// Summed edge execution time of the whole pipeline (ms).
    pub fn total_edge_time_ms(&self) -> f64 {
        self.total_edge_time_ms
    }

    /// Initial network bandwidth (Mbps).
    pub fn bandwidth_mbps(&self) -> f64 {
        self.params.bandwidth_mbps
    }

    /// Round-trip time to the cloud tier (ms).
    pub fn rtt_ms(&self) -> f64 {
        self.params.rtt_ms
    }

    /// Inter-layer payload size (KB).
    pub fn output_size_kb(&self) -> f64 {
        self.params.output_size_kb
    }

    /// Edge power draw while waiting on the cloud (W).
    pub fn edge_idle_power_w(&self) -> f64 {
        self.params.edge_idle_power_w
    }

    /// Edge power draw while transmitting (W).
    pub fn edge_communication_power_w(&self) -> f64 {
        self.params.edge_communication_power_w
    }

    /// End-to-end deadline (ms).
    pub fn deadline_ms(&self) -> f64 {
        self.params.deadline_ms
    }
}

fn table_lookup(table: &[Vec<f64>], layer: usize, node: usize) -> f64 {
    table
        .get(layer)
        .and_then(|row| row.get(node))
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog() -> ProfilingCatalog {
        ProfilingCatalog::new(
            vec![1, 2, 1],
            vec![vec![10.0], vec![10.0, 10.0], vec![10.0]],
            vec![vec![5.0], vec![5.0, 5.0], vec![5.0]],
            vec![vec![1.0], vec![1.0, 1.0], vec![1.0]],
            PipelineParams {
                bandwidth_mbps: 10.0,
                deadline_ms: 100.0,
                ..PipelineParams::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_topology() {
        let err = ProfilingCatalog::new(
            vec![],
            vec![],
            vec![],
            vec![],
            PipelineParams::default(),
        )
        .unwrap_err();
        assert_eq!(err, ProfileError::EmptyTopology);
    }

    #[test]
    fn rejects_empty_layer() {
        let err = ProfilingCatalog::uniform(vec![1, 0, 1], 1.0, 1.0, 1.0, PipelineParams::default())
            .unwrap_err();
        assert_eq!(err, ProfileError::EmptyLayer { layer: 1 });
    }

    #[test]
    fn rejects_too_wide_layer() {
        let err = ProfilingCatalog::uniform(vec![1, 40, 1], 1.0, 1.0, 1.0, PipelineParams::default())
            .unwrap_err();
        assert_eq!(
            err,
            ProfileError::LayerTooWide {
                layer: 1,
                nodes: 40,
                max: ProfilingCatalog::MAX_LAYER_WIDTH,
            }
        );
    }

    #[test]
    fn rejects_non_positive_deadline() {
        let params = PipelineParams {
            deadline_ms: 0.0,
            ..PipelineParams::default()
        };
        let err = ProfilingCatalog::uniform(vec![1, 1], 1.0, 1.0, 1.0, params).unwrap_err();
        assert_eq!(err, ProfileError::NonPositiveDeadline(0.0));
    }

    #[test]
    fn rejects_negative_parameter() {
        let params = PipelineParams {
            bandwidth_mbps: -3.0,
            ..PipelineParams::default()
        };
        let err = ProfilingCatalog::uniform(vec![1, 1], 1.0, 1.0, 1.0, params).unwrap_err();
        assert_eq!(
            err,
            ProfileError::InvalidParameter {
                name: "bandwidth_mbps",
                value: -3.0,
            }
        );
    }

    #[test]
    fn missing_lookup_reads_zero() {
        let catalog = make_catalog();
        assert_eq!(catalog.edge_time_ms(1, 5), 0.0);
        assert_eq!(catalog.cloud_time_ms(9, 0), 0.0);
        assert_eq!(catalog.edge_power_w(0, 3), 0.0);
    }

    #[test]
    fn sparse_rows_are_tolerated() {
        let catalog = ProfilingCatalog::new(
            vec![1, 3],
            vec![vec![2.0], vec![4.0]], // layer 1 row shorter than its 3 nodes
            vec![vec![1.0], vec![1.0, 1.0, 1.0]],
            vec![vec![1.0], vec![1.0]],
            PipelineParams::default(),
        )
        .unwrap();
        assert_eq!(catalog.edge_time_ms(1, 0), 4.0);
        assert_eq!(catalog.edge_time_ms(1, 2), 0.0);
        assert_eq!(catalog.layer_edge_time_ms(1), 4.0);
    }

    #[test]
    fn boundary_layers() {
        let catalog = make_catalog();
        assert!(catalog.is_boundary(0));
        assert!(!catalog.is_boundary(1));
        assert!(catalog.is_boundary(2));
        assert_eq!(catalog.last_layer(), 2);
    }

    #[test]
    fn layer_edge_times_precomputed() {
        let catalog = make_catalog();
        assert_eq!(catalog.layer_edge_time_ms(0), 10.0);
        assert_eq!(catalog.layer_edge_time_ms(1), 20.0);
        assert_eq!(catalog.total_edge_time_ms(), 40.0);
    }

    #[test]
    fn node_counts() {
        let catalog = make_catalog();
        assert_eq!(catalog.layer_count(), 3);
        assert_eq!(catalog.node_count(1), 2);
        assert_eq!(catalog.node_count(7), 0);
        assert_eq!(catalog.total_node_count(), 4);
    }

    #[test]
    fn scalar_accessors() {
        let catalog = make_catalog();
        assert_eq!(catalog.bandwidth_mbps(), 10.0);
        assert_eq!(catalog.rtt_ms(), 10.0);
        assert_eq!(catalog.output_size_kb(), 5.0);
        assert_eq!(catalog.edge_idle_power_w(), 4.0);
        assert_eq!(catalog.edge_communication_power_w(), 5.0);
        assert_eq!(catalog.deadline_ms(), 100.0);
    }

    #[test]
    fn uniform_fills_every_node() {
        let catalog =
            ProfilingCatalog::uniform(vec![2, 3], 7.0, 3.0, 1.5, PipelineParams::default())
                .unwrap();
        assert_eq!(catalog.edge_time_ms(1, 2), 7.0);
        assert_eq!(catalog.cloud_time_ms(0, 1), 3.0);
        assert_eq!(catalog.edge_power_w(1, 0), 1.5);
        assert_eq!(catalog.total_edge_time_ms(), 35.0);
    }
}
