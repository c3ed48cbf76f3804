//! Degenerate baselines: everything on edge, everything offloaded.

use std::sync::Arc;

use super::trait_::Policy;
use crate::profile::ProfilingCatalog;
use crate::sim::Action;

/// Assigns every node of every layer to the edge device.
pub struct AllEdgePolicy {
    catalog: Arc<ProfilingCatalog>,
}

impl AllEdgePolicy {
    /// Creates an all-edge policy over `catalog`'s layers.
    pub fn new(catalog: Arc<ProfilingCatalog>) -> Self {
        Self { catalog }
    }
}

impl Policy for AllEdgePolicy {
    fn action_for(&mut self, layer: usize) -> Action {
        Action::all_edge(layer, self.catalog.node_count(layer))
    }

    fn name(&self) -> &str {
        "all-edge"
    }
}

/// Offloads every interior node; boundary layers stay on edge.
pub struct AllCloudPolicy {
    catalog: Arc<ProfilingCatalog>,
}

impl AllCloudPolicy {
    /// Creates an all-cloud policy over `catalog`'s layers.
    pub fn new(catalog: Arc<ProfilingCatalog>) -> Self {
        Self { catalog }
    }
}

impl Policy for AllCloudPolicy {
    fn action_for(&mut self, layer: usize) -> Action {
        let n = self.catalog.node_count(layer);
        if self.catalog.is_boundary(layer) {
            Action::all_edge(layer, n)
        } else {
            Action::all_cloud(layer, n)
        }
    }

    fn name(&self) -> &str {
        "all-cloud"
    }
}
