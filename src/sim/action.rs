//! Edge/cloud assignment vectors and their per-layer enumeration.

use std::fmt;
use std::sync::Arc;

use crate::profile::ProfilingCatalog;

/// Where a single node executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Edge,
    Cloud,
}

impl Placement {
    /// Bit encoding used in packed action keys (edge = 0, cloud = 1).
    pub fn bit(self) -> u64 {
        match self {
            Placement::Edge => 0,
            Placement::Cloud => 1,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Edge => write!(f, "edge"),
            Placement::Cloud => write!(f, "cloud"),
        }
    }
}

/// Compact hashable identity of an [`Action`]: layer index plus the
/// assignment bits packed LSB-first (node 0 in bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionKey {
    /// Layer the assignment applies to.
    pub layer: usize,
    /// Packed placement bits, LSB-first.
    pub bits: u64,
}

/// An immutable per-node assignment for one layer.
///
/// Each entry places one node of the layer on the edge device or in the
/// cloud. Boundary layers only ever carry all-edge assignments; the
/// enumeration in [`ActionSpace`] upholds that rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    layer: usize,
    assignments: Vec<Placement>,
}

impl Action {
    /// Assignment placing every node of `layer` on the edge.
    pub fn all_edge(layer: usize, node_count: usize) -> Self {
        Self {
            layer,
            assignments: vec![Placement::Edge; node_count],
        }
    }

    /// Assignment placing every node of `layer` in the cloud.
    pub fn all_cloud(layer: usize, node_count: usize) -> Self {
        Self {
            layer,
            assignments: vec![Placement::Cloud; node_count],
        }
    }

    /// Assignment decoded from packed bits, LSB-first (node 0 in bit 0).
    pub fn from_bits(layer: usize, node_count: usize, bits: u64) -> Self {
        let assignments = (0..node_count)
            .map(|node| {
                if bits >> node & 1 == 1 {
                    Placement::Cloud
                } else {
                    Placement::Edge
                }
            })
            .collect();
        Self { layer, assignments }
    }

    /// Layer this assignment applies to.
    pub fn layer(&self) -> usize {
        self.layer
    }

    /// Per-node placements, indexed by node.
    pub fn assignments(&self) -> &[Placement] {
        &self.assignments
    }

    /// Number of nodes covered.
    pub fn node_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether at least one node is cloud-assigned.
    pub fn has_cloud(&self) -> bool {
        self.assignments.contains(&Placement::Cloud)
    }

    /// Indices of the cloud-assigned nodes.
    pub fn cloud_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Placement::Cloud)
            .map(|(node, _)| node)
    }

    /// Packed placement bits, LSB-first.
    pub fn bits(&self) -> u64 {
        self.assignments
            .iter()
            .enumerate()
            .map(|(node, p)| p.bit() << node)
            .sum()
    }

    /// Hashable key for table lookups.
    pub fn key(&self) -> ActionKey {
        ActionKey {
            layer: self.layer,
            bits: self.bits(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {} [", self.layer)?;
        for (i, p) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

/// Enumerates the legal assignment vectors of each layer in a catalog.
#[derive(Debug, Clone)]
pub struct ActionSpace {
    catalog: Arc<ProfilingCatalog>,
}

impl ActionSpace {
    /// Creates an action space over `catalog`'s topology.
    pub fn new(catalog: Arc<ProfilingCatalog>) -> Self {
        Self { catalog }
    }

    /// All legal actions for `layer`, in a fixed deterministic order.
    ///
    /// Boundary layers admit exactly one action (every node on edge);
    /// interior layers admit all `2^n` placement patterns, ordered so the
    /// node-0 bit varies fastest. A zero-node layer yields one empty action.
    pub fn enumerate(&self, layer: usize) -> Vec<Action> {
        let n = self.catalog.node_count(layer);
        if self.catalog.is_boundary(layer) {
            return vec![Action::all_edge(layer, n)];
        }
        (0..1u64 << n)
            .map(|bits| Action::from_bits(layer, n, bits))
            .collect()
    }
}
