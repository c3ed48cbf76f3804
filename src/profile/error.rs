use thiserror::Error;

/// Errors detected while validating profiling data at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Topology must contain at least one layer")]
    EmptyTopology,

    #[error("Layer {layer} has zero nodes")]
    EmptyLayer { layer: usize },

    #[error("Layer {layer} has {nodes} nodes; at most {max} are enumerable")]
    LayerTooWide {
        layer: usize,
        nodes: usize,
        max: usize,
    },

    #[error("Deadline must be positive, got {0} ms")]
    NonPositiveDeadline(f64),

    #[error("Parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
