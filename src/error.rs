use thiserror::Error;

/// All possible errors when ordering a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error(
        "Edge #{index} ({from} -> {to}) is out of range: vertices must be below {num_nodes}"
    )]
    InvalidEdge {
        index: usize,
        from: usize,
        to: usize,
        num_nodes: usize,
    },

    #[error("Graph contains a cycle: {unresolved} {noun} could not be ordered", noun = vertex_noun(*unresolved))]
    CycleDetected { unresolved: usize },
}

impl SortError {
    /// True for the cycle signal, false for rejected input
    pub fn is_cycle(&self) -> bool {
        matches!(self, SortError::CycleDetected { .. })
    }
}

fn vertex_noun(count: usize) -> &'static str {
    if count == 1 { "vertex" } else { "vertices" }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SortError>;
