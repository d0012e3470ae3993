/// Error types for model loading and triangulation
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for a model load attempt.
///
/// Every variant aborts the load; no partial mesh set is ever returned.
#[derive(Debug, Error)]
pub enum BrepError {
    #[error("failed to load model from file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("no model can be built")]
    EmptyModel,
}

/// Structural problems found while validating a solid document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("vertex identifiers are not a dense range starting at 0 (missing {missing})")]
    VertexIdsNotDense { missing: usize },

    #[error("edge identifiers are not a dense range starting at 0 (missing {missing})")]
    EdgeIdsNotDense { missing: usize },

    #[error("face identifiers are not a dense range starting at 0 (missing {missing})")]
    FaceIdsNotDense { missing: usize },

    #[error("edge {edge} must reference exactly two vertices, found {count}")]
    EdgeVertexCount { edge: usize, count: usize },

    #[error("edge {edge} references vertex {vertex} twice")]
    EdgeDegenerate { edge: usize, vertex: usize },

    #[error("edge {edge} references missing vertex {vertex}")]
    EdgeVertexOutOfRange { edge: usize, vertex: usize },

    #[error("face {face} has {count} edges, at least 3 are required")]
    FaceTooFewEdges { face: usize, count: usize },

    #[error("face {face} references missing edge {edge}")]
    FaceEdgeOutOfRange { face: usize, edge: usize },
}

/// A face whose edges do not form one closed simple cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("edges of face {face} not connected")]
    EdgesNotConnected { face: usize },

    #[error("edges of face {face} do not close into a ring")]
    RingNotClosed { face: usize },
}

pub type BrepResult<T> = Result<T, BrepError>;
