//! Spatial-subsystem error type.

use thiserror::Error;

use rd_core::NodeId;

/// Errors produced by `rd-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    /// An edge names a node that was never declared.  Fatal at startup.
    #[error("road {from:?} -> {to:?} references undefined node {missing:?}")]
    UnknownNode { from: String, to: String, missing: String },

    #[error("node {0:?} declared more than once")]
    DuplicateNode(String),

    #[error("node {key:?} has non-finite coordinates")]
    InvalidPosition { key: String },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
