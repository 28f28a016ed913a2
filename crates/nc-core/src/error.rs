use crate::id::NodeId;

/// Failures of the store-level operations. Interaction and rendering never
/// produce errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("malformed graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
}
