use thiserror::Error;

/// Errors raised while converting between the stored filter tree and the graph model.
///
/// Every variant indicates malformed or corrupted storage; none of them are recoverable
/// locally and they are surfaced to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Root node '{0}' not found in the filter")]
    MissingRoot(String),

    #[error(
        "Node '{missing_node_id}' not found, which is listed as a child of node '{parent_node_id}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        parent_node_id: String,
    },

    #[error("Filter entry '{key}' carries a mismatching id '{id}'")]
    IdMismatch { key: String, id: String },
}

/// Errors that can occur while assigning layers to a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Graph contains a cycle; {} node(s) could not be layered: {}", .unresolved.len(), .unresolved.join(", "))]
    CyclicGraph { unresolved: Vec<String> },
}

/// Structural invariant violations reported by `Dag::validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Root node '{0}' is not part of the graph")]
    MissingRoot(String),

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not part of the graph")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Edge '{0}' appears more than once")]
    DuplicateEdge(String),
}

/// Edits rejected by an `EditSession`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("The root node '{0}' cannot be removed")]
    RootRemoval(String),

    #[error("Node '{0}' does not exist in the graph")]
    UnknownNode(String),
}

/// A comparison symbol other than `<`, `=` or `>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown operator '{0}'. Use <, = or >.")]
pub struct UnknownOperator(pub String);

/// Errors that can occur when reading or writing a filter document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to access filter document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse filter document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when saving or loading a session snapshot.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Snapshot error: {0}")]
    Generic(String),
}
