//! Build-level error types.

use std::fmt;

/// Errors raised while assembling a generation graph.
///
/// Two families: precondition failures (`MissingState`,
/// `CanvasAdapterRequired`) that indicate incorrect usage and are never
/// expected at runtime, and user-facing validation errors
/// (`UnsupportedGeneration`) whose message is meant for direct display.
/// The remaining variants are graph-container violations.
///
/// `Display` and `Error` are implemented by hand rather than derived via
/// `thiserror` because `DuplicateEdge` and `CycleDetected` carry a plain
/// `String` field named `source` (a node id, not an error source), which
/// the derive would incorrectly treat as the `Error::source`.
#[derive(Debug)]
pub enum GraphBuildError {
    MissingState(String),
    CanvasAdapterRequired(String),
    UnsupportedGeneration { message: String },
    DuplicateNode(String),
    DuplicateEdge {
        source: String,
        source_port: String,
        target: String,
        target_port: String,
    },
    NodeNotFound(String),
    CycleDetected { source: String, target: String },
    NotAnOutputNode(String),
    GraphValidationError(String),
    Rasterize(String),
}

impl fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphBuildError::MissingState(s) => {
                write!(f, "Required state missing: {s}")
            }
            GraphBuildError::CanvasAdapterRequired(s) => {
                write!(f, "Canvas adapter required for {s} but none was provided")
            }
            GraphBuildError::UnsupportedGeneration { message } => {
                write!(f, "{message}")
            }
            GraphBuildError::DuplicateNode(s) => write!(f, "Duplicate node id: {s}"),
            GraphBuildError::DuplicateEdge {
                source,
                source_port,
                target,
                target_port,
            } => {
                write!(
                    f,
                    "Duplicate edge: {source}.{source_port} -> {target}.{target_port}"
                )
            }
            GraphBuildError::NodeNotFound(s) => write!(f, "Node not found: {s}"),
            GraphBuildError::CycleDetected { source, target } => {
                write!(f, "Edge would create a cycle: {source} -> {target}")
            }
            GraphBuildError::NotAnOutputNode(s) => {
                write!(f, "Node {s} does not produce an image output")
            }
            GraphBuildError::GraphValidationError(s) => {
                write!(f, "Graph validation error: {s}")
            }
            GraphBuildError::Rasterize(s) => {
                write!(f, "Canvas rasterization failed: {s}")
            }
        }
    }
}

impl std::error::Error for GraphBuildError {}

impl GraphBuildError {
    /// Whether the message is suitable for direct display to an end user.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, GraphBuildError::UnsupportedGeneration { .. })
    }
}
