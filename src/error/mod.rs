//! Error types for graph construction.

mod build_error;

pub use build_error::GraphBuildError;
