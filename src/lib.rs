//! # fluxgraph — Generation-Graph Assembly for FLUX Backends
//!
//! `fluxgraph` assembles the node graph a FLUX image-generation backend
//! executes for one request. Given a read-only application-state
//! snapshot (model selection, sampling parameters, canvas geometry,
//! reference images, regional guidance, feature toggles) and an optional
//! canvas capability handle, it produces a directed acyclic graph of
//! typed operation nodes wired between named ports, with support for:
//!
//! - **Mode dispatch**: text-to-image, image-to-image, inpaint and
//!   outpaint derived from canvas contents, plus the FLUX Fill model
//!   variant that overrides normal dispatch.
//! - **Feature wiring**: LoRAs, ControlNet layers, IP-Adapter reference
//!   images and regional guidance, each behind a collector node that is
//!   dropped again when nothing wired into it.
//! - **Post-processing**: optional safety filter and watermark steps
//!   that rewrite which node is the graph's output.
//! - **Metadata**: an accumulating side-channel merged from feature
//!   sub-builders and a final full-state snapshot, attached to the
//!   output node.
//! - **Patchability**: stable [`FieldLocator`]s for the seed and the
//!   positive prompt, so callers can patch either without re-walking
//!   the graph.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fluxgraph::{build_flux_graph, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state: AppState = serde_json::from_str("...").unwrap();
//!     let build = build_flux_graph(&state, None).await.unwrap();
//!     println!("{} nodes", build.graph.node_count());
//! }
//! ```

pub mod adapter;
pub mod builder;
pub mod error;
pub mod graph;
pub mod metadata;
pub mod nodes;
pub mod state;

pub use crate::adapter::{BboxCoverage, CanvasAdapter, RasterizeError, StaticCanvasAdapter};
pub use crate::builder::{
    build_flux_graph, denoising_start, determine_generation_mode, FluxGraphBuild, GenerationMode,
    FLUX_FILL_GUIDANCE, FLUX_FILL_INCOMPATIBLE,
};
pub use crate::error::GraphBuildError;
pub use crate::graph::{validate_graph, FieldLocator, Graph, GraphEdge, GraphNode};
pub use crate::nodes::{Invocation, OutputFields};
pub use crate::state::{
    AppState, BaseModel, CanvasState, ControlLayerEntity, FeatureToggles, ImageRef, LoraEntity,
    MainModel, ModelIdentifier, ModelVariant, ParamsState, Rect, RefImageEntity,
    RegionalGuidanceEntity,
};
