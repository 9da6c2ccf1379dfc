//! Graph assembly: mode derivation, feature sub-builders, mode
//! subgraphs, post-processing, and the top-level entry point.

mod control;
mod denoising;
mod flux;
mod loras;
mod mode;
mod modes;
mod post;
mod ref_images;
mod regional;

pub use denoising::denoising_start;
pub use flux::{build_flux_graph, FluxGraphBuild, FLUX_FILL_GUIDANCE, FLUX_FILL_INCOMPATIBLE};
pub use mode::{determine_generation_mode, GenerationMode};
