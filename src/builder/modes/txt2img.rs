//! Text-to-image: the base subgraph already is the whole story.

use crate::error::GraphBuildError;
use crate::graph::Graph;
use crate::nodes::ids;

pub(crate) fn add_txt2img(g: &mut Graph) -> Result<String, GraphBuildError> {
    // Denoise the full range from pure noise.
    super::set_denoising_start(g, 0.0)?;
    Ok(ids::FLUX_VAE_DECODE.to_string())
}
