//! Image-to-image: denoise from the encoded canvas content.

use crate::adapter::CanvasAdapter;
use crate::builder::denoising;
use crate::error::GraphBuildError;
use crate::graph::Graph;
use crate::nodes::ids;
use crate::state::{ParamsState, Rect};

pub(crate) async fn add_img2img(
    g: &mut Graph,
    params: &ParamsState,
    bbox: &Rect,
    adapter: &dyn CanvasAdapter,
) -> Result<String, GraphBuildError> {
    let image = adapter.rasterize_composite(bbox).await?;
    super::add_vae_encode(g, Some(image))?;
    super::set_denoising_start(
        g,
        denoising::denoising_start(params.img2img_strength, params.optimized_denoising),
    )?;
    Ok(ids::FLUX_VAE_DECODE.to_string())
}
