//! Inpaint: image-to-image constrained by a gradient denoise mask, with
//! the result pasted back over the source.

use crate::adapter::CanvasAdapter;
use crate::builder::denoising;
use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, CoherenceMode, CreateGradientMask, Invocation};
use crate::state::{ParamsState, Rect};

const MASK_EDGE_RADIUS: u32 = 16;

pub(crate) async fn add_inpaint(
    g: &mut Graph,
    params: &ParamsState,
    bbox: &Rect,
    adapter: &dyn CanvasAdapter,
) -> Result<String, GraphBuildError> {
    let image = adapter.rasterize_composite(bbox).await?;
    let mask = adapter.rasterize_inpaint_mask(bbox).await?;

    super::add_vae_encode(g, Some(image.clone()))?;
    super::set_denoising_start(
        g,
        denoising::denoising_start(params.img2img_strength, params.optimized_denoising),
    )?;

    g.add_node(GraphNode::new(
        ids::GRADIENT_MASK,
        Invocation::CreateGradientMask(CreateGradientMask {
            mask: mask.clone(),
            edge_radius: MASK_EDGE_RADIUS,
            coherence_mode: CoherenceMode::Gaussian,
            minimum_denoise: 0.0,
        }),
    ))?;
    g.add_edge(
        ids::GRADIENT_MASK,
        ports::DENOISE_MASK,
        ids::FLUX_DENOISE,
        ports::DENOISE_MASK,
    )?;

    super::add_paste_back(g, image, mask)
}
