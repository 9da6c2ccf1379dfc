//! Outpaint: infill the uncovered bbox area, then inpaint over the
//! expanded mask.

use crate::adapter::CanvasAdapter;
use crate::builder::denoising;
use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, CoherenceMode, CreateGradientMask, Infill, InfillMethod, Invocation};
use crate::state::{ParamsState, Rect};

const MASK_EDGE_RADIUS: u32 = 16;

pub(crate) async fn add_outpaint(
    g: &mut Graph,
    params: &ParamsState,
    bbox: &Rect,
    adapter: &dyn CanvasAdapter,
) -> Result<String, GraphBuildError> {
    let composite = adapter.rasterize_composite(bbox).await?;
    // The adapter extends the inpaint mask over the transparent remainder
    // of the bbox, so the infilled area is regenerated too.
    let mask = adapter.rasterize_inpaint_mask(bbox).await?;

    g.add_node(GraphNode::new(
        ids::INFILL,
        Invocation::Infill(Infill {
            image: composite.clone(),
            method: InfillMethod::Tile,
        }),
    ))?;

    super::add_vae_encode(g, None)?;
    g.add_edge(
        ids::INFILL,
        ports::IMAGE,
        ids::FLUX_VAE_ENCODE,
        ports::IMAGE,
    )?;
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

    super::add_paste_back(g, composite, mask)
}
