//! FLUX Fill: the masked image conditions the denoiser directly, so no
//! denoise mask or latents wiring is involved. Only reached for inpaint
//! and outpaint; the top-level builder rejects the other modes first.

use crate::adapter::CanvasAdapter;
use crate::builder::GenerationMode;
use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxFill, Infill, InfillMethod, Invocation};
use crate::state::Rect;

pub(crate) async fn add_fill(
    g: &mut Graph,
    mode: GenerationMode,
    bbox: &Rect,
    adapter: &dyn CanvasAdapter,
) -> Result<String, GraphBuildError> {
    let composite = adapter.rasterize_composite(bbox).await?;
    let mask = adapter.rasterize_inpaint_mask(bbox).await?;

    let embedded_image = if mode == GenerationMode::Outpaint {
        // Outpaint geometry: infill first, image arrives over an edge.
        g.add_node(GraphNode::new(
            ids::INFILL,
            Invocation::Infill(Infill {
                image: composite.clone(),
                method: InfillMethod::Tile,
            }),
        ))?;
        None
    } else {
        Some(composite.clone())
    };

    g.add_node(GraphNode::new(
        ids::FLUX_FILL,
        Invocation::FluxFill(FluxFill {
            image: embedded_image,
            mask: mask.clone(),
        }),
    ))?;
    if mode == GenerationMode::Outpaint {
        g.add_edge(ids::INFILL, ports::IMAGE, ids::FLUX_FILL, ports::IMAGE)?;
    }
    g.add_edge(
        ids::FLUX_FILL,
        ports::CONDITIONING,
        ids::FLUX_DENOISE,
        ports::FILL_CONDITIONING,
    )?;

    super::add_paste_back(g, composite, mask)
}
