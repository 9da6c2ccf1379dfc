//! Regional-guidance wiring: prompts scoped to painted region masks.

use crate::adapter::CanvasAdapter;
use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxRegionalConditioning, Invocation};
use crate::state::{Rect, RegionalGuidanceEntity};

/// Rasterize each region's mask and wire a regional-conditioning node
/// into the regional collector. Regions without a prompt are skipped;
/// an enabled region with no adapter is a precondition failure.
pub(crate) async fn add_regional_guidance(
    g: &mut Graph,
    regions: &[RegionalGuidanceEntity],
    bbox: &Rect,
    adapter: Option<&dyn CanvasAdapter>,
) -> Result<usize, GraphBuildError> {
    let mut wired = 0usize;

    for region in regions.iter().filter(|r| r.enabled) {
        let Some(prompt) = region.positive_prompt.as_deref().filter(|p| !p.is_empty()) else {
            tracing::warn!(region = %region.id, "regional guidance has no prompt, skipping");
            continue;
        };
        let adapter = adapter.ok_or_else(|| {
            GraphBuildError::CanvasAdapterRequired(format!("regional guidance {}", region.id))
        })?;

        let mask = adapter.rasterize_regional_mask(&region.id, bbox).await?;
        let node_id = ids::regional_conditioning(&region.id);
        g.add_node(GraphNode::new(
            &node_id,
            Invocation::FluxRegionalConditioning(FluxRegionalConditioning {
                prompt: prompt.to_string(),
                mask,
                auto_negative: region.auto_negative,
            }),
        ))?;
        g.add_edge(
            &node_id,
            ports::CONDITIONING,
            ids::REGIONAL_GUIDANCE_COLLECT,
            ports::ITEM,
        )?;
        wired += 1;
    }

    Ok(wired)
}
