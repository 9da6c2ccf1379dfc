//! ControlNet wiring from canvas control layers.

use serde_json::{json, Map};

use crate::adapter::CanvasAdapter;
use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxControlNet, Invocation};
use crate::state::{ControlLayerEntity, Rect};

/// Rasterize each usable control layer and wire a ControlNet node into
/// the control collector. A layer with no model selected is skipped with
/// a warning; an enabled layer with no adapter to rasterize it is a
/// precondition failure.
pub(crate) async fn add_control_layers(
    g: &mut Graph,
    layers: &[ControlLayerEntity],
    bbox: &Rect,
    adapter: Option<&dyn CanvasAdapter>,
) -> Result<usize, GraphBuildError> {
    let mut wired = 0usize;
    let mut meta = Vec::new();

    for layer in layers.iter().filter(|l| l.enabled) {
        let Some(model) = &layer.model else {
            tracing::warn!(layer = %layer.id, "control layer has no model, skipping");
            continue;
        };
        let adapter = adapter.ok_or_else(|| {
            GraphBuildError::CanvasAdapterRequired(format!("control layer {}", layer.id))
        })?;

        let image = adapter.rasterize_control_layer(&layer.id, bbox).await?;
        let node_id = ids::control_net(&layer.id);
        g.add_node(GraphNode::new(
            &node_id,
            Invocation::FluxControlNet(FluxControlNet {
                image,
                control_model: model.clone(),
                control_weight: layer.weight,
                begin_step_percent: layer.begin_step_percent,
                end_step_percent: layer.end_step_percent,
            }),
        ))?;
        g.add_edge(&node_id, ports::CONTROL, ids::CONTROL_COLLECT, ports::ITEM)?;
        meta.push(json!({ "model": model, "weight": layer.weight }));
        wired += 1;
    }

    if wired > 0 {
        let mut m = Map::new();
        m.insert("control_layers".into(), json!(meta));
        g.upsert_metadata(m);
    }
    Ok(wired)
}
