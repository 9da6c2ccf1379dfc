//! Style-adapter (LoRA) wiring.

use serde_json::{json, Map};

use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxLoraLoader, Invocation};
use crate::state::LoraEntity;

/// Wire one loader node per enabled LoRA into the LoRA collector.
///
/// Returns how many were wired; the caller decides the collector's fate
/// from the count. Contributes the `loras` metadata entry when any were
/// wired.
pub(crate) fn add_loras(g: &mut Graph, loras: &[LoraEntity]) -> Result<usize, GraphBuildError> {
    let mut wired = 0usize;
    let mut meta = Vec::new();

    for lora in loras.iter().filter(|l| l.enabled) {
        let node_id = ids::lora_loader(wired);
        g.add_node(GraphNode::new(
            &node_id,
            Invocation::FluxLoraLoader(FluxLoraLoader {
                lora: lora.model.clone(),
                weight: lora.weight,
            }),
        ))?;
        g.add_edge(&node_id, ports::LORA, ids::LORA_COLLECT, ports::ITEM)?;
        meta.push(json!({ "model": lora.model, "weight": lora.weight }));
        wired += 1;
    }

    if wired > 0 {
        let mut m = Map::new();
        m.insert("loras".into(), json!(meta));
        g.upsert_metadata(m);
    }
    Ok(wired)
}
