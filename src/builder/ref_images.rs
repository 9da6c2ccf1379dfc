//! IP-Adapter wiring from global reference images.

use serde_json::{json, Map};

use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxIpAdapter, Invocation};
use crate::state::RefImageEntity;

/// Wire one IP-Adapter node per usable reference image into its
/// collector. Entities missing an image or a model are skipped, not
/// errors: the UI allows half-configured entries.
pub(crate) fn add_reference_images(
    g: &mut Graph,
    refs: &[RefImageEntity],
) -> Result<usize, GraphBuildError> {
    let mut wired = 0usize;
    let mut meta = Vec::new();

    for entity in refs.iter().filter(|r| r.enabled) {
        let (Some(image), Some(model)) = (&entity.image, &entity.model) else {
            tracing::warn!(entity = %entity.id, "reference image incomplete, skipping");
            continue;
        };

        let node_id = ids::ip_adapter(&entity.id);
        g.add_node(GraphNode::new(
            &node_id,
            Invocation::FluxIpAdapter(FluxIpAdapter {
                image: image.clone(),
                ip_adapter_model: model.clone(),
                weight: entity.weight,
                begin_step_percent: entity.begin_step_percent,
                end_step_percent: entity.end_step_percent,
            }),
        ))?;
        g.add_edge(
            &node_id,
            ports::IP_ADAPTER,
            ids::IP_ADAPTER_COLLECT,
            ports::ITEM,
        )?;
        meta.push(json!({ "model": model, "weight": entity.weight }));
        wired += 1;
    }

    if wired > 0 {
        let mut m = Map::new();
        m.insert("ref_images".into(), json!(meta));
        g.upsert_metadata(m);
    }
    Ok(wired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Collect;
    use crate::state::{BaseModel, ImageRef, ModelIdentifier};

    fn entity(id: &str, image: bool, model: bool) -> RefImageEntity {
        RefImageEntity {
            id: id.into(),
            enabled: true,
            image: image.then(|| ImageRef::new(format!("{id}.png"))),
            model: model.then(|| ModelIdentifier {
                key: "ip".into(),
                name: "flux-ip".into(),
                base: BaseModel::Flux,
            }),
            weight: 1.0,
            begin_step_percent: 0.0,
            end_step_percent: 1.0,
        }
    }

    #[test]
    fn test_incomplete_entities_are_skipped() {
        let mut g = Graph::new("t");
        g.add_node(GraphNode::new(
            ids::IP_ADAPTER_COLLECT,
            Invocation::Collect(Collect::default()),
        ))
        .unwrap();

        let wired = add_reference_images(
            &mut g,
            &[
                entity("full", true, true),
                entity("no-image", false, true),
                entity("no-model", true, false),
            ],
        )
        .unwrap();

        assert_eq!(wired, 1);
        assert!(g.has_node(&ids::ip_adapter("full")));
        assert!(!g.has_node(&ids::ip_adapter("no-image")));
        assert_eq!(g.metadata()["ref_images"].as_array().unwrap().len(), 1);
    }
}
