//! End-to-end builds over a canned canvas adapter.

use fluxgraph::nodes::{ids, ports};
use fluxgraph::{
    build_flux_graph, AppState, BaseModel, BboxCoverage, CanvasState, ControlLayerEntity,
    GraphBuildError, ImageRef, Invocation, LoraEntity, MainModel, ModelIdentifier, ModelVariant,
    OutputFields, RefImageEntity, StaticCanvasAdapter,
};

fn model_id(name: &str) -> ModelIdentifier {
    ModelIdentifier {
        key: format!("key-{name}"),
        name: name.into(),
        base: BaseModel::Flux,
    }
}

fn base_state(variant: ModelVariant) -> AppState {
    let mut state = AppState {
        params: Default::default(),
        canvas: CanvasState::default(),
        loras: vec![],
        control_layers: vec![],
        ref_images: vec![],
        regional_guidance: vec![],
        features: Default::default(),
        output: OutputFields::default(),
    };
    state.params.model = Some(MainModel {
        identifier: model_id("flux-dev"),
        variant,
    });
    state.params.t5_encoder_model = Some(model_id("t5-xxl"));
    state.params.clip_embed_model = Some(model_id("clip-l"));
    state.params.vae_model = Some(model_id("flux-vae"));
    state.params.positive_prompt = "a lighthouse at dusk".into();
    state.params.seed = Some(1234);
    state
}

fn with_raster(mut state: AppState, mask: bool) -> AppState {
    state.canvas.raster_layers = vec!["r1".into()];
    if mask {
        state.canvas.inpaint_masks = vec!["m1".into()];
    }
    state
}

fn canvas_adapter(coverage: BboxCoverage) -> StaticCanvasAdapter {
    StaticCanvasAdapter::new()
        .with_coverage(coverage)
        .with_composite(ImageRef::new("composite.png"))
        .with_inpaint_mask(ImageRef::new("mask.png"))
}

#[tokio::test]
async fn txt2img_output_is_vae_decode_and_receives_metadata() {
    let state = base_state(ModelVariant::Normal);
    let build = build_flux_graph(&state, None).await.unwrap();

    assert_eq!(
        build.graph.metadata_receiving_node(),
        Some(ids::FLUX_VAE_DECODE)
    );
    assert_eq!(build.seed.node_id, ids::FLUX_DENOISE);
    assert_eq!(build.seed.field, "seed");
    assert_eq!(build.positive_prompt.node_id, ids::POSITIVE_CONDITIONING);
    assert_eq!(build.positive_prompt.field, "prompt");

    match build.graph.invocation(ids::FLUX_DENOISE).unwrap() {
        Invocation::FluxDenoise(d) => {
            assert_eq!(d.seed, 1234);
            assert_eq!(d.denoising_start, 0.0);
        }
        other => panic!("unexpected invocation: {}", other.kind()),
    }
}

#[tokio::test]
async fn each_mode_designates_exactly_one_output_node() {
    // (mask, coverage, expected output node)
    let cases = [
        (false, BboxCoverage::Full, ids::FLUX_VAE_DECODE),
        (true, BboxCoverage::Full, ids::CANVAS_PASTE_BACK),
        (false, BboxCoverage::Partial, ids::CANVAS_PASTE_BACK),
    ];
    for (mask, coverage, expected) in cases {
        let state = with_raster(base_state(ModelVariant::Normal), mask);
        let adapter = canvas_adapter(coverage);
        let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();
        assert_eq!(build.graph.metadata_receiving_node(), Some(expected));
    }
}

#[tokio::test]
async fn fill_variant_rejects_txt2img_and_img2img() {
    // txt2img: no raster content at all.
    let state = base_state(ModelVariant::Fill);
    let err = build_flux_graph(&state, None).await.unwrap_err();
    assert!(matches!(err, GraphBuildError::UnsupportedGeneration { .. }));
    assert!(err.is_user_facing());

    // img2img: fully covered bbox, no mask.
    let state = with_raster(base_state(ModelVariant::Fill), false);
    let adapter = canvas_adapter(BboxCoverage::Full);
    let err = build_flux_graph(&state, Some(&adapter)).await.unwrap_err();
    assert!(matches!(err, GraphBuildError::UnsupportedGeneration { .. }));
}

#[tokio::test]
async fn fill_variant_inpaints_with_fixed_guidance() {
    let state = with_raster(base_state(ModelVariant::Fill), true);
    let adapter = canvas_adapter(BboxCoverage::Full);
    let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();

    assert!(build.graph.has_node(ids::FLUX_FILL));
    assert_eq!(
        build.graph.metadata_receiving_node(),
        Some(ids::CANVAS_PASTE_BACK)
    );
    match build.graph.invocation(ids::FLUX_DENOISE).unwrap() {
        Invocation::FluxDenoise(d) => assert_eq!(d.guidance, fluxgraph::FLUX_FILL_GUIDANCE),
        other => panic!("unexpected invocation: {}", other.kind()),
    }
    assert_eq!(
        build.graph.metadata()["guidance"],
        serde_json::json!(fluxgraph::FLUX_FILL_GUIDANCE)
    );
}

#[tokio::test]
async fn fill_variant_outpaints_through_infill() {
    let state = with_raster(base_state(ModelVariant::Fill), true);
    let adapter = canvas_adapter(BboxCoverage::Partial);
    let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();

    assert!(build.graph.has_node(ids::INFILL));
    assert!(build.graph.has_node(ids::FLUX_FILL));
    // Fill conditions the denoiser directly; no gradient mask involved.
    assert!(!build.graph.has_node(ids::GRADIENT_MASK));
}

#[tokio::test]
async fn unused_feature_collectors_are_removed() {
    let state = base_state(ModelVariant::Normal);
    let build = build_flux_graph(&state, None).await.unwrap();

    for collector in [
        ids::LORA_COLLECT,
        ids::CONTROL_COLLECT,
        ids::IP_ADAPTER_COLLECT,
        ids::REGIONAL_GUIDANCE_COLLECT,
    ] {
        assert!(
            !build.graph.has_node(collector),
            "collector {collector} should have been removed"
        );
    }
}

#[tokio::test]
async fn wired_features_keep_their_collector_connected_to_denoise() {
    let mut state = base_state(ModelVariant::Normal);
    state.loras = vec![LoraEntity {
        model: model_id("ink-style"),
        weight: 0.7,
        enabled: true,
    }];
    state.ref_images = vec![RefImageEntity {
        id: "ref-1".into(),
        enabled: true,
        image: Some(ImageRef::new("ref-1.png")),
        model: Some(model_id("flux-ip")),
        weight: 1.0,
        begin_step_percent: 0.0,
        end_step_percent: 1.0,
    }];

    let build = build_flux_graph(&state, None).await.unwrap();

    for (collector, port) in [
        (ids::LORA_COLLECT, ports::LORA),
        (ids::IP_ADAPTER_COLLECT, ports::IP_ADAPTER),
    ] {
        assert!(build.graph.has_node(collector));
        let incoming = build.graph.incoming_edges(ids::FLUX_DENOISE).unwrap();
        assert!(
            incoming
                .iter()
                .any(|e| e.source == collector && e.target_port == port),
            "collector {collector} not connected to denoise"
        );
    }
    // Features nobody configured still lose their collectors.
    assert!(!build.graph.has_node(ids::CONTROL_COLLECT));

    // Both features contributed metadata; the snapshot's keys joined them.
    let meta = build.graph.metadata();
    assert!(meta.contains_key("loras"));
    assert!(meta.contains_key("ref_images"));
    assert!(meta.contains_key("generation_mode"));
    assert_eq!(meta["seed"], serde_json::json!(1234));
}

#[tokio::test]
async fn control_layers_rasterize_through_the_adapter() {
    let mut state = with_raster(base_state(ModelVariant::Normal), false);
    state.control_layers = vec![ControlLayerEntity {
        id: "c1".into(),
        enabled: true,
        model: Some(model_id("flux-canny")),
        weight: 0.6,
        begin_step_percent: 0.0,
        end_step_percent: 0.8,
    }];
    let adapter =
        canvas_adapter(BboxCoverage::Full).with_control_layer("c1", ImageRef::new("c1.png"));

    let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();

    assert!(build.graph.has_node(ids::CONTROL_COLLECT));
    match build.graph.invocation(&ids::control_net("c1")).unwrap() {
        Invocation::FluxControlNet(cn) => {
            assert_eq!(cn.image, ImageRef::new("c1.png"));
            assert_eq!(cn.end_step_percent, 0.8);
        }
        other => panic!("unexpected invocation: {}", other.kind()),
    }
}

#[tokio::test]
async fn strength_mapping_respects_the_optimized_toggle() {
    for (optimized, expected) in [(false, 0.5f32), (true, 1.0 - 0.5f32.powf(0.2))] {
        let mut state = with_raster(base_state(ModelVariant::Normal), false);
        state.params.img2img_strength = 0.5;
        state.params.optimized_denoising = optimized;
        let adapter = canvas_adapter(BboxCoverage::Full);

        let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();
        match build.graph.invocation(ids::FLUX_DENOISE).unwrap() {
            Invocation::FluxDenoise(d) => assert_eq!(d.denoising_start, expected),
            other => panic!("unexpected invocation: {}", other.kind()),
        }
    }
}

#[tokio::test]
async fn post_processing_rewrites_output_but_not_mode_output() {
    let cases = [
        (false, false, ids::FLUX_VAE_DECODE),
        (true, false, ids::NSFW_DETECTION),
        (false, true, ids::WATERMARK),
        (true, true, ids::WATERMARK),
    ];
    for (safety, watermark, expected) in cases {
        let mut state = base_state(ModelVariant::Normal);
        state.features.safety_checker = safety;
        state.features.watermark = watermark;
        state.output = OutputFields {
            is_intermediate: false,
            board: Some("board-1".into()),
            use_cache: false,
        };

        let build = build_flux_graph(&state, None).await.unwrap();
        assert_eq!(build.graph.metadata_receiving_node(), Some(expected));

        // The mode-specific output node is still there, untouched by the
        // overrides that went to the final output node.
        match build.graph.invocation(ids::FLUX_VAE_DECODE).unwrap() {
            Invocation::FluxVaeDecode(n) => {
                if expected == ids::FLUX_VAE_DECODE {
                    assert!(!n.output.is_intermediate);
                    assert_eq!(n.output.board.as_deref(), Some("board-1"));
                } else {
                    assert!(n.output.is_intermediate);
                    assert_eq!(n.output.board, None);
                }
            }
            other => panic!("unexpected invocation: {}", other.kind()),
        }

        // Both toggles on: the chain is decode -> nsfw -> watermark.
        if safety && watermark {
            let incoming = build.graph.incoming_edges(ids::WATERMARK).unwrap();
            assert_eq!(incoming.len(), 1);
            assert_eq!(incoming[0].source, ids::NSFW_DETECTION);
        }
    }
}

#[tokio::test]
async fn missing_model_components_fail_fast() {
    for strip in ["main", "t5", "clip", "vae"] {
        let mut state = base_state(ModelVariant::Normal);
        match strip {
            "main" => state.params.model = None,
            "t5" => state.params.t5_encoder_model = None,
            "clip" => state.params.clip_embed_model = None,
            _ => state.params.vae_model = None,
        }
        let err = build_flux_graph(&state, None).await.unwrap_err();
        assert!(
            matches!(err, GraphBuildError::MissingState(_)),
            "stripping {strip} should be a precondition failure"
        );
    }
}

#[tokio::test]
async fn raster_content_without_adapter_fails_fast() {
    let state = with_raster(base_state(ModelVariant::Normal), false);
    let err = build_flux_graph(&state, None).await.unwrap_err();
    assert!(matches!(err, GraphBuildError::CanvasAdapterRequired(_)));
}

#[tokio::test]
async fn built_graphs_have_no_dangling_nodes() {
    let state = with_raster(base_state(ModelVariant::Normal), true);
    let adapter = canvas_adapter(BboxCoverage::Full);
    let build = build_flux_graph(&state, Some(&adapter)).await.unwrap();

    assert!(fluxgraph::validate_graph(&build.graph).is_ok());
    assert!(build.graph.has_node(ids::GRADIENT_MASK));
    assert!(build.graph.has_node(ids::FLUX_VAE_ENCODE));
}
