//! Top-level FLUX graph assembly.

use rand::Rng;

use crate::adapter::CanvasAdapter;
use crate::error::GraphBuildError;
use crate::graph::{validate_graph, FieldLocator, Graph, GraphNode};
use crate::metadata;
use crate::nodes::{
    ids, ports, Collect, FluxDenoise, FluxModelLoader, FluxTextEncoder, FluxVaeDecode, Invocation,
};
use crate::state::AppState;

use super::mode::{determine_generation_mode, GenerationMode};
use super::{control, loras, modes, post, ref_images, regional};

/// Guidance forced whenever the FLUX Fill variant runs.
pub const FLUX_FILL_GUIDANCE: f32 = 30.0;

/// User-facing rejection for fill with text- or image-to-image modes.
pub const FLUX_FILL_INCOMPATIBLE: &str =
    "FLUX Fill does not support Text to Image or Image to Image. Please use Inpaint or Outpaint.";

/// A completed build: the wired graph plus stable locations of the two
/// fields callers patch afterwards.
#[derive(Debug)]
pub struct FluxGraphBuild {
    pub graph: Graph,
    /// Where the seed lives (on the denoise node).
    pub seed: FieldLocator,
    /// Where the positive prompt lives (on the text encoder).
    pub positive_prompt: FieldLocator,
}

/// Assemble the complete generation graph for one request.
///
/// Reads the state snapshot, never mutates it; owns the graph
/// exclusively until it is returned. Any error discards the in-progress
/// graph; no partial result is ever exposed.
pub async fn build_flux_graph(
    state: &AppState,
    canvas: Option<&dyn CanvasAdapter>,
) -> Result<FluxGraphBuild, GraphBuildError> {
    let params = &state.params;

    // 1. Required model components.
    let model = params
        .model
        .as_ref()
        .ok_or_else(|| GraphBuildError::MissingState("main model".to_string()))?;
    let t5_encoder = params
        .t5_encoder_model
        .clone()
        .ok_or_else(|| GraphBuildError::MissingState("T5 encoder model".to_string()))?;
    let clip_embed = params
        .clip_embed_model
        .clone()
        .ok_or_else(|| GraphBuildError::MissingState("CLIP embed model".to_string()))?;
    let vae = params
        .vae_model
        .clone()
        .ok_or_else(|| GraphBuildError::MissingState("VAE model".to_string()))?;

    // 2. Generation mode, once per build.
    let mode = determine_generation_mode(&state.canvas, canvas).await?;
    tracing::debug!(%mode, model = %model.identifier.name, "assembling FLUX graph");

    // 3. The fill variant overrides dispatch: two modes are rejected
    //    outright, the rest run with a fixed guidance.
    let is_fill = model.is_fill();
    if is_fill && matches!(mode, GenerationMode::Txt2Img | GenerationMode::Img2Img) {
        return Err(GraphBuildError::UnsupportedGeneration {
            message: FLUX_FILL_INCOMPATIBLE.to_string(),
        });
    }
    let guidance = if is_fill {
        FLUX_FILL_GUIDANCE
    } else {
        params.guidance
    };
    let seed = params.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let bbox = state.canvas.bbox;

    let mut g = Graph::new("flux_graph");

    // 4. Base subgraph: loader -> conditioning -> collector -> denoise
    //    -> decode.
    g.add_node(GraphNode::new(
        ids::FLUX_MODEL_LOADER,
        Invocation::FluxModelLoader(FluxModelLoader {
            model: model.identifier.clone(),
            t5_encoder_model: t5_encoder,
            clip_embed_model: clip_embed,
            vae_model: vae,
        }),
    ))?;
    g.add_node(GraphNode::new(
        ids::POSITIVE_CONDITIONING,
        Invocation::FluxTextEncoder(FluxTextEncoder {
            prompt: params.positive_prompt.clone(),
        }),
    ))?;
    g.add_node(GraphNode::new(
        ids::POSITIVE_CONDITIONING_COLLECT,
        Invocation::Collect(Collect::default()),
    ))?;
    g.add_node(GraphNode::new(
        ids::FLUX_DENOISE,
        Invocation::FluxDenoise(FluxDenoise {
            width: bbox.width,
            height: bbox.height,
            num_steps: params.steps,
            guidance,
            seed,
            denoising_start: 0.0,
            denoising_end: 1.0,
        }),
    ))?;
    g.add_node(GraphNode::new(
        ids::FLUX_VAE_DECODE,
        Invocation::FluxVaeDecode(FluxVaeDecode::default()),
    ))?;

    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::TRANSFORMER,
        ids::FLUX_DENOISE,
        ports::TRANSFORMER,
    )?;
    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::CLIP,
        ids::POSITIVE_CONDITIONING,
        ports::CLIP,
    )?;
    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::T5_ENCODER,
        ids::POSITIVE_CONDITIONING,
        ports::T5_ENCODER,
    )?;
    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::MAX_SEQ_LEN,
        ids::POSITIVE_CONDITIONING,
        ports::T5_MAX_SEQ_LEN,
    )?;
    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::VAE,
        ids::FLUX_VAE_DECODE,
        ports::VAE,
    )?;
    g.add_edge(
        ids::POSITIVE_CONDITIONING,
        ports::CONDITIONING,
        ids::POSITIVE_CONDITIONING_COLLECT,
        ports::ITEM,
    )?;
    g.add_edge(
        ids::POSITIVE_CONDITIONING_COLLECT,
        ports::COLLECTION,
        ids::FLUX_DENOISE,
        ports::POSITIVE_TEXT_CONDITIONING,
    )?;
    g.add_edge(
        ids::FLUX_DENOISE,
        ports::LATENTS,
        ids::FLUX_VAE_DECODE,
        ports::LATENTS,
    )?;

    // 5. Feature sub-builders. Each collector survives only if the
    //    sub-builder wired something into it.
    g.add_node(GraphNode::new(
        ids::LORA_COLLECT,
        Invocation::Collect(Collect::default()),
    ))?;
    let wired = loras::add_loras(&mut g, &state.loras)?;
    connect_or_remove(&mut g, ids::LORA_COLLECT, ports::LORA, wired)?;

    g.add_node(GraphNode::new(
        ids::CONTROL_COLLECT,
        Invocation::Collect(Collect::default()),
    ))?;
    let wired = control::add_control_layers(&mut g, &state.control_layers, &bbox, canvas).await?;
    connect_or_remove(&mut g, ids::CONTROL_COLLECT, ports::CONTROL, wired)?;

    g.add_node(GraphNode::new(
        ids::IP_ADAPTER_COLLECT,
        Invocation::Collect(Collect::default()),
    ))?;
    let wired = ref_images::add_reference_images(&mut g, &state.ref_images)?;
    connect_or_remove(&mut g, ids::IP_ADAPTER_COLLECT, ports::IP_ADAPTER, wired)?;

    g.add_node(GraphNode::new(
        ids::REGIONAL_GUIDANCE_COLLECT,
        Invocation::Collect(Collect::default()),
    ))?;
    let wired =
        regional::add_regional_guidance(&mut g, &state.regional_guidance, &bbox, canvas).await?;
    connect_or_remove(
        &mut g,
        ids::REGIONAL_GUIDANCE_COLLECT,
        ports::REGIONAL_GUIDANCE,
        wired,
    )?;

    // 6. Exactly one mode subgraph decides the output node. The match
    //    is the exhaustiveness guard for new modes.
    let mode_output = if is_fill {
        modes::add_fill(&mut g, mode, &bbox, require_adapter(canvas, mode)?).await?
    } else {
        match mode {
            GenerationMode::Txt2Img => modes::add_txt2img(&mut g)?,
            GenerationMode::Img2Img => {
                modes::add_img2img(&mut g, params, &bbox, require_adapter(canvas, mode)?).await?
            }
            GenerationMode::Inpaint => {
                modes::add_inpaint(&mut g, params, &bbox, require_adapter(canvas, mode)?).await?
            }
            GenerationMode::Outpaint => {
                modes::add_outpaint(&mut g, params, &bbox, require_adapter(canvas, mode)?).await?
            }
        }
    };

    // 7. Post-processing rewrites the output node, never the mode's own.
    let mut output = mode_output;
    if state.features.safety_checker {
        output = post::add_nsfw_checker(&mut g, &output)?;
    }
    if state.features.watermark {
        output = post::add_watermarker(&mut g, &output)?;
    }

    // 8. Full-state metadata snapshot merges last, then the output node
    //    becomes the receiver and gets its field overrides.
    g.upsert_metadata(metadata::state_snapshot(state, mode, seed, guidance));
    g.set_metadata_receiving_node(&output)?;
    g.apply_output_fields(&output, &state.output)?;

    validate_graph(&g)?;
    tracing::debug!(
        graph = %g.id(),
        nodes = g.node_count(),
        edges = g.edge_count(),
        "FLUX graph assembled"
    );

    Ok(FluxGraphBuild {
        graph: g,
        seed: FieldLocator::new(ids::FLUX_DENOISE, ports::fields::SEED),
        positive_prompt: FieldLocator::new(ids::POSITIVE_CONDITIONING, ports::fields::PROMPT),
    })
}

fn require_adapter<'a>(
    canvas: Option<&'a dyn CanvasAdapter>,
    mode: GenerationMode,
) -> Result<&'a dyn CanvasAdapter, GraphBuildError> {
    canvas.ok_or_else(|| GraphBuildError::CanvasAdapterRequired(mode.to_string()))
}

fn connect_or_remove(
    g: &mut Graph,
    collector: &str,
    denoise_port: &str,
    wired: usize,
) -> Result<(), GraphBuildError> {
    if wired > 0 {
        g.add_edge(collector, ports::COLLECTION, ids::FLUX_DENOISE, denoise_port)
    } else {
        g.remove_node(collector)
    }
}
