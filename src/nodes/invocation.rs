//! Typed operation records.
//!
//! Every node in a generation graph carries one `Invocation`. The enum is
//! internally tagged so a serialized node embeds its backend type name,
//! e.g. `{"type": "flux_denoise", ...}`.

use serde::{Deserialize, Serialize};

use crate::error::GraphBuildError;
use crate::state::{ImageRef, ModelIdentifier};

/// One operation node, discriminated by backend type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Invocation {
    #[serde(rename = "flux_model_loader")]
    FluxModelLoader(FluxModelLoader),
    #[serde(rename = "flux_text_encoder")]
    FluxTextEncoder(FluxTextEncoder),
    #[serde(rename = "collect")]
    Collect(Collect),
    #[serde(rename = "flux_denoise")]
    FluxDenoise(FluxDenoise),
    #[serde(rename = "flux_vae_encode")]
    FluxVaeEncode(FluxVaeEncode),
    #[serde(rename = "flux_vae_decode")]
    FluxVaeDecode(FluxVaeDecode),
    #[serde(rename = "flux_lora_loader")]
    FluxLoraLoader(FluxLoraLoader),
    #[serde(rename = "flux_controlnet")]
    FluxControlNet(FluxControlNet),
    #[serde(rename = "flux_ip_adapter")]
    FluxIpAdapter(FluxIpAdapter),
    #[serde(rename = "flux_regional_conditioning")]
    FluxRegionalConditioning(FluxRegionalConditioning),
    #[serde(rename = "flux_fill")]
    FluxFill(FluxFill),
    #[serde(rename = "infill")]
    Infill(Infill),
    #[serde(rename = "create_gradient_mask")]
    CreateGradientMask(CreateGradientMask),
    #[serde(rename = "canvas_paste_back")]
    PasteBack(PasteBack),
    #[serde(rename = "img_nsfw")]
    ImageNsfwDetection(ImageNsfwDetection),
    #[serde(rename = "img_watermark")]
    ImageWatermark(ImageWatermark),
}

impl Invocation {
    /// Backend type name of this operation.
    pub fn kind(&self) -> &'static str {
        match self {
            Invocation::FluxModelLoader(_) => "flux_model_loader",
            Invocation::FluxTextEncoder(_) => "flux_text_encoder",
            Invocation::Collect(_) => "collect",
            Invocation::FluxDenoise(_) => "flux_denoise",
            Invocation::FluxVaeEncode(_) => "flux_vae_encode",
            Invocation::FluxVaeDecode(_) => "flux_vae_decode",
            Invocation::FluxLoraLoader(_) => "flux_lora_loader",
            Invocation::FluxControlNet(_) => "flux_controlnet",
            Invocation::FluxIpAdapter(_) => "flux_ip_adapter",
            Invocation::FluxRegionalConditioning(_) => "flux_regional_conditioning",
            Invocation::FluxFill(_) => "flux_fill",
            Invocation::Infill(_) => "infill",
            Invocation::CreateGradientMask(_) => "create_gradient_mask",
            Invocation::PasteBack(_) => "canvas_paste_back",
            Invocation::ImageNsfwDetection(_) => "img_nsfw",
            Invocation::ImageWatermark(_) => "img_watermark",
        }
    }

    /// Whether this node produces a final image and accepts output-field
    /// overrides.
    pub fn is_image_output(&self) -> bool {
        matches!(
            self,
            Invocation::FluxVaeDecode(_)
                | Invocation::PasteBack(_)
                | Invocation::ImageNsfwDetection(_)
                | Invocation::ImageWatermark(_)
        )
    }

    /// Whitelisted update: override the output fields on an image-output
    /// node. Any other node kind is rejected.
    pub fn apply_output_fields(&mut self, fields: &OutputFields) -> Result<(), GraphBuildError> {
        let out = match self {
            Invocation::FluxVaeDecode(n) => &mut n.output,
            Invocation::PasteBack(n) => &mut n.output,
            Invocation::ImageNsfwDetection(n) => &mut n.output,
            Invocation::ImageWatermark(n) => &mut n.output,
            other => return Err(GraphBuildError::NotAnOutputNode(other.kind().to_string())),
        };
        *out = fields.clone();
        Ok(())
    }
}

/// Output-field overrides applied to the final output node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFields {
    /// Intermediate images are hidden from galleries.
    pub is_intermediate: bool,
    /// Destination board for the result image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    /// Result images are never served from cache.
    pub use_cache: bool,
}

impl Default for OutputFields {
    fn default() -> Self {
        OutputFields {
            is_intermediate: true,
            board: None,
            use_cache: true,
        }
    }
}

/// Loads the transformer plus its companion encoder and VAE models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxModelLoader {
    pub model: ModelIdentifier,
    pub t5_encoder_model: ModelIdentifier,
    pub clip_embed_model: ModelIdentifier,
    pub vae_model: ModelIdentifier,
}

/// Encodes the positive prompt into text conditioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxTextEncoder {
    pub prompt: String,
}

/// Gathers items wired into its `item` port into one collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collect {}

/// The shared denoising step every subgraph feeds into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxDenoise {
    pub width: u32,
    pub height: u32,
    pub num_steps: u32,
    pub guidance: f32,
    pub seed: u32,
    pub denoising_start: f32,
    pub denoising_end: f32,
}

/// Encodes an initial image into latents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluxVaeEncode {
    /// Absent when the image arrives over an edge (e.g. from infill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// Decodes denoised latents into the result image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluxVaeDecode {
    #[serde(flatten)]
    pub output: OutputFields,
}

/// Applies one LoRA to the transformer weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxLoraLoader {
    pub lora: ModelIdentifier,
    pub weight: f32,
}

/// ControlNet conditioning from a rasterized control layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxControlNet {
    pub image: ImageRef,
    pub control_model: ModelIdentifier,
    pub control_weight: f32,
    pub begin_step_percent: f32,
    pub end_step_percent: f32,
}

/// IP-Adapter conditioning from a reference image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxIpAdapter {
    pub image: ImageRef,
    pub ip_adapter_model: ModelIdentifier,
    pub weight: f32,
    pub begin_step_percent: f32,
    pub end_step_percent: f32,
}

/// Prompt conditioning restricted to a rasterized region mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxRegionalConditioning {
    pub prompt: String,
    pub mask: ImageRef,
    pub auto_negative: bool,
}

/// FLUX Fill conditioning: the masked image drives the denoise step
/// directly instead of a denoise mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxFill {
    /// Absent when the image arrives over an edge (outpaint infill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub mask: ImageRef,
}

/// Fills transparent areas of a partially covered raster before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infill {
    pub image: ImageRef,
    pub method: InfillMethod,
}

/// Infill strategy for outpainted area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfillMethod {
    Tile,
    Color { r: u8, g: u8, b: u8, a: u8 },
}

/// Expands a hard inpaint mask into a gradient denoise mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGradientMask {
    pub mask: ImageRef,
    pub edge_radius: u32,
    pub coherence_mode: CoherenceMode,
    pub minimum_denoise: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceMode {
    Gaussian,
    BoxBlur,
    Staged,
}

/// Composites the generated region back over the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasteBack {
    pub source_image: ImageRef,
    pub mask: ImageRef,
    #[serde(flatten)]
    pub output: OutputFields,
}

/// Safety filter over the result image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageNsfwDetection {
    #[serde(flatten)]
    pub output: OutputFields,
}

/// Invisible watermark over the result image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWatermark {
    pub text: String,
    #[serde(flatten)]
    pub output: OutputFields,
}

impl Default for ImageWatermark {
    fn default() -> Self {
        ImageWatermark {
            text: "fluxgraph".to_string(),
            output: OutputFields::default(),
        }
    }
}
