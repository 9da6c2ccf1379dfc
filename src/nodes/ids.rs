//! Well-known node ids.
//!
//! Node ids are fixed per graph so callers can patch fields (seed,
//! prompt) without re-walking the node set. Per-item nodes added by the
//! feature sub-builders get an index suffix.

pub const FLUX_MODEL_LOADER: &str = "flux_model_loader";
pub const POSITIVE_CONDITIONING: &str = "positive_conditioning";
pub const POSITIVE_CONDITIONING_COLLECT: &str = "positive_conditioning_collect";
pub const FLUX_DENOISE: &str = "flux_denoise";
pub const FLUX_VAE_DECODE: &str = "flux_vae_decode";
pub const FLUX_VAE_ENCODE: &str = "flux_vae_encode";

pub const LORA_COLLECT: &str = "lora_collect";
pub const CONTROL_COLLECT: &str = "control_collect";
pub const IP_ADAPTER_COLLECT: &str = "ip_adapter_collect";
pub const REGIONAL_GUIDANCE_COLLECT: &str = "regional_guidance_collect";

pub const FLUX_FILL: &str = "flux_fill";
pub const INFILL: &str = "infill";
pub const GRADIENT_MASK: &str = "gradient_mask";
pub const CANVAS_PASTE_BACK: &str = "canvas_paste_back";
pub const NSFW_DETECTION: &str = "nsfw_detection";
pub const WATERMARK: &str = "watermark";

pub fn lora_loader(index: usize) -> String {
    format!("lora_loader_{index}")
}

pub fn control_net(layer_id: &str) -> String {
    format!("control_net_{layer_id}")
}

pub fn ip_adapter(entity_id: &str) -> String {
    format!("ip_adapter_{entity_id}")
}

pub fn regional_conditioning(region_id: &str) -> String {
    format!("regional_conditioning_{region_id}")
}
