//! Named ports and patchable field names.
//!
//! An edge connects a source node's output port to a target node's input
//! port. Port names are part of the backend contract and must match the
//! node records they belong to.

// Model loader outputs
pub const TRANSFORMER: &str = "transformer";
pub const CLIP: &str = "clip";
pub const T5_ENCODER: &str = "t5_encoder";
pub const MAX_SEQ_LEN: &str = "max_seq_len";
pub const VAE: &str = "vae";

// Text encoder
pub const T5_MAX_SEQ_LEN: &str = "t5_max_seq_len";
pub const CONDITIONING: &str = "conditioning";

// Collectors
pub const ITEM: &str = "item";
pub const COLLECTION: &str = "collection";

// Denoise inputs
pub const POSITIVE_TEXT_CONDITIONING: &str = "positive_text_conditioning";
pub const LORA: &str = "lora";
pub const CONTROL: &str = "control";
pub const IP_ADAPTER: &str = "ip_adapter";
pub const REGIONAL_GUIDANCE: &str = "regional_guidance";
pub const FILL_CONDITIONING: &str = "fill_conditioning";
pub const DENOISE_MASK: &str = "denoise_mask";
pub const LATENTS: &str = "latents";

// Image plumbing
pub const IMAGE: &str = "image";
pub const TARGET_IMAGE: &str = "target_image";

/// Field names callers may patch through a [`FieldLocator`].
///
/// [`FieldLocator`]: crate::graph::FieldLocator
pub mod fields {
    pub const SEED: &str = "seed";
    pub const PROMPT: &str = "prompt";
}
