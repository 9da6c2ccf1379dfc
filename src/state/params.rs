//! Sampling parameters.

use serde::{Deserialize, Serialize};

use super::models::{MainModel, ModelIdentifier};

/// User-set generation parameters.
///
/// The four model slots are `Option` because the UI lets them be unset;
/// the builder treats a missing slot as a precondition failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsState {
    pub model: Option<MainModel>,
    pub t5_encoder_model: Option<ModelIdentifier>,
    pub clip_embed_model: Option<ModelIdentifier>,
    pub vae_model: Option<ModelIdentifier>,
    #[serde(default)]
    pub positive_prompt: String,
    /// `None` means pick a fresh random seed at build time.
    #[serde(default)]
    pub seed: Option<u32>,
    pub steps: u32,
    pub guidance: f32,
    /// Image-to-image strength in `[0, 1]`.
    pub img2img_strength: f32,
    /// Selects the power-rescaled strength mapping.
    #[serde(default)]
    pub optimized_denoising: bool,
}

impl Default for ParamsState {
    fn default() -> Self {
        ParamsState {
            model: None,
            t5_encoder_model: None,
            clip_embed_model: None,
            vae_model: None,
            positive_prompt: String::new(),
            seed: None,
            steps: 30,
            guidance: 4.0,
            img2img_strength: 0.75,
            optimized_denoising: false,
        }
    }
}
