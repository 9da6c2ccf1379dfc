//! Per-feature entities: LoRAs, control layers, reference images and
//! regional guidance.

use serde::{Deserialize, Serialize};

use super::models::ModelIdentifier;

/// Handle to an uploaded or rasterized image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image_name: String,
}

impl ImageRef {
    pub fn new(image_name: impl Into<String>) -> Self {
        ImageRef {
            image_name: image_name.into(),
        }
    }
}

/// A style-adapter (LoRA) selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoraEntity {
    pub model: ModelIdentifier,
    pub weight: f32,
    pub enabled: bool,
}

/// A canvas control layer feeding a ControlNet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlLayerEntity {
    pub id: String,
    pub enabled: bool,
    /// Layers with no model selected are skipped, not errors.
    pub model: Option<ModelIdentifier>,
    pub weight: f32,
    pub begin_step_percent: f32,
    pub end_step_percent: f32,
}

/// A global reference image feeding an IP-Adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefImageEntity {
    pub id: String,
    pub enabled: bool,
    pub image: Option<ImageRef>,
    pub model: Option<ModelIdentifier>,
    pub weight: f32,
    pub begin_step_percent: f32,
    pub end_step_percent: f32,
}

/// A regional-guidance layer: a prompt scoped to a painted mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalGuidanceEntity {
    pub id: String,
    pub enabled: bool,
    pub positive_prompt: Option<String>,
    #[serde(default)]
    pub auto_negative: bool,
}
