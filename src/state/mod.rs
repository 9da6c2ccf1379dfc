//! Read-only application-state snapshot consumed by the builder.
//!
//! The snapshot is externally owned; the builder never mutates it. All
//! types deserialize from the host application's serialized state.

pub mod canvas;
pub mod entities;
pub mod models;
pub mod params;

use serde::{Deserialize, Serialize};

pub use canvas::{CanvasState, Rect};
pub use entities::{
    ControlLayerEntity, ImageRef, LoraEntity, RefImageEntity, RegionalGuidanceEntity,
};
pub use models::{BaseModel, MainModel, ModelIdentifier, ModelVariant};
pub use params::ParamsState;

use crate::nodes::OutputFields;

/// Post-processing toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureToggles {
    #[serde(default)]
    pub safety_checker: bool,
    #[serde(default)]
    pub watermark: bool,
}

/// The full snapshot one build reads from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub params: ParamsState,
    pub canvas: CanvasState,
    #[serde(default)]
    pub loras: Vec<LoraEntity>,
    #[serde(default)]
    pub control_layers: Vec<ControlLayerEntity>,
    #[serde(default)]
    pub ref_images: Vec<RefImageEntity>,
    #[serde(default)]
    pub regional_guidance: Vec<RegionalGuidanceEntity>,
    #[serde(default)]
    pub features: FeatureToggles,
    /// Overrides applied to whichever node ends up as the output.
    #[serde(default = "OutputFields::default")]
    pub output: OutputFields,
}
