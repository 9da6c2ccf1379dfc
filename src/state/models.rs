//! Model identifiers and variants.

use serde::{Deserialize, Serialize};

/// Stable reference to an installed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentifier {
    /// Install-unique key the backend resolves models by.
    pub key: String,
    /// Human-readable name, recorded in metadata.
    pub name: String,
    pub base: BaseModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseModel {
    Flux,
    Sd1,
    Sdxl,
}

/// Main transformer model plus its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainModel {
    pub identifier: ModelIdentifier,
    #[serde(default)]
    pub variant: ModelVariant,
}

/// The `Fill` variant (FLUX Fill) overrides normal mode dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    #[default]
    Normal,
    Fill,
}

impl MainModel {
    pub fn is_fill(&self) -> bool {
        self.variant == ModelVariant::Fill
    }
}
