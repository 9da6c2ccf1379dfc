//! Canvas geometry and layer presence.

use serde::{Deserialize, Serialize};

/// Generation bounding box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Canvas-side state the builder needs: the bbox plus which raster and
/// mask layers are present. Pixel data stays behind the
/// [`CanvasAdapter`](crate::adapter::CanvasAdapter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasState {
    pub bbox: Rect,
    /// Ids of enabled raster layers.
    #[serde(default)]
    pub raster_layers: Vec<String>,
    /// Ids of enabled inpaint-mask layers.
    #[serde(default)]
    pub inpaint_masks: Vec<String>,
}

impl CanvasState {
    /// A canvas with no enabled raster layers always generates from text.
    pub fn has_raster_content(&self) -> bool {
        !self.raster_layers.is_empty()
    }

    pub fn has_inpaint_mask(&self) -> bool {
        !self.inpaint_masks.is_empty()
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        CanvasState {
            bbox: Rect {
                x: 0,
                y: 0,
                width: 1024,
                height: 1024,
            },
            raster_layers: Vec::new(),
            inpaint_masks: Vec::new(),
        }
    }
}
