//! Generation-mode derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapter::{BboxCoverage, CanvasAdapter};
use crate::error::GraphBuildError;
use crate::state::CanvasState;

/// Mutually exclusive classification of one generation request.
///
/// Derived once per build; the FLUX Fill model variant overrides normal
/// dispatch on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Txt2Img,
    Img2Img,
    Inpaint,
    Outpaint,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Txt2Img => "txt2img",
            GenerationMode::Img2Img => "img2img",
            GenerationMode::Inpaint => "inpaint",
            GenerationMode::Outpaint => "outpaint",
        }
    }

    /// Modes conditioned on canvas pixels, which therefore need the
    /// capability handle.
    pub fn is_image_conditioned(&self) -> bool {
        !matches!(self, GenerationMode::Txt2Img)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the generation mode from the canvas.
///
/// No enabled raster layer means text-to-image and needs no adapter.
/// Otherwise the adapter reports how much of the bbox the raster content
/// covers: an empty bbox still generates from text, partial coverage
/// outpaints, full coverage inpaints when a mask is present and
/// otherwise runs image-to-image.
pub async fn determine_generation_mode(
    canvas: &CanvasState,
    adapter: Option<&dyn CanvasAdapter>,
) -> Result<GenerationMode, GraphBuildError> {
    if !canvas.has_raster_content() {
        return Ok(GenerationMode::Txt2Img);
    }

    let adapter = adapter.ok_or_else(|| {
        GraphBuildError::CanvasAdapterRequired("mode derivation over raster content".to_string())
    })?;

    let mode = match adapter.bbox_coverage(&canvas.bbox).await? {
        BboxCoverage::Empty => GenerationMode::Txt2Img,
        BboxCoverage::Partial => GenerationMode::Outpaint,
        BboxCoverage::Full if canvas.has_inpaint_mask() => GenerationMode::Inpaint,
        BboxCoverage::Full => GenerationMode::Img2Img,
    };
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StaticCanvasAdapter;

    fn canvas(raster: bool, mask: bool) -> CanvasState {
        CanvasState {
            raster_layers: if raster { vec!["r1".into()] } else { vec![] },
            inpaint_masks: if mask { vec!["m1".into()] } else { vec![] },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_canvas_is_txt2img_without_adapter() {
        let mode = determine_generation_mode(&canvas(false, false), None)
            .await
            .unwrap();
        assert_eq!(mode, GenerationMode::Txt2Img);
    }

    #[tokio::test]
    async fn test_raster_content_without_adapter_is_precondition_failure() {
        let err = determine_generation_mode(&canvas(true, false), None)
            .await
            .unwrap_err();
        assert!(matches!(err, GraphBuildError::CanvasAdapterRequired(_)));
    }

    #[tokio::test]
    async fn test_coverage_dispatch() {
        let full = StaticCanvasAdapter::new().with_coverage(BboxCoverage::Full);
        let partial = StaticCanvasAdapter::new().with_coverage(BboxCoverage::Partial);
        let empty = StaticCanvasAdapter::new().with_coverage(BboxCoverage::Empty);

        assert_eq!(
            determine_generation_mode(&canvas(true, false), Some(&full))
                .await
                .unwrap(),
            GenerationMode::Img2Img
        );
        assert_eq!(
            determine_generation_mode(&canvas(true, true), Some(&full))
                .await
                .unwrap(),
            GenerationMode::Inpaint
        );
        assert_eq!(
            determine_generation_mode(&canvas(true, true), Some(&partial))
                .await
                .unwrap(),
            GenerationMode::Outpaint
        );
        assert_eq!(
            determine_generation_mode(&canvas(true, false), Some(&empty))
                .await
                .unwrap(),
            GenerationMode::Txt2Img
        );
    }
}
