//! Canvas capability handle.
//!
//! Rasterization lives outside this crate; the builder only needs a
//! narrow async surface over it. Hosts with a live canvas implement
//! [`CanvasAdapter`]; headless callers and tests use
//! [`StaticCanvasAdapter`] with preloaded refs.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::GraphBuildError;
use crate::state::{ImageRef, Rect};

/// How much of the generation bbox the composite raster content covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BboxCoverage {
    Full,
    Partial,
    Empty,
}

/// Rasterization failure reported by the host.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RasterizeError(pub String);

impl RasterizeError {
    pub fn new(msg: impl Into<String>) -> Self {
        RasterizeError(msg.into())
    }
}

impl From<RasterizeError> for GraphBuildError {
    fn from(value: RasterizeError) -> Self {
        GraphBuildError::Rasterize(value.0)
    }
}

/// Capability handle for canvas-derived operations.
///
/// Required for any image-conditioned mode and for canvas-derived
/// feature layers; the builder treats its absence in those cases as a
/// precondition failure.
#[async_trait]
pub trait CanvasAdapter: Send + Sync {
    /// Alpha coverage of the bbox by enabled raster layers.
    async fn bbox_coverage(&self, bbox: &Rect) -> Result<BboxCoverage, RasterizeError>;

    /// Composite of all enabled raster layers, cropped to the bbox.
    async fn rasterize_composite(&self, bbox: &Rect) -> Result<ImageRef, RasterizeError>;

    /// Combined inpaint mask, cropped to the bbox. For outpaint builds
    /// the mask also covers the transparent remainder of the bbox.
    async fn rasterize_inpaint_mask(&self, bbox: &Rect) -> Result<ImageRef, RasterizeError>;

    /// One control layer, cropped to the bbox.
    async fn rasterize_control_layer(
        &self,
        layer_id: &str,
        bbox: &Rect,
    ) -> Result<ImageRef, RasterizeError>;

    /// One regional-guidance mask, cropped to the bbox.
    async fn rasterize_regional_mask(
        &self,
        region_id: &str,
        bbox: &Rect,
    ) -> Result<ImageRef, RasterizeError>;
}

/// Canned adapter serving preloaded image refs.
#[derive(Debug, Default)]
pub struct StaticCanvasAdapter {
    coverage: Option<BboxCoverage>,
    composite: Option<ImageRef>,
    inpaint_mask: Option<ImageRef>,
    control_layers: HashMap<String, ImageRef>,
    regional_masks: HashMap<String, ImageRef>,
}

impl StaticCanvasAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coverage(mut self, coverage: BboxCoverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn with_composite(mut self, image: ImageRef) -> Self {
        self.composite = Some(image);
        self
    }

    pub fn with_inpaint_mask(mut self, image: ImageRef) -> Self {
        self.inpaint_mask = Some(image);
        self
    }

    pub fn with_control_layer(mut self, layer_id: impl Into<String>, image: ImageRef) -> Self {
        self.control_layers.insert(layer_id.into(), image);
        self
    }

    pub fn with_regional_mask(mut self, region_id: impl Into<String>, image: ImageRef) -> Self {
        self.regional_masks.insert(region_id.into(), image);
        self
    }
}

#[async_trait]
impl CanvasAdapter for StaticCanvasAdapter {
    async fn bbox_coverage(&self, _bbox: &Rect) -> Result<BboxCoverage, RasterizeError> {
        self.coverage
            .ok_or_else(|| RasterizeError::new("no coverage registered"))
    }

    async fn rasterize_composite(&self, _bbox: &Rect) -> Result<ImageRef, RasterizeError> {
        self.composite
            .clone()
            .ok_or_else(|| RasterizeError::new("no composite registered"))
    }

    async fn rasterize_inpaint_mask(&self, _bbox: &Rect) -> Result<ImageRef, RasterizeError> {
        self.inpaint_mask
            .clone()
            .ok_or_else(|| RasterizeError::new("no inpaint mask registered"))
    }

    async fn rasterize_control_layer(
        &self,
        layer_id: &str,
        _bbox: &Rect,
    ) -> Result<ImageRef, RasterizeError> {
        self.control_layers
            .get(layer_id)
            .cloned()
            .ok_or_else(|| RasterizeError::new(format!("no control layer: {layer_id}")))
    }

    async fn rasterize_regional_mask(
        &self,
        region_id: &str,
        _bbox: &Rect,
    ) -> Result<ImageRef, RasterizeError> {
        self.regional_masks
            .get(region_id)
            .cloned()
            .ok_or_else(|| RasterizeError::new(format!("no regional mask: {region_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 512,
            height: 512,
        }
    }

    #[tokio::test]
    async fn test_static_adapter_serves_registered_refs() {
        let adapter = StaticCanvasAdapter::new()
            .with_coverage(BboxCoverage::Full)
            .with_composite(ImageRef::new("composite.png"))
            .with_control_layer("layer-1", ImageRef::new("layer-1.png"));

        assert_eq!(
            adapter.bbox_coverage(&bbox()).await.unwrap(),
            BboxCoverage::Full
        );
        assert_eq!(
            adapter.rasterize_composite(&bbox()).await.unwrap(),
            ImageRef::new("composite.png")
        );
        assert_eq!(
            adapter
                .rasterize_control_layer("layer-1", &bbox())
                .await
                .unwrap(),
            ImageRef::new("layer-1.png")
        );
    }

    #[tokio::test]
    async fn test_static_adapter_missing_entries_error() {
        let adapter = StaticCanvasAdapter::new();
        assert!(adapter.bbox_coverage(&bbox()).await.is_err());
        assert!(adapter.rasterize_composite(&bbox()).await.is_err());
        let err: GraphBuildError = adapter
            .rasterize_inpaint_mask(&bbox())
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, GraphBuildError::Rasterize(_)));
    }
}
