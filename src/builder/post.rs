//! Post-processing: safety filter and watermark.
//!
//! Each takes the current output node's image and becomes the new
//! output; the mode-specific output node itself is never touched.

use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, ImageNsfwDetection, ImageWatermark, Invocation};

pub(crate) fn add_nsfw_checker(
    g: &mut Graph,
    current_output: &str,
) -> Result<String, GraphBuildError> {
    g.add_node(GraphNode::new(
        ids::NSFW_DETECTION,
        Invocation::ImageNsfwDetection(ImageNsfwDetection::default()),
    ))?;
    g.add_edge(current_output, ports::IMAGE, ids::NSFW_DETECTION, ports::IMAGE)?;
    Ok(ids::NSFW_DETECTION.to_string())
}

pub(crate) fn add_watermarker(
    g: &mut Graph,
    current_output: &str,
) -> Result<String, GraphBuildError> {
    g.add_node(GraphNode::new(
        ids::WATERMARK,
        Invocation::ImageWatermark(ImageWatermark::default()),
    ))?;
    g.add_edge(current_output, ports::IMAGE, ids::WATERMARK, ports::IMAGE)?;
    Ok(ids::WATERMARK.to_string())
}
