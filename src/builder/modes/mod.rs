//! Mode-specific subgraphs.
//!
//! Exactly one of these runs per build; each returns the id of the node
//! that becomes the graph's output (before post-processing).

mod fill;
mod img2img;
mod inpaint;
mod outpaint;
mod txt2img;

pub(crate) use fill::add_fill;
pub(crate) use img2img::add_img2img;
pub(crate) use inpaint::add_inpaint;
pub(crate) use outpaint::add_outpaint;
pub(crate) use txt2img::add_txt2img;

use crate::error::GraphBuildError;
use crate::graph::{Graph, GraphNode};
use crate::nodes::{ids, ports, FluxVaeEncode, Invocation, PasteBack};
use crate::state::ImageRef;

/// Whitelisted update: mode subgraphs set where denoising begins.
pub(crate) fn set_denoising_start(g: &mut Graph, start: f32) -> Result<(), GraphBuildError> {
    match g.invocation_mut(ids::FLUX_DENOISE)? {
        Invocation::FluxDenoise(d) => {
            d.denoising_start = start;
            Ok(())
        }
        other => Err(GraphBuildError::GraphValidationError(format!(
            "node {} is {}, expected flux_denoise",
            ids::FLUX_DENOISE,
            other.kind()
        ))),
    }
}

/// Add the image-to-latents step shared by every image-conditioned mode
/// and wire it into the denoiser. `image` is `None` when the pixels
/// arrive over an edge (outpaint infill).
pub(crate) fn add_vae_encode(g: &mut Graph, image: Option<ImageRef>) -> Result<(), GraphBuildError> {
    g.add_node(GraphNode::new(
        ids::FLUX_VAE_ENCODE,
        Invocation::FluxVaeEncode(FluxVaeEncode { image }),
    ))?;
    g.add_edge(
        ids::FLUX_MODEL_LOADER,
        ports::VAE,
        ids::FLUX_VAE_ENCODE,
        ports::VAE,
    )?;
    g.add_edge(
        ids::FLUX_VAE_ENCODE,
        ports::LATENTS,
        ids::FLUX_DENOISE,
        ports::LATENTS,
    )?;
    Ok(())
}

/// Add the paste-back composite that restores generated pixels into the
/// source image, and make it the subgraph output.
pub(crate) fn add_paste_back(
    g: &mut Graph,
    source_image: ImageRef,
    mask: ImageRef,
) -> Result<String, GraphBuildError> {
    g.add_node(GraphNode::new(
        ids::CANVAS_PASTE_BACK,
        Invocation::PasteBack(PasteBack {
            source_image,
            mask,
            output: Default::default(),
        }),
    ))?;
    g.add_edge(
        ids::FLUX_VAE_DECODE,
        ports::IMAGE,
        ids::CANVAS_PASTE_BACK,
        ports::TARGET_IMAGE,
    )?;
    Ok(ids::CANVAS_PASTE_BACK.to_string())
}
