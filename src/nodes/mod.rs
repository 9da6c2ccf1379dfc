//! Typed operation nodes and the well-known ids/ports they expose.

pub mod ids;
pub mod invocation;
pub mod ports;

pub use invocation::{
    CoherenceMode, Collect, CreateGradientMask, FluxControlNet, FluxDenoise, FluxFill,
    FluxIpAdapter, FluxLoraLoader, FluxModelLoader, FluxRegionalConditioning, FluxTextEncoder,
    FluxVaeDecode, FluxVaeEncode, ImageNsfwDetection, ImageWatermark, Infill, InfillMethod,
    Invocation, OutputFields, PasteBack,
};
