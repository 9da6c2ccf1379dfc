//! Metadata accumulation.
//!
//! Feature sub-builders contribute their own entries while they run; the
//! full-state snapshot here is merged last, so it wins on key
//! collisions.

use serde_json::{json, Map, Value};

use crate::builder::GenerationMode;
use crate::state::AppState;

/// Snapshot of the state one build actually used.
///
/// `seed` and `guidance` are passed in resolved form: the seed may have
/// been freshly drawn and the guidance overridden by the fill variant.
pub fn state_snapshot(
    state: &AppState,
    mode: GenerationMode,
    seed: u32,
    guidance: f32,
) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("generation_mode".into(), json!(mode.as_str()));
    m.insert(
        "positive_prompt".into(),
        json!(state.params.positive_prompt),
    );
    if let Some(model) = &state.params.model {
        m.insert("model".into(), json!(model.identifier));
    }
    m.insert("width".into(), json!(state.canvas.bbox.width));
    m.insert("height".into(), json!(state.canvas.bbox.height));
    m.insert("steps".into(), json!(state.params.steps));
    m.insert("guidance".into(), json!(guidance));
    m.insert("seed".into(), json!(seed));
    if mode != GenerationMode::Txt2Img {
        m.insert("strength".into(), json!(state.params.img2img_strength));
    }
    m
}
