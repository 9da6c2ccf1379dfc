//! Strength to denoising-range mapping.

/// Exponent for the optimized mapping. Front-loads perceptual change so
/// low strengths still move the image visibly.
const OPTIMIZED_EXPONENT: f32 = 0.2;

/// Map a user-facing strength in `[0, 1]` to the internal
/// `denoising_start`.
///
/// Linear rule: `1 - strength`. Optimized rule: `1 - strength^0.2`.
/// Both are exact; the toggle selects between them. Out-of-range
/// strengths are clamped to `[0, 1]` first.
pub fn denoising_start(strength: f32, optimized: bool) -> f32 {
    let strength = strength.clamp(0.0, 1.0);
    if optimized {
        1.0 - strength.powf(OPTIMIZED_EXPONENT)
    } else {
        1.0 - strength
    }
}
