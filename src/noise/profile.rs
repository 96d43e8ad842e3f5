//! Layered noise compositions for height sampling.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

use crate::terrain::GenerationParams;

/// Per-octave seed offset for the manually stacked worley octaves.
const OCTAVE_SEED_STRIDE: i32 = 31337;

/// Selects the per-pixel noise composition.
///
/// Both profiles stack a fractal Brownian motion base, a ridged
/// multifractal term, and a multi-octave worley term; they differ in how
/// the worley term enters the result. Either way the composition is
/// deterministic for a given seed and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightProfile {
    /// Three-term product: fbm base modulated by ridge and worley.
    #[default]
    Modulated,
    /// Worley term subtracted from the ridge-modulated base, carving
    /// cell-shaped depressions instead of scaling the relief.
    Subtractive,
}

/// Samples the layered height composition at a position.
///
/// The position is expected to be the grid coordinate already multiplied by
/// `params.scale`. The result is meant to be clamped to [0, 1] before
/// quantization; see [`height_to_u16`].
///
/// Zero octaves produce a flat 0.0 rather than an error: a degenerate but
/// well-defined grid.
pub fn sample_height(
    profile: HeightProfile,
    seed: u32,
    pos: Vec2,
    params: &GenerationParams,
) -> f32 {
    if params.octaves == 0 {
        return 0.0;
    }
    let octaves = params.octaves.min(u8::MAX as u32) as u8;
    let seed = seed as i32;

    // Base relief, halved to leave headroom below the water plane.
    let base = fbm(seed, pos, octaves, params.gain) * 0.5;
    // Ridged multifractal remapped to [0, 1] as a multiplicative modulator.
    let ridge = ridged(seed, pos, octaves, params.gain + 0.1) * 0.5 + 0.5;
    let worley = worley_fbm(seed, pos, octaves, params.gain + 0.2) * 0.5 + 0.5;

    match profile {
        HeightProfile::Modulated => base * ridge * worley,
        HeightProfile::Subtractive => base * ridge - worley * 0.25,
    }
}

/// Quantizes a raw sample into the stored 16-bit range.
pub fn height_to_u16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}

fn fbm(seed: i32, pos: Vec2, octaves: u8, gain: f32) -> f32 {
    NoiseBuilder::fbm_2d_offset(pos.x, 1, pos.y, 1)
        .with_seed(seed)
        .with_freq(1.0)
        .with_octaves(octaves)
        .with_gain(gain)
        .with_lacunarity(2.0)
        .generate()
        .0[0]
}

fn ridged(seed: i32, pos: Vec2, octaves: u8, gain: f32) -> f32 {
    NoiseBuilder::ridge_2d_offset(pos.x, 1, pos.y, 1)
        .with_seed(seed)
        .with_freq(1.0)
        .with_octaves(octaves)
        .with_gain(gain)
        .with_lacunarity(2.0)
        .generate()
        .0[0]
}

/// Multi-octave worley (cellular) noise.
///
/// simdnoise's cellular builder is single-octave, so the octaves are
/// stacked manually with the usual amplitude/frequency ladder, one seed
/// offset per octave.
fn worley_fbm(seed: i32, pos: Vec2, octaves: u8, gain: f32) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = 1.0f32;
    let mut max_amplitude = 0.0f32;

    for octave in 0..octaves {
        let octave_seed = seed.wrapping_add(octave as i32 * OCTAVE_SEED_STRIDE);
        let value = NoiseBuilder::cellular_2d_offset(pos.x * frequency, 1, pos.y * frequency, 1)
            .with_seed(octave_seed)
            .with_freq(1.0)
            .generate()
            .0[0];

        total += value * amplitude;
        max_amplitude += amplitude;
        amplitude *= gain;
        frequency *= 2.0;
    }

    total / max_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> GenerationParams {
        GenerationParams {
            resolution: 64,
            gain: 0.36,
            octaves: 6,
            scale: 0.01,
        }
    }

    #[test]
    fn test_sample_reproducibility() {
        let params = test_params();
        let pos = Vec2::new(0.37, 0.81);

        let a = sample_height(HeightProfile::Modulated, 12345, pos, &params);
        let b = sample_height(HeightProfile::Modulated, 12345, pos, &params);

        assert_eq!(a, b, "Same seed and position should produce same result");
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let params = test_params();
        let pos = Vec2::new(0.37, 0.81);

        let a = sample_height(HeightProfile::Modulated, 1, pos, &params);
        let b = sample_height(HeightProfile::Modulated, 2, pos, &params);

        assert_ne!(a, b, "Different seeds should produce different results");
    }

    #[test]
    fn test_profiles_differ() {
        let params = test_params();
        let pos = Vec2::new(0.52, 0.19);

        let modulated = sample_height(HeightProfile::Modulated, 7, pos, &params);
        let subtractive = sample_height(HeightProfile::Subtractive, 7, pos, &params);

        assert_ne!(modulated, subtractive);
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let params = GenerationParams {
            octaves: 0,
            ..test_params()
        };

        for pos in [Vec2::new(0.0, 0.0), Vec2::new(0.4, 0.9), Vec2::new(3.1, 7.7)] {
            assert_eq!(sample_height(HeightProfile::Modulated, 42, pos, &params), 0.0);
        }
    }

    #[test]
    fn test_height_to_u16_mapping() {
        assert_eq!(height_to_u16(0.0), 0);
        assert_eq!(height_to_u16(1.0), 65535);
        assert_eq!(height_to_u16(0.5), 32768);
        // Out-of-range inputs clamp instead of wrapping.
        assert_eq!(height_to_u16(-5.0), 0);
        assert_eq!(height_to_u16(7.0), 65535);
    }
}
