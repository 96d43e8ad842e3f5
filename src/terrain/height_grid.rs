//! HeightGrid and generation parameter structures.

use serde::{Deserialize, Serialize};

/// Parameters for one generation run.
///
/// Immutable once a run starts; the resulting grid keeps the copy it was
/// built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Grid edge length in pixels.
    pub resolution: u32,
    /// Amplitude decay per octave (0.3-0.4 typical).
    pub gain: f32,
    /// Number of noise octaves (10-20 typical).
    pub octaves: u32,
    /// World-space size of one pixel (0.0005-0.001 typical).
    pub scale: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            resolution: 1024,
            gain: 0.36,
            octaves: 14,
            scale: 0.00055,
        }
    }
}

impl GenerationParams {
    /// Creates a parameter set from its four inputs.
    pub fn new(resolution: u32, gain: f32, octaves: u32, scale: f32) -> Self {
        Self {
            resolution,
            gain,
            octaves,
            scale,
        }
    }

    /// Total number of pixels in a grid with these parameters.
    pub fn pixel_count(&self) -> usize {
        (self.resolution as usize) * (self.resolution as usize)
    }
}

/// A square grid of 16-bit height samples plus the inputs that produced it.
///
/// Samples are stored row-major: `index = x + y * resolution`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    params: GenerationParams,
    seed: u32,
    data: Vec<u16>,
}

impl HeightGrid {
    /// Assembles a grid from already-generated samples.
    ///
    /// # Panics
    /// Panics if `data.len()` does not match `params.pixel_count()`.
    pub fn new(params: GenerationParams, seed: u32, data: Vec<u16>) -> Self {
        assert_eq!(
            data.len(),
            params.pixel_count(),
            "sample count must match resolution"
        );
        Self { params, seed, data }
    }

    /// The parameters this grid was generated (or loaded) with.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// The seed this grid was generated with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Grid edge length in pixels.
    pub fn resolution(&self) -> u32 {
        self.params.resolution
    }

    /// Read-only view of the samples in row-major order.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Total number of samples.
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the height at the given pixel coordinate.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u16 {
        debug_assert!(x < self.params.resolution && y < self.params.resolution);
        self.data[(x + y * self.params.resolution) as usize]
    }
}
