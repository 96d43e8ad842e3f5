//! Noise sampling for height synthesis.
//!
//! Uses simdnoise for SIMD-accelerated noise primitives. The composition of
//! the primitives lives in [`profile`]; callers treat it as a deterministic
//! function of seed and position.

mod profile;

pub use profile::{height_to_u16, sample_height, HeightProfile};
