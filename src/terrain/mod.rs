//! Height grid data model.
//!
//! Provides the HeightGrid and GenerationParams structures that carry a
//! generated 16-bit grid together with the inputs that produced it.

mod height_grid;

pub use height_grid::{GenerationParams, HeightGrid};
