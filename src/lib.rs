//! Multi-threaded 16-bit height grid generator.
//!
//! This crate generates square grids of 16-bit height samples from layered
//! procedural noise, splitting the coordinate space across worker threads
//! and joining them under a polled completion protocol. Generated grids can
//! be persisted as a headerless raw form for engine import or as a
//! self-describing container format that round-trips the generation
//! parameters.

pub mod export;
pub mod generator;
pub mod noise;
pub mod scheduler;
pub mod seed;
pub mod terrain;

pub use export::{export_raw, load_container, save_container, ContainerError, RawExportError};
pub use generator::{GenerateError, HeightGenerator};
pub use noise::HeightProfile;
pub use scheduler::{generate_grid, generate_with_workers};
pub use seed::SeedSource;
pub use terrain::{GenerationParams, HeightGrid};
