//! Persistence for generated height grids.
//!
//! Two independent serialized forms: a near-headerless raw form for game
//! engine import (write-only here) and a self-describing container form
//! with a magic/version/size header that round-trips the grid together
//! with its generation parameters.

mod container;
mod raw;

pub use container::{
    load_container, save_container, ContainerError, CONTAINER_MAGIC, CONTAINER_VERSION,
};
pub use raw::{export_raw, RawExportError, RAW_VERSION};
