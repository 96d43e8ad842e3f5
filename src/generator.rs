//! High-level generator facade owning the single live height grid.

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::export::{
    export_raw, load_container, save_container, ContainerError, RawExportError,
};
use crate::noise::HeightProfile;
use crate::scheduler::generate_grid;
use crate::terrain::{GenerationParams, HeightGrid};

/// Errors from generation and grid persistence.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The height buffer could not be allocated.
    #[error("failed to allocate a {0}-pixel height buffer")]
    Allocation(usize),
    /// No grid is live to operate on.
    #[error("no generated height grid")]
    Empty,
    #[error(transparent)]
    Raw(#[from] RawExportError),
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Generates and owns 16-bit height grids.
///
/// At most one grid is live per generator. `generate` and `load` always
/// clear the previous grid first, and a failed run leaves the generator
/// empty rather than half-filled. A failed output write after a successful
/// generation keeps the in-memory grid intact.
#[derive(Debug, Default)]
pub struct HeightGenerator {
    grid: Option<HeightGrid>,
}

impl HeightGenerator {
    /// Creates an empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one generation and optionally writes the results to disk.
    ///
    /// `None` output paths skip that form. The raw form is written first,
    /// then the container form; the first failure is returned.
    pub fn generate(
        &mut self,
        profile: HeightProfile,
        seed: u32,
        params: GenerationParams,
        raw_output: Option<&Path>,
        container_output: Option<&Path>,
    ) -> Result<(), GenerateError> {
        self.free();

        let grid = self.grid.insert(generate_grid(profile, seed, params)?);
        info!("generated {} pixels with seed {}", grid.pixel_count(), seed);

        if let Some(path) = raw_output {
            export_raw(grid, path)?;
        }
        if let Some(path) = container_output {
            save_container(grid, path)?;
        }
        Ok(())
    }

    /// Read-only view of the generated samples; empty when no grid is live.
    pub fn data(&self) -> &[u16] {
        self.grid.as_ref().map(HeightGrid::data).unwrap_or(&[])
    }

    /// Number of generated pixels; zero when no grid is live.
    pub fn pixel_count(&self) -> usize {
        self.grid.as_ref().map(HeightGrid::pixel_count).unwrap_or(0)
    }

    /// Parameters of the live grid, if any.
    pub fn params(&self) -> Option<&GenerationParams> {
        self.grid.as_ref().map(HeightGrid::params)
    }

    /// Seed used for the live grid, if any.
    pub fn seed(&self) -> Option<u32> {
        self.grid.as_ref().map(HeightGrid::seed)
    }

    /// The live grid, if any.
    pub fn grid(&self) -> Option<&HeightGrid> {
        self.grid.as_ref()
    }

    /// Saves the live grid in container form.
    pub fn save(&self, path: &Path) -> Result<(), GenerateError> {
        let grid = self.grid.as_ref().ok_or(GenerateError::Empty)?;
        save_container(grid, path)?;
        Ok(())
    }

    /// Loads a container file, replacing any live grid.
    ///
    /// The previous grid is cleared before the file is touched; a failed
    /// load therefore leaves the generator empty.
    pub fn load(&mut self, path: &Path) -> Result<(), GenerateError> {
        self.free();
        self.grid = Some(load_container(path)?);
        Ok(())
    }

    /// Drops the live grid. Idempotent.
    pub fn free(&mut self) {
        self.grid = None;
    }
}
