//! Raw heightmap export for game engine compatibility.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::terrain::HeightGrid;

/// Version byte written at the start of every raw file.
pub const RAW_VERSION: u8 = 1;

/// Errors that can occur during raw export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("resolution {0} does not fit the raw header's 16-bit field")]
    ResolutionTooLarge(u32),
}

/// Writes a grid in the raw form: `[1B version][2B resolution][data]`.
///
/// Samples are little-endian 16-bit values in row-major order, with no
/// magic number and no size field. This form is write-only in this crate;
/// readers are expected to know the layout.
pub fn export_raw(grid: &HeightGrid, path: &Path) -> Result<(), RawExportError> {
    let resolution = grid.resolution();
    if resolution > u16::MAX as u32 {
        return Err(RawExportError::ResolutionTooLarge(resolution));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&[RAW_VERSION])?;
    writer.write_all(&(resolution as u16).to_le_bytes())?;
    for &sample in grid.data() {
        writer.write_all(&sample.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
