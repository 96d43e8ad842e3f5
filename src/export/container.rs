//! Self-describing container form with a patched-in size field.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::terrain::{GenerationParams, HeightGrid};

/// Magic identifier following the version byte.
pub const CONTAINER_MAGIC: [u8; 3] = *b"HDF";
/// Current container format version.
pub const CONTAINER_VERSION: u8 = 1;

/// Fixed header: version, magic, size, resolution, gain, octaves, seed.
const HEADER_LEN: u64 = 1 + 3 + 4 + 4 + 4 + 4 + 4;
/// Offset of the total-size field, right after version and magic.
const SIZE_FIELD_OFFSET: u64 = 4;

/// Errors that can occur while saving or loading the container form.
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file too small for container header: {0} bytes")]
    Truncated(u64),
    #[error("magic mismatch: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 3], found: [u8; 3] },
    #[error("recorded size {recorded} does not match file size {actual}")]
    SizeMismatch { recorded: u64, actual: u64 },
    #[error("payload is {actual} bytes but resolution {resolution} requires {expected}")]
    PayloadSize {
        resolution: u32,
        expected: u64,
        actual: u64,
    },
}

/// Saves a grid in container form.
///
/// Layout: `[1B version][3B magic][4B total size][4B resolution]
/// [4B gain f32][4B octaves][4B seed][payload]`, all little-endian. The
/// size field is streamed as a zero placeholder, then patched with the
/// true total once the payload is written: two passes over one handle.
///
/// The format does not record `scale`; a loaded grid gets a zero scale.
pub fn save_container(grid: &HeightGrid, path: &Path) -> Result<(), ContainerError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let params = grid.params();

    writer.write_all(&[CONTAINER_VERSION])?;
    writer.write_all(&CONTAINER_MAGIC)?;
    writer.write_all(&0u32.to_le_bytes())?; // placeholder, patched below
    writer.write_all(&params.resolution.to_le_bytes())?;
    writer.write_all(&params.gain.to_le_bytes())?;
    writer.write_all(&params.octaves.to_le_bytes())?;
    writer.write_all(&grid.seed().to_le_bytes())?;
    for &sample in grid.data() {
        writer.write_all(&sample.to_le_bytes())?;
    }

    let total = writer.stream_position()?;
    writer.seek(SeekFrom::Start(SIZE_FIELD_OFFSET))?;
    writer.write_all(&(total as u32).to_le_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Loads a grid saved in container form.
///
/// The header is validated before the payload is touched: the file must
/// hold at least the fixed header, the magic must match exactly, the
/// recorded size must equal the actual file length (a checksum by length,
/// not a cryptographic check), and the payload must match the recorded
/// resolution. Any mismatch fails without allocating a sample buffer.
pub fn load_container(path: &Path) -> Result<HeightGrid, ContainerError> {
    let file = File::open(path)?;
    let actual = file.metadata()?.len();
    if actual < HEADER_LEN {
        return Err(ContainerError::Truncated(actual));
    }

    let mut reader = BufReader::new(file);

    let version = read_u8(&mut reader)?;
    if version != CONTAINER_VERSION {
        warn!(
            "container version {} (current is {}), reading anyway",
            version, CONTAINER_VERSION
        );
    }

    let mut magic = [0u8; 3];
    reader.read_exact(&mut magic)?;
    if magic != CONTAINER_MAGIC {
        return Err(ContainerError::BadMagic {
            expected: CONTAINER_MAGIC,
            found: magic,
        });
    }

    let recorded = read_u32(&mut reader)? as u64;
    if recorded != actual {
        return Err(ContainerError::SizeMismatch { recorded, actual });
    }

    let resolution = read_u32(&mut reader)?;
    let gain = read_f32(&mut reader)?;
    let octaves = read_u32(&mut reader)?;
    let seed = read_u32(&mut reader)?;

    let expected = (resolution as u64) * (resolution as u64) * 2;
    let payload = actual - HEADER_LEN;
    if payload != expected {
        return Err(ContainerError::PayloadSize {
            resolution,
            expected,
            actual: payload,
        });
    }

    let mut bytes = vec![0u8; expected as usize];
    reader.read_exact(&mut bytes)?;
    let data = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let params = GenerationParams {
        resolution,
        gain,
        octaves,
        scale: 0.0, // not part of the container format
    };
    Ok(HeightGrid::new(params, seed, data))
}

fn read_u8(reader: &mut impl Read) -> std::io::Result<u8> {
    let mut bytes = [0u8; 1];
    reader.read_exact(&mut bytes)?;
    Ok(bytes[0])
}

fn read_u32(reader: &mut impl Read) -> std::io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_f32(reader: &mut impl Read) -> std::io::Result<f32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(f32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_grid(resolution: u32) -> HeightGrid {
        let params = GenerationParams::new(resolution, 0.33, 12, 0.001);
        let data = (0..params.pixel_count())
            .map(|i| (i * 3) as u16)
            .collect();
        HeightGrid::new(params, 987654321, data)
    }

    #[test]
    fn test_round_trip() {
        let grid = test_grid(16);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");

        save_container(&grid, &path).unwrap();
        let loaded = load_container(&path).unwrap();

        assert_eq!(loaded.data(), grid.data());
        assert_eq!(loaded.seed(), grid.seed());
        assert_eq!(loaded.params().resolution, 16);
        assert_eq!(loaded.params().gain, 0.33);
        assert_eq!(loaded.params().octaves, 12);
        // Scale is not persisted.
        assert_eq!(loaded.params().scale, 0.0);
    }

    #[test]
    fn test_size_field_is_patched() {
        let grid = test_grid(8);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");

        save_container(&grid, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let recorded = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(recorded as usize, bytes.len());
        assert_eq!(bytes.len(), 24 + 8 * 8 * 2);
        assert_eq!(&bytes[1..4], &CONTAINER_MAGIC);
    }

    #[test]
    fn test_truncated_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.hdf");
        std::fs::write(&path, [CONTAINER_VERSION, b'H', b'D', b'F', 0, 0]).unwrap();

        match load_container(&path) {
            Err(ContainerError::Truncated(len)) => assert_eq!(len, 6),
            other => panic!("expected Truncated, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bad_magic_fails() {
        let grid = test_grid(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");
        save_container(&grid, &path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[2] = b'X';
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_container(&path),
            Err(ContainerError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_tampered_size_field_fails() {
        let grid = test_grid(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");
        save_container(&grid, &path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        let bogus = (bytes.len() as u32 + 1).to_le_bytes();
        bytes[4..8].copy_from_slice(&bogus);
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_container(&path),
            Err(ContainerError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_tampered_resolution_fails_payload_check() {
        let grid = test_grid(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");
        save_container(&grid, &path).unwrap();

        // Double the recorded resolution; the file length no longer matches.
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[8..12].copy_from_slice(&8u32.to_le_bytes());
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_container(&path),
            Err(ContainerError::PayloadSize { resolution: 8, .. })
        ));
    }

    #[test]
    fn test_version_skew_still_loads() {
        let grid = test_grid(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.hdf");
        save_container(&grid, &path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[0] = CONTAINER_VERSION + 1;
        std::fs::write(&path, &bytes).unwrap();

        let loaded = load_container(&path).unwrap();
        assert_eq!(loaded.data(), grid.data());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_container(&dir.path().join("absent.hdf")),
            Err(ContainerError::Io(_))
        ));
    }
}
