use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort cartridge construction.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read ROM image '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("ROM image is {len} bytes, too short to contain bank 0 and its header")]
    TooShort { len: usize },
    #[error("unrecognised ROM size code ${0:02X} in cartridge header")]
    InvalidRomSize(u8),
    #[error("ROM image is truncated: header declares {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("invalid global checksum (stored ${stored:04X}, computed ${computed:04X})")]
    BadChecksum { stored: u16, computed: u16 },
}

/// Failures while loading or storing battery-backed RAM.
///
/// These are never fatal for emulation: the cartridge logs them and carries
/// on with zeroed (or unsaved) RAM.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("battery RAM I/O on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("battery RAM file '{}' holds {actual} bytes, expected {expected}", path.display())]
    Short {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("cartridge has no battery save path")]
    NoSavePath,
}
