//! Battery-backed cartridge RAM persistence.
//!
//! Save files are raw RAM dumps in bank order with no header, the same
//! layout other Game Boy tools read and write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Extension used for battery save files.
pub const SAVE_EXTENSION: &str = "sav";

/// Save file path for a ROM: same stem, `.sav` extension (appended when the
/// ROM file has none).
pub fn save_path_for(rom_path: &Path) -> PathBuf {
    rom_path.with_extension(SAVE_EXTENSION)
}

/// Fill `ram[..len]` from the save file at `path`.
///
/// A file shorter than `len` is rejected as a whole and `ram` is left
/// untouched; extra trailing bytes are ignored.
pub fn load(path: &Path, ram: &mut [u8], len: usize) -> Result<(), PersistError> {
    let data = fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if data.len() < len {
        return Err(PersistError::Short {
            path: path.to_path_buf(),
            expected: len,
            actual: data.len(),
        });
    }
    ram[..len].copy_from_slice(&data[..len]);
    log::info!("Read SRAM from '{}'", path.display());
    Ok(())
}

/// Write `ram[..len]` to the save file at `path`, replacing it.
pub fn store(path: &Path, ram: &[u8], len: usize) -> Result<(), PersistError> {
    fs::write(path, &ram[..len]).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Written SRAM to '{}'", path.display());
    Ok(())
}
