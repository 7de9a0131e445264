pub mod battery;
pub mod cartridge;
pub mod checksum;
pub mod error;
pub mod header;
pub mod options;

pub use cartridge::Cartridge;
pub use error::{LoadError, PersistError};
pub use header::{CartridgeType, Header};
pub use options::LoadOptions;

/// Size of one switchable ROM bank (16 KiB).
pub const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one switchable external RAM bank (8 KiB).
pub const RAM_BANK_SIZE: usize = 0x2000;
/// Backing store for cartridge RAM.
///
/// This is a 64 KiB superset of every RAM configuration we support, so the
/// translated RAM offset (`bank * 8 KiB + 0x1FFF`) can never run past the end
/// for any 3-bit RAM bank number.
pub const RAM_CAPACITY: usize = 0x10000;
