use bitflags::bitflags;

use crate::error::LoadError;
use crate::{RAM_BANK_SIZE, ROM_BANK_SIZE};

const TITLE_START: usize = 0x0134;
const TITLE_LEN: usize = 16;
pub const CARTRIDGE_TYPE_OFFSET: usize = 0x0147;
pub const ROM_SIZE_OFFSET: usize = 0x0148;
pub const RAM_SIZE_OFFSET: usize = 0x0149;
pub const GLOBAL_CHECKSUM_OFFSET: usize = 0x014E;

/// MBC2 carries 512 half-byte cells of RAM inside the controller itself.
pub const MBC2_RAM_SIZE: usize = 512;

/// Header ROM size code -> number of 16 KiB banks.
///
/// Codes 0-7 are the usual powers of two. 0x52-0x54 are the odd-sized
/// cartridges listed in some header tables.
const ROM_SIZE_TABLE: [(u8, usize); 11] = [
    (0x00, 2),
    (0x01, 4),
    (0x02, 8),
    (0x03, 16),
    (0x04, 32),
    (0x05, 64),
    (0x06, 128),
    (0x07, 256),
    (0x52, 72),
    (0x53, 80),
    (0x54, 96),
];

/// Standard names of the cartridge mapper chips, indexed by type code.
const TYPE_NAMES: [&str; 0x1F] = [
    "ROM Only",                               // 00
    "ROM+MBC1",                               // 01
    "ROM+MBC1+RAM",                           // 02
    "ROM+MBC1+RAM+BATTERY",                   // 03
    "Unknown",                                // 04
    "ROM+MBC2",                               // 05
    "ROM+MBC2+BATTERY",                       // 06
    "Unknown",                                // 07
    "ROM+RAM",                                // 08
    "ROM+RAM+BATTERY",                        // 09
    "Unknown",                                // 0A
    "Unsupported ROM+MMM01+SRAM",             // 0B
    "Unsupported ROM+MMM01+SRAM+BATTERY",     // 0C
    "Unknown",                                // 0D
    "Unsupported ROM+MBC3+TIMER+BATTERY",     // 0E
    "Unsupported ROM+MBC3+TIMER+RAM+BATTERY", // 0F
    "Unsupported ROM+MBC3",                   // 10
    "Unsupported ROM+MBC3+RAM",               // 11
    "Unsupported ROM+MBC3+RAM+BATTERY",       // 12
    "Unknown",                                // 13
    "Unknown",                                // 14
    "Unknown",                                // 15
    "Unknown",                                // 16
    "Unknown",                                // 17
    "Unknown",                                // 18
    "ROM+MBC5",                               // 19
    "ROM+MBC5+RAM",                           // 1A
    "ROM+MBC5+RAM+BATTERY",                   // 1B
    "ROM+MBC5+RUMBLE",                        // 1C
    "ROM+MBC5+RUMBLE+RAM",                    // 1D
    "ROM+MBC5+RUMBLE+RAM+BATTERY",            // 1E
];

/// Resolve a header ROM size code to a bank count.
///
/// Returns `None` for codes outside the table; the image cannot be sized
/// in that case and loading must stop.
pub fn lookup_rom_banks(code: u8) -> Option<usize> {
    ROM_SIZE_TABLE
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, banks)| banks)
}

/// Number of 8 KiB RAM banks kept in the battery save file.
///
/// Only the 32 KiB code is distinguished; every other code is treated as a
/// single bank, which is what existing save files for these mappers hold.
pub fn lookup_ram_banks(code: u8) -> usize {
    if code == 0x03 {
        4
    } else {
        1
    }
}

bitflags! {
    /// Optional hardware found alongside the mapper chip.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CartFeatures: u8 {
        const RAM = 0b0001;
        const BATTERY = 0b0010;
        const RUMBLE = 0b0100;
    }
}

/// Cartridge type byte at $0147, grouped by mapper family.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CartridgeType {
    RomOnly,
    RomRam { battery: bool },
    Mbc1 { ram: bool, battery: bool },
    Mbc2 { battery: bool },
    Mbc5 { ram: bool, battery: bool, rumble: bool },
    Unsupported(u8),
}

impl CartridgeType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::RomOnly,
            0x08 => Self::RomRam { battery: false },
            0x09 => Self::RomRam { battery: true },
            0x01 => Self::Mbc1 { ram: false, battery: false },
            0x02 => Self::Mbc1 { ram: true, battery: false },
            0x03 => Self::Mbc1 { ram: true, battery: true },
            0x05 => Self::Mbc2 { battery: false },
            0x06 => Self::Mbc2 { battery: true },
            0x19 => Self::Mbc5 { ram: false, battery: false, rumble: false },
            0x1A => Self::Mbc5 { ram: true, battery: false, rumble: false },
            0x1B => Self::Mbc5 { ram: true, battery: true, rumble: false },
            0x1C => Self::Mbc5 { ram: false, battery: false, rumble: true },
            0x1D => Self::Mbc5 { ram: true, battery: false, rumble: true },
            0x1E => Self::Mbc5 { ram: true, battery: true, rumble: true },
            other => Self::Unsupported(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::RomOnly => 0x00,
            Self::RomRam { battery: false } => 0x08,
            Self::RomRam { battery: true } => 0x09,
            Self::Mbc1 { ram: false, .. } => 0x01,
            Self::Mbc1 { ram: true, battery: false } => 0x02,
            Self::Mbc1 { ram: true, battery: true } => 0x03,
            Self::Mbc2 { battery: false } => 0x05,
            Self::Mbc2 { battery: true } => 0x06,
            Self::Mbc5 { ram, battery, rumble } => match (rumble, ram, battery) {
                (false, false, _) => 0x19,
                (false, true, false) => 0x1A,
                (false, true, true) => 0x1B,
                (true, false, _) => 0x1C,
                (true, true, false) => 0x1D,
                (true, true, true) => 0x1E,
            },
            Self::Unsupported(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        TYPE_NAMES
            .get(self.code() as usize)
            .copied()
            .unwrap_or("Unknown")
    }

    pub fn features(self) -> CartFeatures {
        let mut flags = CartFeatures::empty();
        match self {
            Self::RomOnly | Self::Unsupported(_) => {}
            Self::RomRam { battery } => {
                flags |= CartFeatures::RAM;
                flags.set(CartFeatures::BATTERY, battery);
            }
            Self::Mbc1 { ram, battery } => {
                flags.set(CartFeatures::RAM, ram);
                flags.set(CartFeatures::BATTERY, battery);
            }
            Self::Mbc2 { battery } => {
                // MBC2 RAM is always present, built into the controller.
                flags |= CartFeatures::RAM;
                flags.set(CartFeatures::BATTERY, battery);
            }
            Self::Mbc5 { ram, battery, rumble } => {
                flags.set(CartFeatures::RAM, ram);
                flags.set(CartFeatures::BATTERY, battery);
                flags.set(CartFeatures::RUMBLE, rumble);
            }
        }
        flags
    }

    /// Whether the RAM contents are kept in a battery save file.
    pub fn is_battery_backed(self) -> bool {
        self.features()
            .contains(CartFeatures::RAM | CartFeatures::BATTERY)
    }

    /// Byte length of the battery save image for this cartridge, or `None`
    /// if nothing is persisted.
    pub fn battery_ram_len(self, ram_size_code: u8) -> Option<usize> {
        if !self.is_battery_backed() {
            return None;
        }
        Some(match self {
            Self::Mbc2 { .. } => MBC2_RAM_SIZE,
            _ => lookup_ram_banks(ram_size_code) * RAM_BANK_SIZE,
        })
    }
}

/// Decoded cartridge header, read from bank 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub title: String,
    pub cartridge_type: CartridgeType,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub rom_banks: usize,
    pub global_checksum: u16,
}

impl Header {
    /// Parse the header out of the first bank of an image.
    ///
    /// Only bank 0 needs to be present; the declared bank count is what the
    /// loader uses to size the final ROM buffer.
    pub fn parse(image: &[u8]) -> Result<Self, LoadError> {
        if image.len() < ROM_BANK_SIZE {
            return Err(LoadError::TooShort { len: image.len() });
        }

        let rom_size_code = image[ROM_SIZE_OFFSET];
        let rom_banks =
            lookup_rom_banks(rom_size_code).ok_or(LoadError::InvalidRomSize(rom_size_code))?;

        Ok(Self {
            title: parse_title(&image[TITLE_START..TITLE_START + TITLE_LEN]),
            cartridge_type: CartridgeType::from_code(image[CARTRIDGE_TYPE_OFFSET]),
            rom_size_code,
            ram_size_code: image[RAM_SIZE_OFFSET],
            rom_banks,
            global_checksum: u16::from_be_bytes([
                image[GLOBAL_CHECKSUM_OFFSET],
                image[GLOBAL_CHECKSUM_OFFSET + 1],
            ]),
        })
    }

    /// Declared ROM size in bytes.
    pub fn rom_len(&self) -> usize {
        self.rom_banks * ROM_BANK_SIZE
    }
}

fn parse_title(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .filter(|b| b.is_ascii_graphic() || **b == b' ')
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end()
        .to_string()
}
