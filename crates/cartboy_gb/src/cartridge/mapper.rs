use super::bank::BankState;
use super::mbc1::Mbc1;
use super::mbc2::Mbc2;
use super::mbc5::Mbc5;
use crate::header::CartridgeType;

/// Memory bank controller, one variant per supported chip family.
///
/// Each variant owns the registers specific to its chip; the bank numbers
/// and page offsets common to all of them live in [`BankState`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Mapper {
    /// ROM only, optionally with a fixed RAM chip. Nothing to program.
    None,
    Mbc1(Mbc1),
    Mbc2(Mbc2),
    Mbc5(Mbc5),
    /// MBC3, MMM01 and unknown codes. Writes are ignored.
    Unsupported,
}

impl Mapper {
    pub(super) fn for_type(cartridge_type: CartridgeType) -> Self {
        match cartridge_type {
            CartridgeType::RomOnly | CartridgeType::RomRam { .. } => Self::None,
            CartridgeType::Mbc1 { .. } => Self::Mbc1(Mbc1::default()),
            CartridgeType::Mbc2 { .. } => Self::Mbc2(Mbc2),
            CartridgeType::Mbc5 { rumble, .. } => Self::Mbc5(Mbc5::new(rumble)),
            CartridgeType::Unsupported(code) => {
                log::warn!("Cartridge type ${code:02X} is not supported; bank switching disabled");
                Self::Unsupported
            }
        }
    }

    pub(super) fn write(&mut self, banks: &mut BankState, ram: &mut [u8], addr: u16, value: u8) {
        match self {
            Mapper::None | Mapper::Unsupported => {}
            Mapper::Mbc1(m) => m.write(banks, ram, addr, value),
            Mapper::Mbc2(m) => m.write(banks, ram, addr, value),
            Mapper::Mbc5(m) => m.write(banks, ram, addr, value),
        }
    }

    /// Human-readable summary of the current mapping.
    ///
    /// `has_ram` selects the longer MBC1 form that also reports the banking
    /// mode, which only matters when a RAM chip is fitted.
    pub(super) fn describe(&self, banks: &BankState, has_ram: bool) -> String {
        let bank = banks.rom_bank();
        match self {
            Mapper::None => "This ROM has no mapper.".to_string(),
            Mapper::Mbc1(m) if has_ram => format!(
                "MBC1: ROM bank {bank:02X} mapped to 4000 - 7FFF.  {}",
                m.mode_description()
            ),
            Mapper::Mbc1(_) => format!("MBC1: ROM bank {bank:02X} mapped to 4000 - 7FFF"),
            Mapper::Mbc2(_) => format!("MBC2: ROM bank {bank:02X} mapped to 4000 - 7FFF"),
            Mapper::Mbc5(m) if m.rumble => {
                format!("MBC5: ROM bank {bank:02X} mapped to 4000 - 7FFF (rumble)")
            }
            Mapper::Mbc5(_) => format!("MBC5: ROM bank {bank:02X} mapped to 4000 - 7FFF"),
            Mapper::Unsupported => "Unknown mapper.".to_string(),
        }
    }
}
