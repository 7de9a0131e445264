use super::bank::BankState;

/// MBC5 register set.
///
/// MBC5 supports up to 512 ROM banks (9-bit bank number split over two
/// registers) and 8 RAM banks here. Unlike MBC1, bank 0 is a legal value
/// for the switched window.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Mbc5 {
    pub(super) rumble: bool,
}

impl Mbc5 {
    pub(super) fn new(rumble: bool) -> Self {
        Self { rumble }
    }

    pub(super) fn write(&mut self, banks: &mut BankState, ram: &mut [u8], addr: u16, value: u8) {
        match addr {
            0x2000..=0x2FFF => {
                // Low 8 bits of the ROM bank.
                banks.map_rom((banks.rom_bank() & 0x0100) | value as u16);
            }
            0x3000..=0x3FFF => {
                // Bit 8 of the ROM bank.
                banks.map_rom((banks.rom_bank() & 0x00FF) | (((value & 0x01) as u16) << 8));
            }
            0x4000..=0x5FFF => {
                banks.map_ram(value & 0x07);
            }
            0xA000..=0xBFFF => {
                // No enable latch on this path: MBC5 RAM writes land as soon
                // as a RAM bank is mapped.
                ram[banks.ram_offset(addr)] = value;
            }
            _ => {}
        }
    }
}
