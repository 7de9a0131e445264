use super::bank::BankState;

/// MBC1 register set.
///
/// ROM banking uses the 5-bit bank register at $2000-$3FFF plus a shared
/// 2-bit register at $4000-$5FFF. The banking mode latch at $6000-$7FFF
/// decides whether those two bits extend the ROM bank number or select
/// one of four RAM banks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Mbc1 {
    /// Banking mode latch. `true` routes the 2-bit register to the RAM
    /// bank.
    pub(super) large_ram_mode: bool,
}

impl Mbc1 {
    /// Handle a CPU write into the cartridge address space.
    ///
    /// The address windows do not overlap, so exactly one arm can act on a
    /// given write. In particular a write to the bank registers never also
    /// flips the banking mode, and vice versa.
    pub(super) fn write(&mut self, banks: &mut BankState, ram: &mut [u8], addr: u16, value: u8) {
        match addr {
            0xA000..=0xBFFF => {
                if banks.ram_enabled {
                    ram[banks.ram_offset(addr)] = value;
                }
            }
            0x2000..=0x3FFF => {
                // Bank 0 can't be selected in the switched window; it
                // aliases to 1. The upper two bank bits are kept.
                let mut low = (value & 0x1F) as u16;
                if low == 0 {
                    low = 1;
                }
                banks.map_rom((banks.rom_bank() & 0x60) | low);
            }
            0x6000..=0x7FFF => {
                self.large_ram_mode = value & 0x01 == 0x01;
            }
            0x0000..=0x1FFF => {
                banks.ram_enabled = value & 0x0F == 0x0A;
            }
            0x4000..=0x5FFF => {
                if self.large_ram_mode {
                    banks.map_ram(value & 0x03);
                    log::debug!("MBC1: RAM bank {} selected", banks.ram_bank());
                } else {
                    let high = ((value & 0x03) as u16) << 5;
                    banks.map_rom((banks.rom_bank() & 0x1F) | high);
                }
            }
            _ => {}
        }
    }

    pub(super) fn mode_description(&self) -> &'static str {
        if self.large_ram_mode {
            "Cartridge is in 16MBit ROM/8KByte RAM Mode."
        } else {
            "Cartridge is in 4MBit ROM/32KByte RAM Mode."
        }
    }
}
