use super::bank::BankState;

/// MBC2 controller.
///
/// MBC2 decodes address bit 8 to tell its two registers apart: the RAM
/// enable latch lives on even 256-byte sub-pages of $0000-$1FFF and the
/// ROM bank register on odd sub-pages of $2000-$3FFF. It has no registers
/// beyond the shared bank state.
///
/// The 512 bytes of built-in RAM are addressed through the usual RAM page
/// so battery saves line up with the other families.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Mbc2;

const REGISTER_SELECT_BIT: u16 = 0x0100;

impl Mbc2 {
    pub(super) fn write(&mut self, banks: &mut BankState, ram: &mut [u8], addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF if addr & REGISTER_SELECT_BIT == 0 => {
                banks.ram_enabled = value & 0x0F == 0x0A;
            }
            0x2000..=0x3FFF if addr & REGISTER_SELECT_BIT != 0 => {
                let mut bank = (value & 0x1F) as u16;
                if bank == 0 {
                    bank = 1;
                }
                banks.map_rom(bank);
            }
            0xA000..=0xBFFF => {
                if banks.ram_enabled {
                    ram[banks.ram_offset(addr)] = value;
                }
            }
            _ => {}
        }
    }
}
