use crate::{RAM_BANK_SIZE, ROM_BANK_SIZE};

/// Banking registers shared by every mapper family.
///
/// The page offsets are derived values; they are only ever updated through
/// [`BankState::map_rom`] and [`BankState::map_ram`] so they cannot go stale
/// relative to the bank numbers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BankState {
    rom_bank: u16,
    rom_page_offset: usize,
    ram_bank: u8,
    ram_page_start: usize,
    pub(crate) ram_enabled: bool,
}

impl Default for BankState {
    fn default() -> Self {
        let mut state = Self {
            rom_bank: 0,
            rom_page_offset: 0,
            ram_bank: 0,
            ram_page_start: 0,
            ram_enabled: false,
        };
        state.map_rom(1);
        state
    }
}

impl BankState {
    /// Map ROM bank `bank` at $4000-$7FFF.
    ///
    /// No aliasing or masking happens here; the mapper handlers apply the
    /// chip-specific rules before calling this.
    pub(crate) fn map_rom(&mut self, bank: u16) {
        self.rom_bank = bank;
        self.rom_page_offset = bank as usize * ROM_BANK_SIZE;
    }

    /// Map RAM bank `bank` at $A000-$BFFF.
    pub(crate) fn map_ram(&mut self, bank: u8) {
        self.ram_bank = bank;
        self.ram_page_start = bank as usize * RAM_BANK_SIZE;
    }

    #[inline]
    pub(crate) fn rom_bank(&self) -> u16 {
        self.rom_bank
    }

    #[inline]
    pub(crate) fn ram_bank(&self) -> u8 {
        self.ram_bank
    }

    /// Image offset of a CPU address in the switched ROM window.
    #[inline]
    pub(crate) fn rom_offset(&self, addr: u16) -> usize {
        self.rom_page_offset + (addr as usize - 0x4000)
    }

    /// RAM offset of a CPU address in the external RAM window.
    #[inline]
    pub(crate) fn ram_offset(&self, addr: u16) -> usize {
        self.ram_page_start + (addr as usize - 0xA000)
    }
}
