use super::mapper::Mapper;
use super::Cartridge;
use crate::header::CartFeatures;

/// Debugger bank override state.
///
/// While `Pending`, the debugger may have forced another ROM bank into
/// the switched window; `saved_bank` is the bank the running program had
/// selected and the one [`Cartridge::restore_mapping`] goes back to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DebugOverride {
    #[default]
    Idle,
    Pending {
        saved_bank: u16,
    },
}

impl Cartridge {
    /// Remember the program's ROM bank before the debugger remaps it.
    ///
    /// Only the first call after a restore records anything, so nested
    /// overrides always unwind to the program's own bank. ROM-only
    /// cartridges have no mapping to save.
    pub fn save_mapping(&mut self) {
        if matches!(self.mapper, Mapper::None) {
            return;
        }
        if self.debug == DebugOverride::Idle {
            self.debug = DebugOverride::Pending {
                saved_bank: self.banks.rom_bank(),
            };
        }
    }

    /// Put back the bank recorded by [`Cartridge::save_mapping`], if any.
    pub fn restore_mapping(&mut self) {
        if let DebugOverride::Pending { saved_bank } = std::mem::take(&mut self.debug) {
            log::info!("ROM mapping restored to bank {saved_bank:02X}");
            self.banks.map_rom(saved_bank);
        }
    }

    /// Force `bank` into $4000-$7FFF, bypassing the controller registers.
    ///
    /// Cartridges without a controller always show bank 1 there, so this
    /// does nothing for them.
    pub fn map_rom(&mut self, bank: u16) {
        if matches!(self.mapper, Mapper::None) {
            return;
        }
        self.banks.map_rom(bank);
    }

    /// Write `value` straight into the byte backing `addr`.
    ///
    /// ROM addresses are patched in place instead of being treated as
    /// controller writes; this is how breakpoint opcodes get injected.
    /// Without a controller the ROM window is flat, so `addr` is the image
    /// offset. Offsets past the end of the image are ignored.
    pub fn debug_write(&mut self, addr: u16, value: u8) {
        let flat = matches!(self.mapper, Mapper::None);
        let cell = match addr {
            0x0000..=0x3FFF => self.rom.get_mut(addr as usize),
            0x4000..=0x7FFF if flat => self.rom.get_mut(addr as usize),
            0x4000..=0x7FFF => self.rom.get_mut(self.banks.rom_offset(addr)),
            0xA000..=0xBFFF => self.ram.get_mut(self.banks.ram_offset(addr)),
            _ => None,
        };
        if let Some(cell) = cell {
            *cell = value;
        }
    }

    /// ROM bank currently mapped at $4000-$7FFF.
    pub fn current_bank(&self) -> u16 {
        self.banks.rom_bank()
    }

    pub fn debug_override(&self) -> DebugOverride {
        self.debug
    }

    /// Summary of the controller state for the debugger's mapper view.
    pub fn map_info(&self) -> String {
        let has_ram = self.features().contains(CartFeatures::RAM);
        self.mapper.describe(&self.banks, has_ram)
    }
}
