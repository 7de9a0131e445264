mod bank;
mod debug;
mod mapper;
mod mbc1;
mod mbc2;
mod mbc5;

use std::path::{Path, PathBuf};

pub use debug::DebugOverride;

use crate::battery;
use crate::checksum;
use crate::error::{LoadError, PersistError};
use crate::header::{CartFeatures, CartridgeType, Header};
use crate::options::LoadOptions;
use crate::{RAM_CAPACITY, ROM_BANK_SIZE};

use bank::BankState;
use mapper::Mapper;

/// A loaded Game Boy cartridge: ROM image, external RAM and the bank
/// controller sitting between them and the CPU bus.
///
/// The CPU side only sees [`Cartridge::read`], [`Cartridge::write`] and
/// [`Cartridge::reset`]. Everything else is load/unload plumbing or the
/// debugger interface in `debug.rs`.
pub struct Cartridge {
    header: Header,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
    banks: BankState,
    debug: DebugOverride,
    /// Battery save location; `None` if the cartridge has no battery or
    /// persistence was turned off.
    save_path: Option<PathBuf>,
}

impl Cartridge {
    /// Load a ROM image from disk, along with its battery RAM if any.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let image = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let save_path = options
            .save_path
            .clone()
            .unwrap_or_else(|| battery::save_path_for(path));
        log::info!("Loading ROM '{}'", path.display());
        Self::build(image, options, Some(save_path))
    }

    /// Build a cartridge from an in-memory image.
    ///
    /// Battery RAM is only persisted if `options.save_path` names a file.
    pub fn from_bytes(image: &[u8], options: &LoadOptions) -> Result<Self, LoadError> {
        Self::build(image.to_vec(), options, options.save_path.clone())
    }

    fn build(
        mut image: Vec<u8>,
        options: &LoadOptions,
        save_path: Option<PathBuf>,
    ) -> Result<Self, LoadError> {
        // The header sits in bank 0, so it can be probed before the true
        // image size is known.
        let header = Header::parse(&image)?;

        let expected = header.rom_len();
        if image.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                actual: image.len(),
            });
        }
        if image.len() > expected {
            log::warn!(
                "ROM image has {} trailing bytes beyond the {} declared banks; ignoring them",
                image.len() - expected,
                header.rom_banks
            );
            image.truncate(expected);
        }

        if !checksum::verify_checksum(&image) {
            let computed = checksum::compute_global_checksum(&image);
            if options.strict_checksum {
                return Err(LoadError::BadChecksum {
                    stored: header.global_checksum,
                    computed,
                });
            }
            log::warn!(
                "This cartridge has an invalid checksum (stored ${:04X}, computed ${computed:04X}). It may not execute correctly.",
                header.global_checksum
            );
        }

        log::info!(
            "Loaded ROM: {} banks, {}Kb. Type: {}",
            header.rom_banks,
            header.rom_banks * 16,
            header.cartridge_type.name()
        );

        let save_path = save_path
            .filter(|_| options.battery && header.cartridge_type.is_battery_backed());

        let mut cart = Self {
            mapper: Mapper::for_type(header.cartridge_type),
            header,
            rom: image,
            ram: vec![0; RAM_CAPACITY],
            banks: BankState::default(),
            debug: DebugOverride::Idle,
            save_path,
        };

        if cart.save_path.is_some() {
            if let Err(e) = cart.load_battery_ram() {
                log::warn!("Error loading battery RAM: {e}");
            }
        }

        Ok(cart)
    }

    /// Byte currently mapped at `addr`.
    ///
    /// Valid for $0000-$7FFF and $A000-$BFFF. RAM reads are not gated by the
    /// enable latch. Anything else, or a bank past the end of the image,
    /// reads as open bus ($FF).
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            0x4000..=0x7FFF => self
                .rom
                .get(self.banks.rom_offset(addr))
                .copied()
                .unwrap_or(0xFF),
            0xA000..=0xBFFF => self.ram[self.banks.ram_offset(addr)],
            _ => 0xFF,
        }
    }

    /// CPU write into cartridge space. Writes to ROM addresses program the
    /// bank controller; writes to $A000-$BFFF go to RAM if the controller
    /// lets them through.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.mapper.write(&mut self.banks, &mut self.ram, addr, value);
    }

    /// Map ROM bank 1 back into the switched window.
    pub fn reset(&mut self) {
        self.banks.map_rom(1);
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn cartridge_type(&self) -> CartridgeType {
        self.header.cartridge_type
    }

    pub fn features(&self) -> CartFeatures {
        self.header.cartridge_type.features()
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn rom_banks(&self) -> usize {
        self.rom.len() / ROM_BANK_SIZE
    }

    pub fn ram_bank(&self) -> u8 {
        self.banks.ram_bank()
    }

    pub fn ram_enabled(&self) -> bool {
        self.banks.ram_enabled
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn verify_checksum(&self) -> bool {
        checksum::verify_checksum(&self.rom)
    }

    /// One-line summary: title, size and checksum status.
    pub fn cartridge_info(&self) -> String {
        let status = if self.verify_checksum() {
            "Checksum Ok."
        } else {
            "Checksum invalid!"
        };
        format!(
            "ROM Info: Name = {}, Size = {}Kbit, {status}",
            self.header.title,
            self.rom_banks() * 128
        )
    }

    fn battery_ram_len(&self) -> Option<usize> {
        let header = &self.header;
        header.cartridge_type.battery_ram_len(header.ram_size_code)
    }

    /// Read battery RAM from the save file into the start of RAM.
    ///
    /// On failure RAM keeps whatever it held before (zeroes right after
    /// load). Cartridges without a battery succeed without touching disk.
    pub fn load_battery_ram(&mut self) -> Result<(), PersistError> {
        let Some(len) = self.battery_ram_len() else {
            return Ok(());
        };
        let path = self.save_path.as_deref().ok_or(PersistError::NoSavePath)?;
        battery::load(path, &mut self.ram, len)
    }

    /// Write battery RAM to the save file.
    pub fn save_battery_ram(&self) -> Result<(), PersistError> {
        let Some(len) = self.battery_ram_len() else {
            return Ok(());
        };
        let path = self.save_path.as_deref().ok_or(PersistError::NoSavePath)?;
        battery::store(path, &self.ram, len)
    }

    /// Unload the cartridge, flushing battery RAM first.
    ///
    /// A failed save is logged and otherwise dropped.
    pub fn detach(self) {
        if self.save_path.is_none() {
            return;
        }
        if let Err(e) = self.save_battery_ram() {
            log::error!("Error saving battery RAM: {e}");
        }
    }
}
