use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cartboy_gb::{battery, Cartridge, LoadOptions};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cartboy", version, about = "Inspect Game Boy cartridge images")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the header summary and mapper state of a ROM
    Info {
        rom: PathBuf,
    },
    /// Check the global checksum; exits with an error if it is wrong
    Verify {
        rom: PathBuf,
    },
    /// Hex dump cartridge address space, optionally with another ROM bank mapped
    Peek {
        rom: PathBuf,
        /// Start address in hex, e.g. 4000
        #[arg(value_parser = parse_hex_u16)]
        addr: u16,
        /// ROM bank to map at 4000-7FFF while reading (hex)
        #[arg(long, value_parser = parse_hex_u16)]
        bank: Option<u16>,
        /// Number of bytes to dump
        #[arg(long, default_value_t = 0x40)]
        len: u16,
    },
    /// Show where battery RAM for a ROM is stored and whether it loads
    Sram {
        rom: PathBuf,
    },
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Info { rom } => info(&rom),
        Command::Verify { rom } => verify(&rom),
        Command::Peek {
            rom,
            addr,
            bank,
            len,
        } => peek(&rom, addr, bank, len),
        Command::Sram { rom } => sram(&rom),
    }
}

/// Inspection commands must not create or overwrite save files.
fn open_read_only(rom: &Path) -> Result<Cartridge> {
    let options = LoadOptions::builder().battery(false).build();
    Cartridge::open(rom, &options)
        .with_context(|| format!("Loading the ROM image '{}' failed", rom.display()))
}

fn info(rom: &Path) -> Result<()> {
    let cart = open_read_only(rom)?;
    let header = cart.header();
    println!("{}", cart.cartridge_info());
    println!(
        "Type: {} (${:02X})",
        header.cartridge_type.name(),
        header.cartridge_type.code()
    );
    println!(
        "ROM: {} banks, {}Kb (size code ${:02X})",
        cart.rom_banks(),
        cart.rom_banks() * 16,
        header.rom_size_code
    );
    println!("RAM size code: ${:02X}", header.ram_size_code);
    println!("Features: {:?}", cart.features());
    println!("{}", cart.map_info());
    Ok(())
}

fn verify(rom: &Path) -> Result<()> {
    let cart = open_read_only(rom)?;
    if !cart.verify_checksum() {
        bail!(
            "This cartridge has an invalid checksum (stored ${:04X}).",
            cart.header().global_checksum
        );
    }
    println!("Checksum Ok.");
    Ok(())
}

fn peek(rom: &Path, addr: u16, bank: Option<u16>, len: u16) -> Result<()> {
    let mut cart = open_read_only(rom)?;

    if let Some(bank) = bank {
        log::info!("Mapping ROM bank {bank:02X} to 4000 - 7FFF");
        cart.save_mapping();
        cart.map_rom(bank);
    }
    println!("{}", cart.map_info());

    let end = addr.saturating_add(len);
    let mut line = addr & !0x0F;
    while line < end {
        println!("{}", dump_line(&cart, line));
        match line.checked_add(16) {
            Some(next) => line = next,
            None => break,
        }
    }

    cart.restore_mapping();
    Ok(())
}

/// One hex dump row: 16 bytes starting at `line`.
fn dump_line(cart: &Cartridge, line: u16) -> String {
    let mut hex = String::new();
    let mut ascii = String::new();
    for a in line..=line.saturating_add(15) {
        let b = cart.read(a);
        hex.push_str(&format!("{b:02X} "));
        ascii.push(if (0x20..0x7F).contains(&b) { b as char } else { '.' });
    }
    format!("{line:04X}   {hex}  {ascii}")
}

fn sram(rom: &Path) -> Result<()> {
    let cart = open_read_only(rom)?;
    println!("{}", sram_report(&cart, &battery::save_path_for(rom)));
    Ok(())
}

/// Describe the battery save for `cart`, reading `save_path` into a scratch
/// buffer so the cartridge's own RAM and the file are left alone.
fn sram_report(cart: &Cartridge, save_path: &Path) -> String {
    let header = cart.header();
    let Some(len) = header.cartridge_type.battery_ram_len(header.ram_size_code) else {
        return format!("{} has no battery-backed RAM.", header.cartridge_type.name());
    };

    let mut report = format!("Battery RAM: {len} bytes in '{}'\n", save_path.display());
    let mut ram = vec![0; len];
    match battery::load(save_path, &mut ram, len) {
        Ok(()) => {
            let used = ram.iter().filter(|&&b| b != 0).count();
            report.push_str(&format!("Save file loads: {used} non-zero bytes"));
        }
        Err(e) => report.push_str(&format!("Save file does not load: {e}")),
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartboy_gb::checksum::compute_global_checksum;
    use cartboy_gb::header::GLOBAL_CHECKSUM_OFFSET;
    use cartboy_gb::ROM_BANK_SIZE;

    /// Two-bank image, bank N filled with N, valid global checksum.
    fn test_cart(cart_type: u8, ram_size_code: u8) -> Cartridge {
        let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
        rom[ROM_BANK_SIZE..].fill(1);
        rom[0x134..0x13B].copy_from_slice(b"CLITEST");
        rom[0x147] = cart_type;
        rom[0x148] = 0x00;
        rom[0x149] = ram_size_code;
        let sum = compute_global_checksum(&rom);
        rom[GLOBAL_CHECKSUM_OFFSET..GLOBAL_CHECKSUM_OFFSET + 2].copy_from_slice(&sum.to_be_bytes());
        let options = LoadOptions::builder().battery(false).build();
        Cartridge::from_bytes(&rom, &options).unwrap()
    }

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cartboy-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn dump_line_covers_sixteen_bytes() {
        let cart = test_cart(0x00, 0x00);
        assert_eq!(
            dump_line(&cart, 0x4000),
            format!("4000   {}  {}", "01 ".repeat(16), ".".repeat(16))
        );
    }

    /// The last row of the address space includes $FFFF.
    #[test]
    fn dump_line_reaches_top_of_address_space() {
        let cart = test_cart(0x00, 0x00);
        let line = dump_line(&cart, 0xFFF0);
        assert_eq!(line.matches("FF ").count(), 16);
        assert!(line.starts_with("FFF0   "));
    }

    #[test]
    fn sram_report_reads_save_file_without_touching_cartridge() {
        let cart = test_cart(0x03, 0x02);
        let save = scratch_file("report.sav");

        let missing = sram_report(&cart, &save);
        assert!(missing.starts_with("Battery RAM: 8192 bytes in "));
        assert!(missing.contains("Save file does not load"));

        let mut data = vec![0u8; 8192];
        data[..3].copy_from_slice(&[1, 2, 3]);
        std::fs::write(&save, &data).unwrap();
        let loaded = sram_report(&cart, &save);
        assert!(loaded.ends_with("Save file loads: 3 non-zero bytes"));
        assert!(cart.ram().iter().all(|&b| b == 0));

        let _ = std::fs::remove_file(&save);
    }

    #[test]
    fn sram_report_without_battery() {
        let cart = test_cart(0x01, 0x00);
        assert_eq!(
            sram_report(&cart, Path::new("unused.sav")),
            "ROM+MBC1 has no battery-backed RAM."
        );
    }

    #[test]
    fn hex_arguments_accept_common_prefixes() {
        assert_eq!(parse_hex_u16("4000"), Ok(0x4000));
        assert_eq!(parse_hex_u16("0xA010"), Ok(0xA010));
        assert_eq!(parse_hex_u16("$1ff"), Ok(0x01FF));
        assert!(parse_hex_u16("zz").is_err());
    }

    #[test]
    fn peek_arguments_parse() {
        let cli = Cli::parse_from(["cartboy", "peek", "game.gb", "4000", "--bank", "1F"]);
        match cli.command {
            Command::Peek {
                rom,
                addr,
                bank,
                len,
            } => {
                assert_eq!(rom, PathBuf::from("game.gb"));
                assert_eq!(addr, 0x4000);
                assert_eq!(bank, Some(0x1F));
                assert_eq!(len, 0x40);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
