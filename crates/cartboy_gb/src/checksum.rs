use crate::header::GLOBAL_CHECKSUM_OFFSET;

/// Sum of every ROM byte except the two checksum bytes, wrapping at 16 bits.
pub fn compute_global_checksum(rom: &[u8]) -> u16 {
    rom.iter()
        .enumerate()
        .filter(|&(i, _)| i != GLOBAL_CHECKSUM_OFFSET && i != GLOBAL_CHECKSUM_OFFSET + 1)
        .fold(0u16, |total, (_, &b)| total.wrapping_add(b as u16))
}

/// Big-endian checksum stored at $014E-$014F.
pub fn stored_global_checksum(rom: &[u8]) -> Option<u16> {
    let hi = *rom.get(GLOBAL_CHECKSUM_OFFSET)?;
    let lo = *rom.get(GLOBAL_CHECKSUM_OFFSET + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}

/// Returns `true` if the stored global checksum matches the image.
///
/// Real hardware never checks this value, so callers decide whether a
/// mismatch is worth more than a warning.
pub fn verify_checksum(rom: &[u8]) -> bool {
    stored_global_checksum(rom) == Some(compute_global_checksum(rom))
}
