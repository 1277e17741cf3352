use std::fs;
use std::path::Path;

use pretty_hex::{pretty_hex, simple_hex};

use crate::constants::{FONT, FONT_ADDRESS, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::LoadError;
use crate::memory::Memory;

/// Builds a fresh `Memory` holding the font and `rom`.
///
/// The ROM is validated before anything is allocated, so a rejected ROM can't leave
/// half-populated state behind.
pub fn load(rom: &[u8]) -> Result<Memory, LoadError> {
    validate(rom)?;
    let mut memory = blank();
    memory.write_block(PROGRAM_START, rom);
    memory.set_rom_len(rom.len());
    Ok(memory)
}

/// A `Memory` holding only the font, for running before any ROM is loaded
pub fn blank() -> Memory {
    let mut memory = Memory::new();
    memory.write_block(FONT_ADDRESS, &FONT);
    memory
}

/// Replaces all of `memory` with a freshly loaded `rom`; on error `memory` is untouched
pub fn load_into(memory: &mut Memory, rom: &[u8]) -> Result<(), LoadError> {
    *memory = load(rom)?;
    Ok(())
}

/// Reads a ROM file from disk
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    let rom = fs::read(path)?;
    validate(&rom)?;
    Ok(rom)
}

fn validate(rom: &[u8]) -> Result<(), LoadError> {
    match rom.len() {
        0 => Err(LoadError::Empty),
        len if len > MAX_ROM_SIZE => Err(LoadError::too_large(len)),
        _ => Ok(()),
    }
}

fn rom_bytes(memory: &Memory) -> &[u8] {
    let start = usize::from(PROGRAM_START);
    &memory.ram()[start..start + memory.rom_len()]
}

/// The loaded ROM bytes as space separated hex pairs, byte for byte
pub fn hex_dump(memory: &Memory) -> String {
    simple_hex(&rom_bytes(memory))
}

/// The loaded ROM bytes with offsets and an ascii column
pub fn annotated_dump(memory: &Memory) -> String {
    pretty_hex(&rom_bytes(memory))
}
