/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every RAM address and to the program counter
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// 0x000 - 0x1FF is reserved for the interpreter; ROMs are loaded right after it
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Index of VF, the register that doubles as the flag register
pub const FLAG_REGISTER: usize = 0xF;

/// Where the hexadecimal glyphs live in memory
pub const FONT_ADDRESS: u16 = 0x50;

/// Every glyph is 5 rows of 8 pixels
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Planes are always allocated at the extended resolution
pub const PLANE_WIDTH: usize = 128;
pub const PLANE_HEIGHT: usize = 64;

/// Active area while in standard resolution
pub const STANDARD_WIDTH: usize = 64;
pub const STANDARD_HEIGHT: usize = 32;

/// Horizontal scroll distance in extended resolution (halved in standard)
pub const HORIZONTAL_SCROLL: usize = 4;

/// Intensity given to a pixel the moment it is erased
pub const FADE_CEILING: f32 = 0.95;

/// Intensity removed from every fading pixel per tick
pub const DEFAULT_FADE_SPEED: f32 = 0.1;

/// Side length of the last-sprite debug snapshot
pub const SPRITE_SNAPSHOT_SIZE: usize = 16;

/// # Font
/// 16 glyphs (0..F), 5 bytes each, installed at `FONT_ADDRESS`.
///
/// Each byte is one row; the high nibble holds the 4 visible pixels.
/// ```text
/// 0xF0 -> ####
/// 0x90 -> #  #
/// 0x90 -> #  #
/// 0x90 -> #  #
/// 0xF0 -> ####
/// ```
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
