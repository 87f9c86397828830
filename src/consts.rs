pub const SCREEN_WIDTH: u8 = 64;
pub const SCREEN_HEIGHT: u8 = 32;
pub const TOTAL_RAM_SIZE: u16 = 4096;
pub const INITIAL_PC: u16 = 0x200;
pub const STACK_DEPTH: usize = 16;
pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Mask applied to every address, memory is 12-bit addressed
pub const ADDRESS_MASK: u16 = TOTAL_RAM_SIZE - 1;

/// Where the built-in hex font lives inside the reserved interpreter area
pub const FONT_ADDRESS: u16 = 0x50;
pub const FONT_GLYPH_HEIGHT: u16 = 5;

pub const FONT_DATA: [u8; 80] = [
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
