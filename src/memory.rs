use crate::consts::{ADDRESS_MASK, FONT_ADDRESS, FONT_DATA, INITIAL_PC, TOTAL_RAM_SIZE};
use crate::{Chip8Error, Result};

// Addresses are u16 as on the machine; every access is masked to 12 bits
// so address arithmetic wraps instead of faulting.

/// 4 KiB of RAM. 0x000-0x1FF is reserved for the interpreter and holds the
/// font, programs are loaded at 0x200.
pub struct Memory {
    ram: [u8; TOTAL_RAM_SIZE as usize],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut ram = [0; TOTAL_RAM_SIZE as usize];
        let font_start = FONT_ADDRESS as usize;
        ram[font_start..font_start + FONT_DATA.len()].copy_from_slice(&FONT_DATA);
        Memory { ram }
    }

    pub fn read(&self, address: u16) -> u8 {
        self.ram[(address & ADDRESS_MASK) as usize]
    }

    /// Opcode store. Writes into the font glyphs are dropped so FX29 always
    /// points at intact digits.
    pub fn write(&mut self, address: u16, value: u8) {
        let address = address & ADDRESS_MASK;
        if is_font(address) {
            return;
        }
        self.ram[address as usize] = value;
    }

    /// Big-endian instruction word at `address`, the second byte wraps to 0x000
    /// when `address` is the last cell.
    pub fn read_word(&self, address: u16) -> u16 {
        let hi = self.read(address) as u16;
        let lo = self.read(address.wrapping_add(1)) as u16;
        hi << 8 | lo
    }

    /// Copy a program image verbatim to 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let start = INITIAL_PC as usize;
        let max_size = self.ram.len() - start;
        if program.len() > max_size {
            return Err(Chip8Error::LoadTooLarge {
                size: program.len(),
                max_size,
            });
        }
        self.ram[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Contiguous view for hosts (debuggers, dumps). Unlike opcode accesses
    /// this does not wrap.
    pub fn region(&self, start: u16, len: usize) -> Result<&[u8]> {
        let start = start as usize;
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.ram.len() {
            return Err(Chip8Error::MemoryOutOfRange { address: end - 1 });
        }
        Ok(&self.ram[start..end])
    }
}

fn is_font(address: u16) -> bool {
    (FONT_ADDRESS..FONT_ADDRESS + FONT_DATA.len() as u16).contains(&address)
}
