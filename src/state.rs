use crate::consts::{ADDRESS_MASK, INITIAL_PC, REGISTER_COUNT};

/// Index of the flag register. Carry, borrow, shifted-out bit and sprite
/// collision all land here and overwrite whatever it held.
pub const VF: usize = 0xF;

/// The register file: V0-VF, the index register, the program counter and
/// both timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub index_register: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            index_register: 0,
            pc: INITIAL_PC,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[VF] = set as u8;
    }

    /// Only the low 12 bits of I are significant.
    pub fn set_index(&mut self, address: u16) {
        self.index_register = address & ADDRESS_MASK;
    }
}
