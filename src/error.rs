use thiserror::Error;

/// Faults reported by the machine. None of them is recovered internally,
/// the host decides whether to halt, skip or report.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("stack overflow pushing return address {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of range at {address:#06X}")]
    MemoryOutOfRange { address: usize },

    #[error("program is too large ({size} bytes), at most {max_size} bytes fit")]
    LoadTooLarge { size: usize, max_size: usize },

    #[error("key {key:#X} is not on the 16-key pad")]
    InvalidKey { key: u8 },
}
