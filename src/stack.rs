use crate::consts::STACK_DEPTH;
use crate::{Chip8Error, Result};

/// Return addresses of up to 16 nested subroutine calls.
#[derive(Debug, Default, Clone)]
pub struct CallStack {
    frames: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: Vec::with_capacity(STACK_DEPTH),
        }
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.frames.len() >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { address });
        }
        self.frames.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.frames.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= STACK_DEPTH
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
