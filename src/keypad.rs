use crate::consts::KEY_COUNT;
use crate::{Chip8Error, Result};

/// State of the 16-key hex pad as written by the host.
///
/// Besides the held/released flags the pad latches press edges, so the
/// key-wait opcode can tell a fresh press from a key that was already down.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
    fresh_presses: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) -> Result<()> {
        let k = Self::index(key)?;
        if !self.keys[k] {
            self.fresh_presses |= 1 << k;
        }
        self.keys[k] = true;
        Ok(())
    }

    pub fn release(&mut self, key: u8) -> Result<()> {
        let k = Self::index(key)?;
        self.keys[k] = false;
        Ok(())
    }

    /// Keys outside the pad read as not pressed; opcodes take the key number
    /// from a full 8-bit register.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.keys = [false; KEY_COUNT];
        self.fresh_presses = 0;
    }

    /// Forget press edges seen so far.
    pub fn discard_presses(&mut self) {
        self.fresh_presses = 0;
    }

    /// Take the lowest-numbered key pressed since the last call or discard.
    pub fn take_press(&mut self) -> Option<u8> {
        if self.fresh_presses == 0 {
            return None;
        }
        let key = self.fresh_presses.trailing_zeros() as u8;
        self.fresh_presses &= !(1 << key);
        Some(key)
    }

    fn index(key: u8) -> Result<usize> {
        if (key as usize) < KEY_COUNT {
            Ok(key as usize)
        } else {
            Err(Chip8Error::InvalidKey { key })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut pad = Keypad::new();
        pad.press(0xA).unwrap();
        assert!(pad.is_pressed(0xA));
        assert!(!pad.is_pressed(0xB));
        pad.release(0xA).unwrap();
        assert!(!pad.is_pressed(0xA));
    }

    #[test]
    fn test_invalid_key() {
        let mut pad = Keypad::new();
        assert_eq!(pad.press(0x10), Err(Chip8Error::InvalidKey { key: 0x10 }));
        assert!(!pad.is_pressed(0x10));
    }

    #[test]
    fn test_press_edges_are_consumed_once() {
        let mut pad = Keypad::new();
        pad.press(7).unwrap();
        pad.press(3).unwrap();
        assert_eq!(pad.take_press(), Some(3));
        assert_eq!(pad.take_press(), Some(7));
        assert_eq!(pad.take_press(), None);
        // still held
        assert!(pad.is_pressed(3));
    }

    #[test]
    fn test_holding_a_key_is_not_a_new_press() {
        let mut pad = Keypad::new();
        pad.press(5).unwrap();
        pad.discard_presses();
        pad.press(5).unwrap();
        assert_eq!(pad.take_press(), None);
        pad.release(5).unwrap();
        pad.press(5).unwrap();
        assert_eq!(pad.take_press(), Some(5));
    }
}
