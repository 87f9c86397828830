use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

use std::fmt;

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// 64x32 monochrome pixel grid. Only mutated by the clear and draw opcodes.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    screen: [[bool; WIDTH]; HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            screen: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.screen = [[false; WIDTH]; HEIGHT];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.screen[y % HEIGHT][x % WIDTH]
    }

    pub fn rows(&self) -> &[[bool; WIDTH]; HEIGHT] {
        &self.screen
    }

    pub fn is_blank(&self) -> bool {
        self.screen.iter().all(|row| row.iter().all(|&p| !p))
    }

    /// XOR `sprite` (one byte per row, MSB leftmost) onto the grid at
    /// (reg_x, reg_y), wrapping around both edges. Returns true when any
    /// lit pixel was turned off.
    pub fn draw(&mut self, reg_x: u8, reg_y: u8, sprite: &[u8]) -> bool {
        let x = reg_x as usize % WIDTH;
        let y = reg_y as usize % HEIGHT;
        let mut did_switch = false;

        for (yo, data) in sprite.iter().enumerate() {
            let row = (y + yo) % HEIGHT;

            for (xo, bit) in byte_to_bits(*data).iter().enumerate() {
                if *bit == 0 {
                    continue;
                }
                let col = (x + xo) % WIDTH;
                let pixel = &mut self.screen[row][col];
                if *pixel {
                    did_switch = true;
                }
                *pixel = !*pixel;
            }
        }
        did_switch
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.screen {
            let line: String = row.iter().map(|&p| if p { '█' } else { '░' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Framebuffer {{\n{}}}", self)
    }
}

/// Bits as 0 or 1 u8 from the most to least significant
fn byte_to_bits(b: u8) -> [u8; 8] {
    std::array::from_fn(|i| (b >> (7 - i)) & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_bits() {
        assert_eq!(byte_to_bits(0b1010_0001), [1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_draw_sets_pixels_without_collision() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw(0, 0, &[0xC0, 0x80]));
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(1, 0));
        assert!(!fb.pixel(2, 0));
        assert!(fb.pixel(0, 1));
        assert!(!fb.pixel(1, 1));
    }

    #[test]
    fn test_double_draw_restores_and_reports_collision() {
        let mut fb = Framebuffer::new();
        fb.draw(3, 4, &[0xFF]);
        let before = fb.clone();
        assert!(!fb.draw(10, 10, &[0x81, 0x42]));
        assert!(fb.draw(10, 10, &[0x81, 0x42]));
        assert_eq!(fb, before);
    }

    #[test]
    fn test_partial_overlap_collides() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0x80]);
        assert!(fb.draw(0, 0, &[0xC0]));
        assert!(!fb.pixel(0, 0));
        assert!(fb.pixel(1, 0));
    }

    #[test]
    fn test_wraps_horizontally_and_vertically() {
        let mut fb = Framebuffer::new();
        fb.draw(62, 31, &[0xF0, 0xF0]);
        assert!(fb.pixel(62, 31));
        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(1, 31));
        assert!(fb.pixel(62, 0));
        assert!(fb.pixel(1, 0));
        assert!(!fb.pixel(2, 0));
    }

    #[test]
    fn test_start_position_wraps() {
        let mut fb = Framebuffer::new();
        fb.draw(64 + 5, 32 + 2, &[0x80]);
        assert!(fb.pixel(5, 2));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0xFF]);
        assert!(!fb.is_blank());
        fb.clear();
        assert!(fb.is_blank());
    }

    #[test]
    fn test_render() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0x80]);
        let text = fb.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("█░"));
        assert_eq!(first.chars().count(), 64);
        assert_eq!(text.lines().count(), 32);
    }
}
