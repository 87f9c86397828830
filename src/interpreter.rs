use crate::Result;
use crate::config::Quirks;
use crate::consts::{ADDRESS_MASK, FONT_ADDRESS, FONT_GLYPH_HEIGHT};
use crate::display::Framebuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::parser::Instruction;
use crate::stack::CallStack;
use crate::state::{Registers, VF};
use crate::timers::{self, SoundEdge};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Something the host should react to after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The framebuffer changed and should be presented again.
    ScreenDirty,
    /// FX0A is waiting for a key press; the program counter did not move.
    BlockedOnKey { register: usize },
    /// The sound timer crossed zero.
    Sound(SoundEdge),
}

/// Outcome of one successfully executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next_pc: u16,
    pub signal: Option<Signal>,
}

impl Step {
    pub fn is_blocked(&self) -> bool {
        matches!(self.signal, Some(Signal::BlockedOnKey { .. }))
    }
}

/// A whole CHIP-8 machine: memory, registers, call stack, framebuffer and
/// keypad, plus the injected random source used by CXNN.
pub struct Interpreter {
    memory: Memory,
    registers: Registers,
    stack: CallStack,
    display: Framebuffer,
    keypad: Keypad,
    quirks: Quirks,
    rng: Box<dyn RngCore + Send>,
    /// Target register of an FX0A that is still waiting for a key.
    waiting_for_key: Option<usize>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

impl Interpreter {
    pub fn new(quirks: Quirks) -> Self {
        Self::with_rng(quirks, StdRng::from_os_rng())
    }

    /// Build a machine around a specific random source, e.g. a seeded one
    /// for reproducible runs.
    pub fn with_rng(quirks: Quirks, rng: impl RngCore + Send + 'static) -> Self {
        Interpreter {
            memory: Memory::new(),
            registers: Registers::new(),
            stack: CallStack::new(),
            display: Framebuffer::new(),
            keypad: Keypad::new(),
            quirks,
            rng: Box::new(rng),
            waiting_for_key: None,
        }
    }

    /// Put every component back to its power-on state. The loaded program
    /// is erased along with the rest of memory; the font is reinstalled.
    pub fn reset(&mut self) {
        debug!("resetting machine");
        self.memory = Memory::new();
        self.registers = Registers::new();
        self.stack.clear();
        self.display.clear();
        self.keypad.clear();
        self.waiting_for_key = None;
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key.is_some()
    }

    /// The instruction word at the program counter.
    pub fn fetch(&self) -> u16 {
        self.memory.read_word(self.registers.pc)
    }

    /// Execute the instruction at the program counter. A fault leaves the
    /// machine exactly as it was before the call.
    pub fn step(&mut self) -> Result<Step> {
        if let Some(register) = self.waiting_for_key {
            return Ok(self.poll_key(register));
        }

        let opcode = self.fetch();
        let instruction = Instruction::from_opcode(opcode)?;
        trace!("{:#05X}: {:04X} {:?}", self.registers.pc, opcode, instruction);
        self.execute(instruction)
    }

    /// Advance both timers by one 60 Hz tick.
    pub fn tick_timers(&mut self) -> Option<SoundEdge> {
        let edge = timers::tick(&mut self.registers);
        if let Some(edge) = edge {
            debug!("sound {:?}", edge);
        }
        edge
    }

    /// Apply one decoded instruction as if it sat at the program counter.
    pub fn execute(&mut self, instruction: Instruction) -> Result<Step> {
        let pc = self.registers.pc;
        let mut next_pc = advance(pc, 2);
        let mut signal = None;

        let v = &mut self.registers.v;

        match instruction {
            Instruction::ClearScreen => {
                self.display.clear();
                signal = Some(Signal::ScreenDirty);
            }
            Instruction::ReturnFromSubroutine => {
                next_pc = self.stack.pop()?;
            }
            Instruction::SystemCall(address) => {
                debug!("ignoring machine code routine at {:#05X}", address);
            }
            Instruction::Jump(address) => {
                next_pc = address;
            }
            Instruction::Call(address) => {
                self.stack.push(next_pc)?;
                next_pc = address;
            }
            Instruction::SkipIfEqualByte(register, value) => {
                if v[register] == value {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SkipIfNotEqualByte(register, value) => {
                if v[register] != value {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SkipIfRegistersEqual(register_x, register_y) => {
                if v[register_x] == v[register_y] {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SetRegisterToValue(register, value) => {
                v[register] = value;
            }
            Instruction::AddToRegister(register, value) => {
                v[register] = v[register].wrapping_add(value);
            }
            Instruction::SetRegisterToRegisterValue(register_x, register_y) => {
                v[register_x] = v[register_y];
            }
            Instruction::RegistersBitwiseOr(register_x, register_y) => {
                v[register_x] |= v[register_y];
            }
            Instruction::RegistersBitwiseAnd(register_x, register_y) => {
                v[register_x] &= v[register_y];
            }
            Instruction::RegistersBitwiseXor(register_x, register_y) => {
                v[register_x] ^= v[register_y];
            }
            // The flag is written after the result, so with X = F the flag wins.
            Instruction::RegistersSumWithOverflow(register_x, register_y) => {
                let (sum, overflow) = v[register_x].overflowing_add(v[register_y]);
                v[register_x] = sum;
                v[VF] = overflow as u8;
            }
            Instruction::SubtractRegisterFromRegisterValue(register_x, register_y) => {
                let (diff, borrow) = v[register_x].overflowing_sub(v[register_y]);
                v[register_x] = diff;
                v[VF] = !borrow as u8;
            }
            Instruction::ShiftRegisterBitsRight(register_x, register_y) => {
                let source = v[shift_source(self.quirks, register_x, register_y)];
                v[register_x] = source >> 1;
                v[VF] = source & 1;
            }
            Instruction::SubtractRegisterValueFromRegister(register_x, register_y) => {
                let (diff, borrow) = v[register_y].overflowing_sub(v[register_x]);
                v[register_x] = diff;
                v[VF] = !borrow as u8;
            }
            Instruction::ShiftRegisterBitsLeft(register_x, register_y) => {
                let source = v[shift_source(self.quirks, register_x, register_y)];
                v[register_x] = source << 1;
                v[VF] = source >> 7;
            }
            Instruction::SkipIfRegistersNotEqual(register_x, register_y) => {
                if v[register_x] != v[register_y] {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SetIndexRegisterToValue(address) => {
                self.registers.set_index(address);
            }
            Instruction::JumpByValue(address) => {
                let offset_register = if self.quirks.jump_uses_vx {
                    (address >> 8) as usize
                } else {
                    0
                };
                next_pc = advance(address, v[offset_register] as u16);
            }
            Instruction::SetRegisterToRandAndValue(register, value) => {
                let n: u8 = self.rng.random();
                v[register] = n & value;
            }
            Instruction::DrawSprite(register_x, register_y, rows) => {
                let (x, y) = (v[register_x], v[register_y]);
                let index = self.registers.index_register;
                let mut sprite = [0u8; 15];
                for (offset, row) in sprite.iter_mut().enumerate().take(rows as usize) {
                    *row = self.memory.read(advance(index, offset as u16));
                }
                let collision = self.display.draw(x, y, &sprite[..rows as usize]);
                self.registers.set_flag(collision);
                signal = Some(Signal::ScreenDirty);
            }
            Instruction::SkipIfKeyPressed(register) => {
                if self.keypad.is_pressed(v[register] & 0xF) {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SkipIfKeyNotPressed(register) => {
                if !self.keypad.is_pressed(v[register] & 0xF) {
                    next_pc = advance(pc, 4);
                }
            }
            Instruction::SetRegisterToDelayTimerValue(register) => {
                v[register] = self.registers.delay_timer;
            }
            Instruction::WaitForKeyPress(register) => {
                debug!("waiting for key into V{:X}", register);
                self.waiting_for_key = Some(register);
                self.keypad.discard_presses();
                return Ok(Step {
                    next_pc: pc,
                    signal: Some(Signal::BlockedOnKey { register }),
                });
            }
            Instruction::SetDelayTimerToRegisterValue(register) => {
                self.registers.delay_timer = v[register];
            }
            Instruction::SetSoundTimerToRegisterValue(register) => {
                let before = self.registers.sound_timer;
                self.registers.sound_timer = v[register];
                signal = timers::sound_edge(before, v[register]).map(Signal::Sound);
            }
            Instruction::AddRegisterToIndexRegister(register) => {
                let index = self.registers.index_register.wrapping_add(v[register] as u16);
                self.registers.set_index(index);
            }
            Instruction::SetIndexRegisterToSpriteForRegister(register) => {
                let character = (v[register] & 0xF) as u16;
                self.registers.set_index(FONT_ADDRESS + character * FONT_GLYPH_HEIGHT);
            }
            Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(register) => {
                let num = v[register];
                let i = self.registers.index_register;
                self.memory.write(i, num / 100);
                self.memory.write(advance(i, 1), (num / 10) % 10);
                self.memory.write(advance(i, 2), num % 10);
            }
            Instruction::DumpRegistersToMemoryAtIndexRegister(register) => {
                let i = self.registers.index_register;
                for ri in 0..=register {
                    self.memory.write(advance(i, ri as u16), v[ri]);
                }
            }
            Instruction::LoadMemoryToRegistersAtIndexRegister(register) => {
                let i = self.registers.index_register;
                for ri in 0..=register {
                    v[ri] = self.memory.read(advance(i, ri as u16));
                }
            }
        }

        self.registers.pc = next_pc;
        Ok(Step { next_pc, signal })
    }

    /// Re-entry of a blocked FX0A: consume a fresh key press if there is one.
    fn poll_key(&mut self, register: usize) -> Step {
        let pc = self.registers.pc;
        match self.keypad.take_press() {
            Some(key) => {
                debug!("key {:X} pressed, stored in V{:X}", key, register);
                self.registers.v[register] = key;
                self.waiting_for_key = None;
                self.registers.pc = advance(pc, 2);
                Step {
                    next_pc: self.registers.pc,
                    signal: None,
                }
            }
            None => Step {
                next_pc: pc,
                signal: Some(Signal::BlockedOnKey { register }),
            },
        }
    }
}

fn shift_source(quirks: Quirks, register_x: usize, register_y: usize) -> usize {
    if quirks.shift_uses_vy {
        register_y
    } else {
        register_x
    }
}

/// `address + offset` wrapped into the 12-bit address space.
fn advance(address: u16, offset: u16) -> u16 {
    address.wrapping_add(offset) & ADDRESS_MASK
}
