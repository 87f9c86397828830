use crate::{Chip8Error, Result};

/// One decoded instruction word. Register operands are indices 0x0-0xF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 - clear screen
    ClearScreen,
    /// 00EE - return from subroutine
    ReturnFromSubroutine,
    /// 0NNN - call machine code routine at NNN (ignored)
    SystemCall(u16),
    /// 1NNN - jump to NNN
    Jump(u16),
    /// 2NNN - call subroutine at NNN
    Call(u16),
    /// 3XNN - skip next if VX equals NN
    SkipIfEqualByte(usize, u8),
    /// 4XNN - skip next if VX does not equal NN
    SkipIfNotEqualByte(usize, u8),
    /// 5XY0 - skip next if VX equals VY
    SkipIfRegistersEqual(usize, usize),
    /// 6XNN - set VX to NN
    SetRegisterToValue(usize, u8),
    /// 7XNN - add NN to VX, VF untouched
    AddToRegister(usize, u8),
    /// 8XY0 - set VX to value of VY
    SetRegisterToRegisterValue(usize, usize),
    /// 8XY1 - set VX | VY
    RegistersBitwiseOr(usize, usize),
    /// 8XY2 - set VX & VY
    RegistersBitwiseAnd(usize, usize),
    /// 8XY3 - set VX ^ VY
    RegistersBitwiseXor(usize, usize),
    /// 8XY4 - add VY to VX (with VF as overflow control)
    RegistersSumWithOverflow(usize, usize),
    /// 8XY5 - VX = VX - VY (with VF as borrow control)
    SubtractRegisterFromRegisterValue(usize, usize),
    /// 8XY6 - shift right, LSB stored in VF
    ShiftRegisterBitsRight(usize, usize),
    /// 8XY7 - VX = VY - VX (with VF as borrow control)
    SubtractRegisterValueFromRegister(usize, usize),
    /// 8XYE - shift left, MSB stored in VF
    ShiftRegisterBitsLeft(usize, usize),
    /// 9XY0 - skip next if VX does not equal VY
    SkipIfRegistersNotEqual(usize, usize),
    /// ANNN - set I to NNN
    SetIndexRegisterToValue(u16),
    /// BNNN - jump to V0 + NNN
    JumpByValue(u16),
    /// CXNN - set VX to rand(0, 255) & NN
    SetRegisterToRandAndValue(usize, u8),
    /// DXYN - draw an N rows tall sprite from I at (VX, VY)
    DrawSprite(usize, usize, u8),
    /// EX9E - skip next if key VX is pressed
    SkipIfKeyPressed(usize),
    /// EXA1 - skip next if key VX is not pressed
    SkipIfKeyNotPressed(usize),
    /// FX07 - set VX to delay timer value
    SetRegisterToDelayTimerValue(usize),
    /// FX0A - wait for a key press and store it in VX
    WaitForKeyPress(usize),
    /// FX15 - set delay timer to VX
    SetDelayTimerToRegisterValue(usize),
    /// FX18 - set sound timer to VX
    SetSoundTimerToRegisterValue(usize),
    /// FX1E - add VX to I (don't consider overflow)
    AddRegisterToIndexRegister(usize),
    /// FX29 - set I to location of sprite for character in VX
    SetIndexRegisterToSpriteForRegister(usize),
    /// FX33 - store binary coded decimal at memory under I(I+1)(I+2)
    StoreBinaryCodedDecimalAtIndexRegisterValue(usize),
    /// FX55 - dump registers V0 to VX in memory, starting from I
    DumpRegistersToMemoryAtIndexRegister(usize),
    /// FX65 - load memory starting from I into V0 to VX
    LoadMemoryToRegistersAtIndexRegister(usize),
}

impl Instruction {
    pub fn from_opcode(opcode: u16) -> Result<Self> {
        let n1 = ((opcode >> 12) & 0xF) as usize;
        let n2 = ((opcode >> 8) & 0xF) as usize;
        let n3 = ((opcode >> 4) & 0xF) as usize;
        let n4 = (opcode & 0xF) as usize;

        let address = opcode & 0x0FFF;
        let byte_value = (opcode & 0x00FF) as u8;

        match (n1, n2, n3, n4) {
            (0, 0, 0xE, 0) => Ok(Instruction::ClearScreen),
            (0, 0, 0xE, 0xE) => Ok(Instruction::ReturnFromSubroutine),
            (0, _, _, _) => Ok(Instruction::SystemCall(address)),
            (1, _, _, _) => Ok(Instruction::Jump(address)),
            (2, _, _, _) => Ok(Instruction::Call(address)),
            (3, x, _, _) => Ok(Instruction::SkipIfEqualByte(x, byte_value)),
            (4, x, _, _) => Ok(Instruction::SkipIfNotEqualByte(x, byte_value)),
            (5, x, y, 0) => Ok(Instruction::SkipIfRegistersEqual(x, y)),
            (6, x, _, _) => Ok(Instruction::SetRegisterToValue(x, byte_value)),
            (7, x, _, _) => Ok(Instruction::AddToRegister(x, byte_value)),
            (8, x, y, 0) => Ok(Instruction::SetRegisterToRegisterValue(x, y)),
            (8, x, y, 1) => Ok(Instruction::RegistersBitwiseOr(x, y)),
            (8, x, y, 2) => Ok(Instruction::RegistersBitwiseAnd(x, y)),
            (8, x, y, 3) => Ok(Instruction::RegistersBitwiseXor(x, y)),
            (8, x, y, 4) => Ok(Instruction::RegistersSumWithOverflow(x, y)),
            (8, x, y, 5) => Ok(Instruction::SubtractRegisterFromRegisterValue(x, y)),
            (8, x, y, 6) => Ok(Instruction::ShiftRegisterBitsRight(x, y)),
            (8, x, y, 7) => Ok(Instruction::SubtractRegisterValueFromRegister(x, y)),
            (8, x, y, 0xE) => Ok(Instruction::ShiftRegisterBitsLeft(x, y)),
            (9, x, y, 0) => Ok(Instruction::SkipIfRegistersNotEqual(x, y)),
            (0xA, _, _, _) => Ok(Instruction::SetIndexRegisterToValue(address)),
            (0xB, _, _, _) => Ok(Instruction::JumpByValue(address)),
            (0xC, x, _, _) => Ok(Instruction::SetRegisterToRandAndValue(x, byte_value)),
            (0xD, x, y, n) => Ok(Instruction::DrawSprite(x, y, n as u8)),
            (0xE, x, 9, 0xE) => Ok(Instruction::SkipIfKeyPressed(x)),
            (0xE, x, 0xA, 1) => Ok(Instruction::SkipIfKeyNotPressed(x)),
            (0xF, x, 0, 7) => Ok(Instruction::SetRegisterToDelayTimerValue(x)),
            (0xF, x, 0, 0xA) => Ok(Instruction::WaitForKeyPress(x)),
            (0xF, x, 1, 5) => Ok(Instruction::SetDelayTimerToRegisterValue(x)),
            (0xF, x, 1, 8) => Ok(Instruction::SetSoundTimerToRegisterValue(x)),
            (0xF, x, 1, 0xE) => Ok(Instruction::AddRegisterToIndexRegister(x)),
            (0xF, x, 2, 9) => Ok(Instruction::SetIndexRegisterToSpriteForRegister(x)),
            (0xF, x, 3, 3) => Ok(Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(x)),
            (0xF, x, 5, 5) => Ok(Instruction::DumpRegistersToMemoryAtIndexRegister(x)),
            (0xF, x, 6, 5) => Ok(Instruction::LoadMemoryToRegistersAtIndexRegister(x)),
            (_, _, _, _) => Err(Chip8Error::UnknownOpcode { opcode }),
        }
    }
}
