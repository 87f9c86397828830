/// Compatibility switches for behaviour that differs between historical
/// interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// 8XY6 / 8XYE shift VY and store the result in VX (COSMAC VIP).
    /// When false VX is shifted in place and VY is ignored (CHIP-48, SUPER-CHIP).
    pub shift_uses_vy: bool,
    /// BXNN jumps to XNN + VX instead of NNN + V0 (CHIP-48, SUPER-CHIP).
    pub jump_uses_vx: bool,
}

impl Quirks {
    /// Behaviour of the original COSMAC VIP interpreter.
    pub fn cosmac_vip() -> Self {
        Quirks {
            shift_uses_vy: true,
            jump_uses_vx: false,
        }
    }
}
