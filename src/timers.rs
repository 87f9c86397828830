use crate::state::Registers;

/// Rate at which the host is expected to call [`tick`].
pub const TIMER_HZ: u32 = 60;

/// Change of the sound timer between zero and non-zero, i.e. when the host
/// should start or stop its tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEdge {
    On,
    Off,
}

/// Edge caused by moving the sound timer from `before` to `after`.
pub fn sound_edge(before: u8, after: u8) -> Option<SoundEdge> {
    match (before, after) {
        (0, 1..) => Some(SoundEdge::On),
        (1.., 0) => Some(SoundEdge::Off),
        _ => None,
    }
}

/// Decrement both timers by one, floored at zero. Never touches the
/// program counter.
pub fn tick(registers: &mut Registers) -> Option<SoundEdge> {
    registers.delay_timer = registers.delay_timer.saturating_sub(1);

    let before = registers.sound_timer;
    registers.sound_timer = before.saturating_sub(1);
    sound_edge(before, registers.sound_timer)
}
