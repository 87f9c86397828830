use rand::SeedableRng;
use rand::rngs::StdRng;
use secrus8::consts::{FONT_ADDRESS, FONT_DATA, SCREEN_HEIGHT, SCREEN_WIDTH};
use secrus8::{Chip8Error, Instruction, Interpreter, Quirks, Signal};

fn load(program: &[u16]) -> Interpreter {
    let mut vm = Interpreter::with_rng(Quirks::default(), StdRng::seed_from_u64(0xC8));
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
    vm.load_program(&bytes).unwrap();
    vm
}

/// Lit pixels of an 8 pixel wide, `rows` tall region at the origin, one
/// byte per row like sprite data.
fn region_bits(vm: &Interpreter, rows: usize) -> Vec<u8> {
    (0..rows)
        .map(|y| {
            (0..8).fold(0u8, |acc, x| acc << 1 | vm.framebuffer().pixel(x, y) as u8)
        })
        .collect()
}

#[test]
fn test_set_then_add() {
    let mut vm = load(&[0x6005, 0x7003]);
    vm.step().unwrap();
    vm.step().unwrap();
    assert_eq!(vm.registers().v[0], 8);
    assert_eq!(vm.registers().pc, 0x204);
    assert_eq!(vm.registers().v[0xF], 0);
}

#[test]
fn test_clear_screen_blanks_lit_framebuffer() {
    let mut vm = load(&[0xA050, 0xD005, 0x00E0]);
    vm.step().unwrap();
    vm.step().unwrap();
    assert!(!vm.framebuffer().is_blank());
    let pc = vm.registers().pc;
    vm.step().unwrap();
    assert!(vm.framebuffer().is_blank());
    assert_eq!(vm.registers().pc, pc + 2);
}

#[test]
fn test_draw_font_zero() {
    let mut vm = load(&[0xA050, 0xD005]);
    assert_eq!(FONT_ADDRESS, 0x50);
    vm.step().unwrap();
    assert_eq!(vm.step().unwrap().signal, Some(Signal::ScreenDirty));

    assert_eq!(region_bits(&vm, 5), FONT_DATA[..5].to_vec());
    assert_eq!(region_bits(&vm, 5), vec![0xF0, 0x90, 0x90, 0x90, 0xF0]);
    assert_eq!(vm.registers().v[0xF], 0);

    // nothing outside the glyph
    let lit = (0..SCREEN_HEIGHT as usize)
        .flat_map(|y| (0..SCREEN_WIDTH as usize).map(move |x| (x, y)))
        .filter(|&(x, y)| vm.framebuffer().pixel(x, y))
        .count();
    assert_eq!(lit, 14);
}

#[test]
fn test_double_draw_restores_framebuffer() {
    // draw "8" at (2, 1) over a lit "0" at the origin, twice
    let mut vm = load(&[0xA050, 0xD005, 0x6A02, 0x6B01, 0x6C08, 0xFC29, 0xDAB5, 0xDAB5]);
    for _ in 0..6 {
        vm.step().unwrap();
    }
    let before = vm.framebuffer().clone();

    vm.step().unwrap();
    assert_eq!(vm.registers().v[0xF], 1);
    assert_ne!(vm.framebuffer(), &before);

    vm.step().unwrap();
    assert_eq!(vm.registers().v[0xF], 1);
    assert_eq!(vm.framebuffer(), &before);
}

#[test]
fn test_nested_calls_overflow_on_seventeenth() {
    // each call lands on the next call
    let program: Vec<u16> = (0..17u16).map(|i| 0x2000 | (0x202 + i * 2)).collect();
    let mut vm = load(&program);
    for depth in 1..=16 {
        vm.step().unwrap();
        assert_eq!(vm.stack().depth(), depth);
    }
    let err = vm.step().unwrap_err();
    assert!(matches!(err, Chip8Error::StackOverflow { .. }));
    assert_eq!(vm.stack().depth(), 16);
}

#[test]
fn test_host_can_skip_unknown_opcode() {
    let mut vm = load(&[0xFFFF, 0x6A01]);
    assert_eq!(vm.step(), Err(Chip8Error::UnknownOpcode { opcode: 0xFFFF }));
    assert_eq!(vm.registers().pc, 0x200);

    // skip over the bad word and carry on
    vm.execute(Instruction::Jump(0x202)).unwrap();
    vm.step().unwrap();
    assert_eq!(vm.registers().v[0xA], 1);
    assert_eq!(vm.registers().pc, 0x204);
}

#[test]
fn test_timers_never_go_below_zero() {
    let mut vm = load(&[0x6004, 0xF015, 0xF018]);
    for _ in 0..3 {
        vm.step().unwrap();
    }
    let mut last = (vm.registers().delay_timer, vm.registers().sound_timer);
    for _ in 0..20 {
        vm.tick_timers();
        let now = (vm.registers().delay_timer, vm.registers().sound_timer);
        assert!(now.0 <= last.0 && now.1 <= last.1);
        last = now;
    }
    assert_eq!(last, (0, 0));
    assert_eq!(vm.registers().pc, 0x206);
}

#[test]
fn test_key_wait_round_trip() {
    let mut vm = load(&[0xF50A, 0xE59E, 0x6001, 0x6002]);
    for _ in 0..3 {
        assert!(vm.step().unwrap().is_blocked());
    }
    vm.keypad_mut().press(9).unwrap();
    vm.step().unwrap();
    assert_eq!(vm.registers().v[5], 9);
    // key 9 still held, so EX9E skips the next instruction
    vm.step().unwrap();
    vm.step().unwrap();
    assert_eq!(vm.registers().v[0], 2);
}

#[test]
fn test_oversized_program_is_rejected() {
    let mut vm = Interpreter::default();
    let rom = vec![0u8; 4096 - 0x200 + 2];
    assert_eq!(
        vm.load_program(&rom),
        Err(Chip8Error::LoadTooLarge {
            size: 4096 - 0x200 + 2,
            max_size: 4096 - 0x200,
        })
    );
}
