use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use secrus8::timers::TIMER_HZ;
use secrus8::{Interpreter, Quirks, Signal, SoundEdge};

const DEFAULT_IPS: u32 = 700;

#[derive(Parser, Debug)]
#[command(version, about = "Run a CHIP-8 program in the terminal", long_about = None)]
struct Args {
    /// Path to the program image, loaded verbatim at 0x200
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = DEFAULT_IPS)]
    ips: u32,

    /// Stop after this many 60 Hz frames
    #[arg(short = 'n', long)]
    max_frames: Option<u64>,

    /// Seed for the random number opcode, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// 8XY6/8XYE shift VY into VX (original COSMAC VIP behaviour)
    #[arg(long)]
    shift_uses_vy: bool,

    /// BXNN jumps to XNN + VX
    #[arg(long)]
    jump_uses_vx: bool,

    /// Do not draw the screen
    #[arg(long)]
    headless: bool,
}

enum RunResult {
    Finished,
    FrameLimit,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("secrus8", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let rom = fs::read(&args.rom)
        .with_context(|| format!("reading {}", args.rom.display()))?;
    info!("read {} bytes from '{}'", rom.len(), args.rom.display());

    let quirks = Quirks {
        shift_uses_vy: args.shift_uses_vy,
        jump_uses_vx: args.jump_uses_vx,
    };
    let mut core = match args.seed {
        Some(seed) => Interpreter::with_rng(quirks, StdRng::seed_from_u64(seed)),
        None => Interpreter::new(quirks),
    };
    core.load_program(&rom)?;

    match run(&mut core, &args)? {
        RunResult::Finished => info!("program finished"),
        RunResult::FrameLimit => info!("frame limit reached"),
    }

    Ok(())
}

fn run(core: &mut Interpreter, args: &Args) -> anyhow::Result<RunResult> {
    let instructions_per_frame = (args.ips / TIMER_HZ).max(1);
    let frame_duration = Duration::from_secs_f32(1.0 / TIMER_HZ as f32);
    let mut frames = 0u64;
    let mut warned_blocked = false;

    loop {
        if args.max_frames.is_some_and(|max| frames >= max) {
            return Ok(RunResult::FrameLimit);
        }
        let frame_start = Instant::now();
        let mut dirty = false;

        for _ in 0..instructions_per_frame {
            let pc = core.registers().pc;
            let step = core
                .step()
                .inspect_err(|e| warn!("fault at {:#05X}: {}", pc, e))?;

            match step.signal {
                Some(Signal::ScreenDirty) => dirty = true,
                Some(Signal::Sound(SoundEdge::On)) => bell()?,
                Some(Signal::BlockedOnKey { register }) => {
                    if !warned_blocked {
                        warn!(
                            "program at {:#05X} is waiting for a key into V{:X}, \
                             this host has no keyboard input",
                            pc, register
                        );
                        warned_blocked = true;
                    }
                    break;
                }
                Some(Signal::Sound(SoundEdge::Off)) | None => {}
            }

            // A jump to itself is how programs end.
            if step.next_pc == pc {
                if dirty {
                    show(core, args)?;
                }
                return Ok(RunResult::Finished);
            }
        }

        core.tick_timers();

        if dirty {
            show(core, args)?;
        }
        frames += 1;

        if let Some(sleep_time) = frame_duration.checked_sub(frame_start.elapsed()) {
            sleep(sleep_time);
        }
    }
}

fn show(core: &Interpreter, args: &Args) -> io::Result<()> {
    if args.headless {
        return Ok(());
    }
    let mut out = io::stdout().lock();
    write!(out, "\x1B[2J\x1B[H{}", core.framebuffer())?;
    out.flush()
}

fn bell() -> io::Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "\x07")?;
    out.flush()
}
