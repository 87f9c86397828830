pub mod config;
pub mod consts;
pub mod display;
pub mod error;
pub mod interpreter;
pub mod keypad;
pub mod memory;
pub mod parser;
pub mod stack;
pub mod state;
pub mod timers;

pub use config::Quirks;
pub use error::Chip8Error;
pub use interpreter::{Interpreter, Signal, Step};
pub use parser::Instruction;
pub use timers::SoundEdge;

pub type Result<T> = std::result::Result<T, Chip8Error>;
