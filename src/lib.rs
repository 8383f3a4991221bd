//! The core of a chip8 interpreter.
//!
//! The crate models memory, registers, call stack, display buffer and timers
//! and executes one instruction per [`ChipSet::step`](chip8::ChipSet::step).
//! Windowing, input polling, rom file loading and frame pacing are left to
//! the host.
pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;

// reexporting for convinience
pub use chip8::{ChipSet, State};
pub use config::Quirks;
pub use error::*;
pub use resources::Rom;
