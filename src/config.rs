//! Runtime configuration of the interpreter.
//!
//! Programs written for different interpreters disagree on a couple of edge
//! cases, these are collected in [`Quirks`](Quirks) and handed to the chipset
//! at construction.
use crate::definitions::cpu;

/// How pixels past the right or bottom edge of the display are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdges {
    /// Pixels that would fall off the display are dropped.
    Clip,
    /// Pixels that would fall off the display reappear on the opposite side.
    Wrap,
}

/// How `FX1E` treats an index that leaves the addressable memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOverflow {
    /// A plain 16 bit addition, `VF` is untouched. An index past the memory
    /// only faults once it is used.
    Unflagged,
    /// The index is masked to the 12 bit address space.
    Wrap,
    /// The index is masked to the 12 bit address space and `VF` reports if
    /// the sum exceeded `0xFFF`.
    Flag,
}

/// When the delay and sound timer count down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Both timers tick once after every executed instruction.
    PerInstruction,
    /// The timers only tick when the host drives them, see
    /// [`ChipSet::advance_timers`](crate::chip8::ChipSet::advance_timers).
    FixedRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Unknown instructions fault instead of being skipped.
    pub strict: bool,
    pub sprite_edges: SpriteEdges,
    pub index_overflow: IndexOverflow,
    pub timers: TimerMode,
    /// The maximum call depth, `None` lets the stack grow without limit.
    pub stack_limit: Option<usize>,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            strict: false,
            sprite_edges: SpriteEdges::Clip,
            index_overflow: IndexOverflow::Unflagged,
            timers: TimerMode::PerInstruction,
            stack_limit: Some(cpu::stack::SIZE),
        }
    }
}

impl Quirks {
    /// The default configuration, but unknown instructions fault.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}
