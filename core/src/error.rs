use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Reasons a ROM is refused at the loader boundary.
///
/// Memory is never touched when one of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is empty")]
    Empty,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::TooLarge {
            size,
            max: MAX_ROM_SIZE,
        }
    }
}

/// Non-fatal conditions raised while executing a single instruction.
///
/// A fault is reported alongside the instruction's trace; the interpreter keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("return with an empty call stack")]
    StackUnderflow,
}
