use thiserror::Error;

use crate::opcode::Opcode;

/// Every fault the interpreter reports back to the host.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("Invalid key state '{0}'.")]
    Key(#[from] KeyError),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MemoryError {
    #[error("Access of {len} byte(s) at {address:#06X} is outside of the memory")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum KeyError {
    #[error("There is no key {0:#X}")]
    InvalidKey(usize),
    #[error("There is no register V{0:X}")]
    InvalidRegister(usize),
    #[error("The chipset is not waiting for a key press")]
    NotAwaiting,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum RomError {
    #[error("The rom does not contain any data")]
    Empty,
    #[error("The rom is {len} bytes long, but only {max} bytes fit into memory")]
    TooLarge { len: usize, max: usize },
}
