//! Opcode abstractions, functionality and constants.
use std::fmt;

use crate::{
    definitions::memory,
    MemoryError, OpcodeError, ProcessError,
};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip8_core::opcode::*;
/// # use chip8_core::MemoryError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # assert_eq!(
/// #    Err(MemoryError::OutOfBounds { address: 3, len: 2 }),
/// #    build_opcode(&SPLIT_OPCODE, 3)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, MemoryError> {
    // controlling that there is no illegal access here
    match data.get(pointer..pointer.saturating_add(memory::opcodes::SIZE)) {
        Some(&[high, low]) => Ok(Opcode::from_be_bytes([high, low])),
        _ => Err(MemoryError::OutOfBounds {
            address: pointer,
            len: memory::opcodes::SIZE,
        }),
    }
}

/// These are special traits used to filter out the fields
/// of an opcode
pub trait OpcodeTrait {
    /// the top nibble, selecting the instruction family
    fn t(&self) -> u8;

    /// bits 8 to 11, a register index
    fn x(&self) -> usize;

    /// bits 4 to 7, a register index
    fn y(&self) -> usize;

    /// the lowest byte, an immediate value
    fn kk(&self) -> u8;

    /// the lowest nibble, an immediate value
    fn n(&self) -> u8;

    /// the lowest twelve bits, an address
    fn nnn(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip8_core::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip8_core::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip8_core::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn kk(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip8_core::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }
}

/// All six fields of an instruction word, extracted at once.
///
/// ```rust
/// # use chip8_core::opcode::Fields;
/// let fields = Fields::from(0xD12Fu16);
/// assert_eq!((fields.opcode, fields.x, fields.y, fields.n), (0xD, 0x1, 0x2, 0xF));
/// assert_eq!((fields.kk, fields.nnn), (0x2F, 0x12F));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub opcode: u8,
    pub x: usize,
    pub y: usize,
    pub kk: u8,
    pub n: u8,
    pub nnn: usize,
}

impl From<Opcode> for Fields {
    fn from(value: Opcode) -> Self {
        Self {
            opcode: value.t(),
            x: value.x(),
            y: value.y(),
            kk: value.kk(),
            n: value.n(),
            nnn: value.nnn(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip8_core::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Will calculate the program counter following `pc`.
    #[inline]
    pub fn apply(&self, pc: usize) -> usize {
        match *self {
            ProgramCounterStep::None => pc,
            ProgramCounterStep::Next => pc + memory::opcodes::SIZE,
            ProgramCounterStep::Skip => pc + 2 * memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Generates the `TryFrom` conversion of a sub opcode selector into
/// its enum.
macro_rules! impl_sub_opcode {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        }
    };
}

/// `00E0` and `00EE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

impl_sub_opcode!(System : Opcode :
    0x00E0 => System::Clear,
    0x00EE => System::Return,
);

/// `TNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub nnn: usize,
}

/// `TXKK`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterByte {
    pub x: usize,
    pub kk: u8,
}

/// `TXY0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReversed,
    ShiftLeft,
}

impl_sub_opcode!(ArithmeticOp : u8 :
    0x0 => ArithmeticOp::Assign,
    0x1 => ArithmeticOp::Or,
    0x2 => ArithmeticOp::And,
    0x3 => ArithmeticOp::Xor,
    0x4 => ArithmeticOp::Add,
    0x5 => ArithmeticOp::Sub,
    0x6 => ArithmeticOp::ShiftRight,
    0x7 => ArithmeticOp::SubReversed,
    0xE => ArithmeticOp::ShiftLeft,
);

/// `8XYT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub op: ArithmeticOp,
    pub x: usize,
    pub y: usize,
}

/// `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    Pressed,
    NotPressed,
}

impl_sub_opcode!(KeyOp : u8 :
    0x9E => KeyOp::Pressed,
    0xA1 => KeyOp::NotPressed,
);

/// `EXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySkip {
    pub op: KeyOp,
    pub x: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddToIndex,
    LoadGlyph,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

impl_sub_opcode!(MiscOp : u8 :
    0x07 => MiscOp::GetDelayTimer,
    0x0A => MiscOp::AwaitKeyPress,
    0x15 => MiscOp::SetDelayTimer,
    0x18 => MiscOp::SetSoundTimer,
    0x1E => MiscOp::AddToIndex,
    0x29 => MiscOp::LoadGlyph,
    0x33 => MiscOp::StoreBcd,
    0x55 => MiscOp::StoreRegisters,
    0x65 => MiscOp::LoadRegisters,
);

/// `FXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub op: MiscOp,
    pub x: usize,
}

/// A fully decoded instruction, one variant per instruction family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    System(System),
    Jump(Address),
    Call(Address),
    SkipIfEqual(RegisterByte),
    SkipIfNotEqual(RegisterByte),
    SkipIfRegistersEqual(RegisterPair),
    Load(RegisterByte),
    Add(RegisterByte),
    Arithmetic(Arithmetic),
    SkipIfRegistersNotEqual(RegisterPair),
    LoadIndex(Address),
    JumpOffset(Address),
    Random(RegisterByte),
    Draw(Sprite),
    Key(KeySkip),
    Misc(Misc),
}

impl TryFrom<Opcode> for Opcodes {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let err = |_| OpcodeError::InvalidOpcode(value);
        let Fields {
            opcode,
            x,
            y,
            kk,
            n,
            nnn,
        } = Fields::from(value);

        let address = Address { nnn };
        let register_byte = RegisterByte { x, kk };
        let pair = RegisterPair { x, y };

        let res = match (opcode, n) {
            (0x0, _) => Opcodes::System(System::try_from(value).map_err(err)?),
            (0x1, _) => Opcodes::Jump(address),
            (0x2, _) => Opcodes::Call(address),
            (0x3, _) => Opcodes::SkipIfEqual(register_byte),
            (0x4, _) => Opcodes::SkipIfNotEqual(register_byte),
            (0x5, 0x0) => Opcodes::SkipIfRegistersEqual(pair),
            (0x6, _) => Opcodes::Load(register_byte),
            (0x7, _) => Opcodes::Add(register_byte),
            (0x8, n) => Opcodes::Arithmetic(Arithmetic {
                op: ArithmeticOp::try_from(n).map_err(err)?,
                x,
                y,
            }),
            (0x9, 0x0) => Opcodes::SkipIfRegistersNotEqual(pair),
            (0xA, _) => Opcodes::LoadIndex(address),
            (0xB, _) => Opcodes::JumpOffset(address),
            (0xC, _) => Opcodes::Random(register_byte),
            (0xD, n) => Opcodes::Draw(Sprite { x, y, n: n as usize }),
            (0xE, _) => Opcodes::Key(KeySkip {
                op: KeyOp::try_from(kk).map_err(err)?,
                x,
            }),
            (0xF, _) => Opcodes::Misc(Misc {
                op: MiscOp::try_from(kk).map_err(err)?,
                x,
            }),
            _ => return Err(OpcodeError::InvalidOpcode(value)),
        };
        Ok(res)
    }
}

/// Disassembles the instruction into the classic mnemonic form.
impl fmt::Display for Opcodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Opcodes::System(System::Clear) => write!(f, "CLS"),
            Opcodes::System(System::Return) => write!(f, "RET"),
            Opcodes::Jump(Address { nnn }) => write!(f, "JP {:#05X}", nnn),
            Opcodes::Call(Address { nnn }) => write!(f, "CALL {:#05X}", nnn),
            Opcodes::SkipIfEqual(RegisterByte { x, kk }) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Opcodes::SkipIfNotEqual(RegisterByte { x, kk }) => {
                write!(f, "SNE V{:X}, {:#04X}", x, kk)
            }
            Opcodes::SkipIfRegistersEqual(RegisterPair { x, y }) => {
                write!(f, "SE V{:X}, V{:X}", x, y)
            }
            Opcodes::Load(RegisterByte { x, kk }) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Opcodes::Add(RegisterByte { x, kk }) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Opcodes::Arithmetic(Arithmetic { op, x, y }) => {
                let name = match op {
                    ArithmeticOp::Assign => "LD",
                    ArithmeticOp::Or => "OR",
                    ArithmeticOp::And => "AND",
                    ArithmeticOp::Xor => "XOR",
                    ArithmeticOp::Add => "ADD",
                    ArithmeticOp::Sub => "SUB",
                    ArithmeticOp::ShiftRight => "SHR",
                    ArithmeticOp::SubReversed => "SUBN",
                    ArithmeticOp::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Opcodes::SkipIfRegistersNotEqual(RegisterPair { x, y }) => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Opcodes::LoadIndex(Address { nnn }) => write!(f, "LD I, {:#05X}", nnn),
            Opcodes::JumpOffset(Address { nnn }) => write!(f, "JP V0, {:#05X}", nnn),
            Opcodes::Random(RegisterByte { x, kk }) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Opcodes::Draw(Sprite { x, y, n }) => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Opcodes::Key(KeySkip { op: KeyOp::Pressed, x }) => write!(f, "SKP V{:X}", x),
            Opcodes::Key(KeySkip {
                op: KeyOp::NotPressed,
                x,
            }) => write!(f, "SKNP V{:X}", x),
            Opcodes::Misc(Misc { op, x }) => match op {
                MiscOp::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOp::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOp::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOp::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOp::AddToIndex => write!(f, "ADD I, V{:X}", x),
                MiscOp::LoadGlyph => write!(f, "LD F, V{:X}", x),
                MiscOp::StoreBcd => write!(f, "LD B, V{:X}", x),
                MiscOp::StoreRegisters => write!(f, "LD [I], V{:X}", x),
                MiscOp::LoadRegisters => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn advance(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// If the host shall wait
    /// for the next key press
    Wait,
    /// The display buffer changed
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// Every instruction family is handled by its own method, so each of them can
/// be exercised on its own. The methods only compute the effect on the
/// chipset, moving the program counter is done by [`calc`](ChipOpcodes::calc)
/// through the [`ProgramCounter`](ProgramCounter) trait.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute the given instruction
    fn calc(&mut self, opcode: &Opcodes) -> Result<Operation, ProcessError> {
        let plain = |step: ProgramCounterStep| (step, Operation::None);

        let (step, operation) = match opcode {
            Opcodes::System(opcode) => self.system(opcode),
            Opcodes::Jump(opcode) => self.jump(opcode).map(plain),
            Opcodes::Call(opcode) => self.call(opcode).map(plain),
            Opcodes::SkipIfEqual(opcode) => self.skip_if_equal(opcode).map(plain),
            Opcodes::SkipIfNotEqual(opcode) => self.skip_if_not_equal(opcode).map(plain),
            Opcodes::SkipIfRegistersEqual(opcode) => {
                self.skip_if_registers_equal(opcode).map(plain)
            }
            Opcodes::Load(opcode) => self.load(opcode).map(plain),
            Opcodes::Add(opcode) => self.add(opcode).map(plain),
            Opcodes::Arithmetic(opcode) => self.arithmetic(opcode).map(plain),
            Opcodes::SkipIfRegistersNotEqual(opcode) => {
                self.skip_if_registers_not_equal(opcode).map(plain)
            }
            Opcodes::LoadIndex(opcode) => self.load_index(opcode).map(plain),
            Opcodes::JumpOffset(opcode) => self.jump_offset(opcode).map(plain),
            Opcodes::Random(opcode) => self.random(opcode).map(plain),
            Opcodes::Draw(opcode) => self.draw(opcode),
            Opcodes::Key(opcode) => self.key(opcode).map(plain),
            Opcodes::Misc(opcode) => self.misc(opcode),
        }?;

        self.advance(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System)
        -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XKK` - Cond     - `if(Vx==KK)`          - Skips the next instruction if `VX` equals `KK`.
    fn skip_if_equal(&self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XKK` - Cond     - `if(Vx!=KK)`          - Skips the next instruction if `VX` doesn't equal `KK`.
    fn skip_if_not_equal(&self, opcode: &RegisterByte)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_if_registers_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XKK` - Const    - `Vx = KK`             - Sets `VX` to `KK`.
    fn load(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XKK` - Const    - `Vx += KK`            - Adds `KK` to `VX`. (Carry flag is not changed)
    fn add(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub opcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `1` if `VX > VY` beforehand, else `0`.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `1` if `VX <= VY` beforehand, else `0`.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_if_registers_not_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn load_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXKK` - Rand     - `Vx=rand()&KK`        - Sets `VX` to a random byte and `KK`.
    fn random(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. `VF` is set to `1` if any screen pixels are flipped from set to unset.
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &KeySkip) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the font glyph of the low nibble of `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the hundreds, tens and ones of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_fields() {
        let fields = Fields::from(0x8AB4 as Opcode);
        assert_eq!(
            fields,
            Fields {
                opcode: 0x8,
                x: 0xA,
                y: 0xB,
                kk: 0xB4,
                n: 0x4,
                nnn: 0xAB4,
            }
        );
    }

    #[test]
    fn test_build_opcode_end_of_memory() {
        let data = [0u8; memory::SIZE];
        assert_eq!(Ok(0), build_opcode(&data, memory::SIZE - 2));
        assert_eq!(
            Err(MemoryError::OutOfBounds {
                address: memory::LAST,
                len: 2
            }),
            build_opcode(&data, memory::LAST)
        );
        assert!(build_opcode(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Opcodes, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let tests: [(Opcode, Option<Opcodes>); 27] = [
            (0x00E0, Some(Opcodes::System(System::Clear))),
            (0x00EE, Some(Opcodes::System(System::Return))),
            (0x00E1, None),
            (0x0123, None),
            (0x1919, Some(Opcodes::Jump(Address { nnn: 0x919 }))),
            (0x2222, Some(Opcodes::Call(Address { nnn: 0x222 }))),
            (
                0x3123,
                Some(Opcodes::SkipIfEqual(RegisterByte { x: 0x1, kk: 0x23 })),
            ),
            (
                0x4123,
                Some(Opcodes::SkipIfNotEqual(RegisterByte { x: 0x1, kk: 0x23 })),
            ),
            (
                0x5120,
                Some(Opcodes::SkipIfRegistersEqual(RegisterPair { x: 0x1, y: 0x2 })),
            ),
            (0x5121, None),
            (0x6123, Some(Opcodes::Load(RegisterByte { x: 0x1, kk: 0x23 }))),
            (0x7123, Some(Opcodes::Add(RegisterByte { x: 0x1, kk: 0x23 }))),
            (
                0x8124,
                Some(Opcodes::Arithmetic(Arithmetic {
                    op: ArithmeticOp::Add,
                    x: 0x1,
                    y: 0x2,
                })),
            ),
            (
                0x812E,
                Some(Opcodes::Arithmetic(Arithmetic {
                    op: ArithmeticOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                })),
            ),
            (0x8128, None),
            (
                0x9120,
                Some(Opcodes::SkipIfRegistersNotEqual(RegisterPair {
                    x: 0x1,
                    y: 0x2,
                })),
            ),
            (0x9121, None),
            (0xA222, Some(Opcodes::LoadIndex(Address { nnn: 0x222 }))),
            (0xB222, Some(Opcodes::JumpOffset(Address { nnn: 0x222 }))),
            (0xC123, Some(Opcodes::Random(RegisterByte { x: 0x1, kk: 0x23 }))),
            (0xD123, Some(Opcodes::Draw(Sprite { x: 0x1, y: 0x2, n: 0x3 }))),
            (
                0xE19E,
                Some(Opcodes::Key(KeySkip {
                    op: KeyOp::Pressed,
                    x: 0x1,
                })),
            ),
            (
                0xE1A1,
                Some(Opcodes::Key(KeySkip {
                    op: KeyOp::NotPressed,
                    x: 0x1,
                })),
            ),
            (0xE111, None),
            (
                0xF00A,
                Some(Opcodes::Misc(Misc {
                    op: MiscOp::AwaitKeyPress,
                    x: 0x0,
                })),
            ),
            (
                0xF565,
                Some(Opcodes::Misc(Misc {
                    op: MiscOp::LoadRegisters,
                    x: 0x5,
                })),
            ),
            (0xF0AA, None),
        ];
        for (value, res) in tests {
            let conv: Result<Opcodes, _> = value.try_into();
            assert_eq!(conv, res.ok_or(OpcodeError::InvalidOpcode(value)), "{:#06X}", value);
        }
    }

    #[test]
    fn test_disassembly() {
        let tests: [(Opcode, &str); 9] = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1234, "JP 0x234"),
            (0x6A0F, "LD VA, 0x0F"),
            (0x8AB5, "SUB VA, VB"),
            (0xB300, "JP V0, 0x300"),
            (0xD125, "DRW V1, V2, 0x5"),
            (0xE3A1, "SKNP V3"),
            (0xF733, "LD B, V7"),
        ];
        for (value, text) in tests {
            let opcode = Opcodes::try_from(value).expect("valid opcode");
            assert_eq!(text, opcode.to_string());
        }
    }

    #[test]
    fn test_program_counter_step() {
        assert_eq!(0x200, ProgramCounterStep::None.apply(0x200));
        assert_eq!(0x202, ProgramCounterStep::Next.apply(0x200));
        assert_eq!(0x204, ProgramCounterStep::Skip.apply(0x200));
        assert_eq!(0x345, ProgramCounterStep::Jump(0x345).apply(0x200));
    }
}
