use std::{ops::Range, time::Duration};

use {
    crate::{
        config::{Quirks, TimerMode},
        definitions::{cpu, display, keyboard, memory},
        devices::{DisplayCommands, Keyboard, Keypad},
        opcode::{self, ChipOpcodes, Opcode, Opcodes, Operation, ProgramCounter, ProgramCounterStep},
        resources::Rom,
        timer::{Regulator, Timer},
        KeyError, MemoryError, ProcessError, StackError,
    },
    rand::RngCore,
    tinyvec::TinyVec,
};

/// The monochrome display buffer, indexed by `[row][column]`.
pub type Screen = [[bool; display::WIDTH]; display::HEIGHT];

/// Whether the chipset executes instructions or is parked by `FX0A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// Waiting for a key press, that will be stored in `register`.
    AwaitingKey { register: usize },
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet<K = Keyboard>
where
    K: Keypad,
{
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched instruction, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter has the address of the next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The
    /// conventional depth of `16` entries is kept inline, deeper nesting spills onto the heap
    /// if the quirks allow it.
    pub(super) stack: TinyVec<[u16; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, the host
    /// is expected to beep.
    pub(super) sound_timer: Timer,
    /// Turns host time into timer ticks for [`TimerMode::FixedRate`](TimerMode::FixedRate).
    pub(super) regulator: Regulator,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`.
    pub(super) display: Box<Screen>,
    /// The key state, provided by the host.
    pub(super) keypad: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) quirks: Quirks,
    pub(super) state: State,
}

impl ChipSet<Keyboard> {
    /// will create a new chipset object with the default quirks,
    /// an empty keyboard and the random numbers of the os.
    pub fn new(rom: Rom) -> Self {
        Self::with_parts(rom, Keyboard::new(), rand::rngs::OsRng, Quirks::default())
    }

    /// Will press the given key, if the chipset is waiting
    /// for a key press it will continue.
    pub fn press_key(&mut self, key: usize) -> Result<(), ProcessError> {
        if key >= keyboard::SIZE {
            return Err(KeyError::InvalidKey(key).into());
        }

        let was_down = self.keypad.is_key_down(key);
        self.keypad.set_key(key, true);

        if !was_down && self.is_awaiting_key() {
            self.resume_with_key(key)?;
        }
        Ok(())
    }

    /// Will release the given key.
    pub fn release_key(&mut self, key: usize) -> Result<(), ProcessError> {
        if key >= keyboard::SIZE {
            return Err(KeyError::InvalidKey(key).into());
        }
        self.keypad.set_key(key, false);
        Ok(())
    }
}

impl<K> ChipSet<K>
where
    K: Keypad,
{
    /// will create a new chipset object from all the parts the host
    /// can inject
    pub fn with_parts<R>(rom: Rom, keypad: K, rng: R, quirks: Quirks) -> Self
    where
        R: RngCore + Send + 'static,
    {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        // write the rom data into memory, the rom guarantees that it fits
        let data = rom.get_data();
        ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())].copy_from_slice(data);

        log::info!("loaded rom '{}' with {} bytes", rom.get_name(), data.len());

        Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER as u16,
            stack: TinyVec::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            regulator: Regulator::default(),
            display: Box::new([[false; display::WIDTH]; display::HEIGHT]),
            keypad,
            rng: Box::new(rng),
            quirks,
            state: State::Running,
        }
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), MemoryError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter as usize)?;
        Ok(())
    }

    /// will advance the program by a single instruction
    ///
    /// While the chipset waits for a key press nothing happens and
    /// [`Operation::Wait`](Operation::Wait) is returned. A fault leaves
    /// registers, memory, stack, timers and program counter untouched.
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        if self.is_awaiting_key() {
            return Ok(Operation::Wait);
        }

        // get next opcode
        self.set_opcode()?;

        let operation = match Opcodes::try_from(self.opcode) {
            Ok(decoded) => {
                log::trace!(
                    "{:#05X}: {:#06X} {}",
                    self.program_counter,
                    self.opcode,
                    decoded
                );
                self.calc(&decoded)?
            }
            Err(err) if self.quirks.strict => return Err(err.into()),
            Err(_) => {
                log::warn!(
                    "skipping unsupported opcode {:#06X} at {:#05X}",
                    self.opcode,
                    self.program_counter
                );
                self.advance(ProgramCounterStep::Next);
                Operation::None
            }
        };

        // the instruction is only done once the key arrived
        if operation != Operation::Wait {
            self.finish_instruction();
        }

        Ok(operation)
    }

    /// Ticks the timers after an instruction, if they are coupled to the
    /// instructions.
    fn finish_instruction(&mut self) {
        if self.quirks.timers == TimerMode::PerInstruction {
            self.tick_timers();
        }
    }

    /// Will park the chipset until a key press arrives, the key will
    /// be stored in the given register.
    pub fn begin_key_wait(&mut self, register: usize) -> Result<(), KeyError> {
        if register >= cpu::register::SIZE {
            return Err(KeyError::InvalidRegister(register));
        }
        log::debug!("waiting for a key press into V{:X}", register);
        self.state = State::AwaitingKey { register };
        Ok(())
    }

    /// Will hand the pressed key to a waiting chipset and finish the
    /// instruction that started the wait.
    pub fn resume_with_key(&mut self, key: usize) -> Result<(), ProcessError> {
        let register = match self.state {
            State::AwaitingKey { register } => register,
            State::Running => return Err(KeyError::NotAwaiting.into()),
        };

        if key >= keyboard::SIZE {
            return Err(KeyError::InvalidKey(key).into());
        }

        log::debug!("key {:#X} pressed, storing it in V{:X}", key, register);
        self.registers[register] = key as u8;
        self.state = State::Running;
        self.advance(ProgramCounterStep::Next);
        self.finish_instruction();
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.state, State::AwaitingKey { .. })
    }

    /// Will count both timers down by one. Timers stand still while the
    /// chipset is waiting for a key.
    pub fn tick_timers(&mut self) {
        if self.is_awaiting_key() {
            return;
        }
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Will tick the timers at their fixed rate for the time elapsed since
    /// the last call and return how many ticks happend.
    pub fn advance_timers(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.regulator.advance(elapsed);
        for _ in 0..ticks {
            self.tick_timers();
        }
        ticks
    }

    /// Will push the display buffer to the given sink.
    pub fn render<D>(&self, sink: &mut D)
    where
        D: DisplayCommands,
    {
        sink.clear_display();
        sink.display(&self.display[..]);
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Screen {
        &self.display
    }

    /// Will return the pixel at the given column and row.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        self.display.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_register(&self, register: usize) -> Option<u8> {
        self.registers.get(register).copied()
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    /// The return addresses, the most recent one last.
    pub fn get_stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    /// Will check that `len` bytes starting at `from` are inside of the memory.
    pub(super) fn memory_range(
        &self,
        from: usize,
        len: usize,
    ) -> Result<Range<usize>, MemoryError> {
        match from.checked_add(len) {
            Some(to) if to <= self.memory.len() => Ok(from..to),
            _ => Err(MemoryError::OutOfBounds { address: from, len }),
        }
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        match self.quirks.stack_limit {
            Some(limit) if self.stack.len() >= limit => Err(StackError::Full),
            _ => {
                self.stack.push(pointer);
                Ok(())
            }
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

impl<K: Keypad> ProgramCounter for ChipSet<K> {
    fn advance(&mut self, step: ProgramCounterStep) {
        // targets past the memory are caught by the next fetch
        self.program_counter = step.apply(self.program_counter as usize) as u16;
    }
}
