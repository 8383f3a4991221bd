use crate::{
    config::{IndexOverflow, SpriteEdges},
    definitions::{cpu, display, memory},
    devices::Keypad,
    opcode::{
        Address, Arithmetic, ArithmeticOp, ChipOpcodes, KeyOp, KeySkip, Misc, MiscOp, Operation,
        ProgramCounterStep, RegisterByte, RegisterPair, Sprite, System,
    },
    ProcessError,
};

use super::ChipSet;

impl<K> ChipOpcodes for ChipSet<K>
where
    K: Keypad,
{
    fn system(
        &mut self,
        opcode: &System,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            System::Clear => {
                // 00E0
                // clear display
                for row in self.display.iter_mut() {
                    *row = [false; display::WIDTH];
                }
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack()?;
                log::debug!("return to {:#05X}", pc);
                Ok((ProgramCounterStep::Jump(pc as usize), Operation::None))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN, the address of the following instruction
        // is the one to return to
        let back = ProgramCounterStep::Next.apply(self.program_counter as usize);
        self.push_stack(back as u16)?;
        log::debug!("call {:#05X}, returning to {:#05X}", opcode.nnn, back);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_if_equal(&self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError> {
        // 3XKK
        // Skips the next instruction if VX equals KK.
        let RegisterByte { x, kk } = *opcode;
        Ok(ProgramCounterStep::cond(self.registers[x] == kk))
    }

    fn skip_if_not_equal(
        &self,
        opcode: &RegisterByte,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 4XKK
        // Skips the next instruction if VX doesn't equal KK.
        let RegisterByte { x, kk } = *opcode;
        Ok(ProgramCounterStep::cond(self.registers[x] != kk))
    }

    fn skip_if_registers_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        // Skips the next instruction if VX equals VY.
        let RegisterPair { x, y } = *opcode;
        Ok(ProgramCounterStep::cond(
            self.registers[x] == self.registers[y],
        ))
    }

    fn load(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError> {
        // 6XKK
        // Sets VX to KK.
        let RegisterByte { x, kk } = *opcode;
        self.registers[x] = kk;
        Ok(ProgramCounterStep::Next)
    }

    fn add(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError> {
        // 7XKK
        // Adds KK to VX. (Carry flag is not changed)
        let RegisterByte { x, kk } = *opcode;
        self.registers[x] = self.registers[x].wrapping_add(kk);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { op, x, y } = *opcode;
        const FLAG: usize = cpu::register::LAST;
        match op {
            ArithmeticOp::Assign => {
                // 8XY0
                self.registers[x] = self.registers[y];
            }
            ArithmeticOp::Or => {
                // 8XY1
                self.registers[x] |= self.registers[y];
            }
            ArithmeticOp::And => {
                // 8XY2
                self.registers[x] &= self.registers[y];
            }
            ArithmeticOp::Xor => {
                // 8XY3
                self.registers[x] ^= self.registers[y];
            }
            ArithmeticOp::Add => {
                // 8XY4
                // The flag is written last, so it survives X being F.
                let (res, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[x] = res;
                self.registers[FLAG] = carry as u8;
            }
            ArithmeticOp::Sub => {
                // 8XY5
                // VF is 1 if VX is strictly bigger than VY.
                let (left, right) = (self.registers[x], self.registers[y]);
                self.registers[x] = left.wrapping_sub(right);
                self.registers[FLAG] = (left > right) as u8;
            }
            ArithmeticOp::ShiftRight => {
                // 8XY6
                self.registers[FLAG] = self.registers[x] & 1;
                self.registers[x] >>= 1;
            }
            ArithmeticOp::SubReversed => {
                // 8XY7
                self.registers[FLAG] = (self.registers[x] <= self.registers[y]) as u8;
                self.registers[x] = self.registers[y].wrapping_sub(self.registers[x]);
            }
            ArithmeticOp::ShiftLeft => {
                // 8XYE
                const SHIFT_SIGNIFICANT: u8 = 7;
                self.registers[FLAG] = self.registers[x] >> SHIFT_SIGNIFICANT;
                self.registers[x] <<= 1;
            }
        }
        Ok(ProgramCounterStep::Next)
    }

    fn skip_if_registers_not_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        // Skips the next instruction if VX doesn't equal VY.
        let RegisterPair { x, y } = *opcode;
        Ok(ProgramCounterStep::cond(
            self.registers[x] != self.registers[y],
        ))
    }

    fn load_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.index_register = opcode.nnn as u16;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn random(&mut self, opcode: &RegisterByte) -> Result<ProgramCounterStep, ProcessError> {
        // CXKK
        // Sets VX to the result of a bitwise and operation on a random byte and KK.
        let RegisterByte { x, kk } = *opcode;
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = kk & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Draws a sprite at coordinate (VX, VY) that has a width of 8 pixels and a height of N
        // pixels. Each row of 8 pixels is read as bit-coded starting from memory location I; I
        // value doesn’t change after the execution of this instruction. VF is set to 1 if any
        // screen pixels are flipped from set to unset when the sprite is drawn, and to 0 if that
        // doesn’t happen.
        let Sprite { x, y, n } = *opcode;

        let rows = self.memory_range(self.index_register as usize, n)?;

        // the origin always lies on the display, only the sprite can leave it
        let origin_x = self.registers[x] as usize % display::WIDTH;
        let origin_y = self.registers[y] as usize % display::HEIGHT;
        let wrap = self.quirks.sprite_edges == SpriteEdges::Wrap;

        let mut collision = false;

        for (i, row) in self.memory[rows].iter().enumerate() {
            let mut coory = origin_y + i;
            if coory >= display::HEIGHT {
                if !wrap {
                    break;
                }
                coory %= display::HEIGHT;
            }

            // most significant bit first
            for j in 0..display::sprite::WIDTH {
                let mask = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }

                let mut coorx = origin_x + j;
                if coorx >= display::WIDTH {
                    if !wrap {
                        break;
                    }
                    coorx %= display::WIDTH;
                }

                let pixel = &mut self.display[coory][coorx];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        self.registers[cpu::register::LAST] = collision as u8;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &KeySkip) -> Result<ProgramCounterStep, ProcessError> {
        let KeySkip { op, x } = *opcode;
        // there are only 16 keys, anything else is never held down
        let key = self.registers[x] as usize;
        let down = key < crate::definitions::keyboard::SIZE && self.keypad.is_key_down(key);
        let step = match op {
            KeyOp::Pressed => {
                // EX9E
                // Skips the next instruction if the key stored in VX is pressed.
                ProgramCounterStep::cond(down)
            }
            KeyOp::NotPressed => {
                // EXA1
                // Skips the next instruction if the key stored in VX isn't pressed.
                ProgramCounterStep::cond(!down)
            }
        };
        Ok(step)
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let Misc { op, x } = *opcode;
        let mut operation = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match op {
            MiscOp::GetDelayTimer => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers[x] = self.delay_timer.get_value();
            }
            MiscOp::AwaitKeyPress => {
                // FX0A
                // A key press is awaited, and then stored in VX. The program counter stays
                // put until the host resumes the chipset with the key.
                self.begin_key_wait(x)?;
                operation = Operation::Wait;
                pcs = ProgramCounterStep::None;
            }
            MiscOp::SetDelayTimer => {
                // FX15
                // Sets the delay timer to VX.
                log::debug!("delay timer set to {}", self.registers[x]);
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOp::SetSoundTimer => {
                // FX18
                // Sets the sound timer to VX.
                log::debug!("sound timer set to {}", self.registers[x]);
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOp::AddToIndex => {
                // FX1E
                // Adds VX to I.
                let vx = self.registers[x] as u16;
                const ADDRESS_MASK: u16 = memory::LAST as u16;
                match self.quirks.index_overflow {
                    IndexOverflow::Unflagged => {
                        // stays past the memory, so the next access through I faults
                        self.index_register = self.index_register.saturating_add(vx);
                    }
                    IndexOverflow::Wrap => {
                        self.index_register = self.index_register.wrapping_add(vx) & ADDRESS_MASK;
                    }
                    IndexOverflow::Flag => {
                        let sum = self.index_register as u32 + vx as u32;
                        self.index_register = sum as u16 & ADDRESS_MASK;
                        self.registers[cpu::register::LAST] = (sum > memory::LAST as u32) as u8;
                    }
                }
            }
            MiscOp::LoadGlyph => {
                // FX29
                // Sets I to the location of the sprite for the character in the low nibble
                // of VX. Characters 0-F (in hexadecimal) are represented by a 4x5 font.
                let glyph = (self.registers[x] & 0xF) as usize;
                self.index_register = (display::fontset::LOCATION
                    + display::fontset::GLYPH_SIZE * glyph) as u16;
            }
            MiscOp::StoreBcd => {
                // FX33
                // Stores the binary-coded decimal representation of VX, with the most significant
                // of three digits at the address in I, the middle digit at I plus 1, and the least
                // significant digit at I plus 2.
                let range = self.memory_range(self.index_register as usize, 3)?;
                let r = self.registers[x];

                self.memory[range].copy_from_slice(&[
                    r / 100,     // 246u8 / 100 => 2
                    r / 10 % 10, // 246u8 / 10 => 24 % 10 => 4
                    r % 10,      // 246u8 % 10 => 6
                ]);
            }
            MiscOp::StoreRegisters => {
                // FX55
                // Stores V0 to VX (including VX) in memory starting at address I. I itself is
                // left unmodified.
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
            }
            MiscOp::LoadRegisters => {
                // FX65
                // Fills V0 to VX (including VX) with values from memory starting at address I.
                // I itself is left unmodified.
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
            }
        }
        Ok((pcs, operation))
    }
}
