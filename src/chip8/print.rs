//! The pretty print implementation of the [`ChipSet`](super::ChipSet).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use {
    super::ChipSet,
    crate::devices::Keypad,
    once_cell::sync::Lazy,
    std::fmt::{self, Write},
};

/// The length of the pretty print data
/// as a single instruction is u16 the octa
/// size will show how often the block shall
/// be repeated has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intformat {
    () => {
        // The formatted string will be 2 sysbols for the prefix (0x)
        // and 4 for the rest long.
        "{:#06X}"
    };
}

/// calculate a line lenght (This is a bit bigger then the actual line will be)
static LENLINE: Lazy<usize> = Lazy::new(|| {
    let pointer = format!(concat!(intformat!(), " - ", intformat!(), " :"), 0, 0);
    let integer = format!(intformat!(), 0);
    INDENT_SIZE + HEX_PRINT_STEP * (integer.len() + 1) + 1 + pointer.len()
});

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::Write;
    /// will formatt the pointers according to definition
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> std::fmt::Result {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{integer_print, pointer_print, Lazy, HEX_PRINT_STEP};
    use crate::{
        definitions::memory,
        opcode::{self, Opcode},
    };
    use std::fmt::{self, Write};

    /// The internal length of the given data
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that a row only holds zeros.
    pub(super) static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let formatted = format!(intformat!(), 0u16);
        let lenght = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
            - FILLER_BASE.len();
        let filler = " ".repeat(lenght / 2);

        format!(
            "{}{}{}{}{}",
            formatted, filler, FILLER_BASE, filler, formatted
        )
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    /// using the fmt::Display` for simple printing of the data later on
    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;
            res.push(' ');

            if !self.only_null {
                for entry in self.data.iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                if let Some(index) = res.rfind(' ') {
                    res.truncate(index);
                }
            } else {
                res.push_str(&ZERO_FILLER)
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory
    /// this functions assumes the full data to be passed
    /// as the offset is calculated from the beginning of the
    /// memory block
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for from in (0..memory.len()).step_by(POINTER_INCREMENT) {
            // precalculate the end location
            let to = (from + POINTER_INCREMENT).min(memory.len()) - 1;

            let mut data = [0; HEX_PRINT_STEP];
            let mut only_null = true;

            // loop over all the opcodes u8 pairs
            for (entry, index) in data
                .iter_mut()
                .zip((from..to).step_by(memory::opcodes::SIZE))
            {
                *entry = opcode::build_opcode(memory, index).map_err(|_| fmt::Error)?;

                // check if opcode is above 0, if so toggle the is null flag
                if *entry > 0 {
                    only_null = false;
                }
            }

            // create the row that shall be used later on
            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            // merge consecutive zero rows into a single one
            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        // create the end structure to be used for calculations
        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, super::END_OF_LINE)?;
        }
        if let Some(index) = string.rfind(super::END_OF_LINE) {
            string.truncate(index);
        }
        Ok(string)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{pointer_print, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);
        for (i, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = i * HEX_PRINT_STEP;
            let to = from + chunk.len() - 1;

            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, to)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(super::END_OF_LINE);
        }

        // Remove unneded new line
        if let Some(index) = res.rfind(super::END_OF_LINE) {
            res.truncate(index);
        }

        Ok(res)
    }
}

/// Handles the display buffer, a lit pixel is a `#`.
mod display_print {
    use super::END_OF_LINE;
    use crate::definitions::display;

    const ON: char = '#';
    const OFF: char = '.';

    pub(super) fn printer(screen: &[[bool; display::WIDTH]], indent: usize) -> String {
        let mut res = String::with_capacity((indent + display::WIDTH + 1) * screen.len());
        for row in screen {
            super::indent_helper(&mut res, indent);
            res.extend(row.iter().map(|&pixel| if pixel { ON } else { OFF }));
            res.push(END_OF_LINE);
        }
        // Remove unneeded new line
        res.pop();
        res
    }
}

/// Will prepare a single indented value line.
fn single_line<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::Display,
{
    let mut line = String::new();
    indent_helper(&mut line, INDENT_SIZE);
    write!(line, "{}", value)?;
    Ok(line)
}

impl<K> fmt::Display for ChipSet<K>
where
    K: Keypad,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let nam = single_line(&self.name)?;
        let sta = single_line(format!("{:?}", self.state))?;

        let mut opc = String::new();
        indent_helper(&mut opc, INDENT_SIZE);
        integer_print::formatter(&mut opc, self.opcode)?;

        let mut prc = String::new();
        indent_helper(&mut prc, INDENT_SIZE);
        integer_print::formatter(&mut prc, self.program_counter)?;

        let mut idx = String::new();
        indent_helper(&mut idx, INDENT_SIZE);
        integer_print::formatter(&mut idx, self.index_register)?;

        let mut tim = String::new();
        indent_helper(&mut tim, INDENT_SIZE);
        tim.push_str("delay ");
        integer_print::formatter(&mut tim, self.delay_timer.get_value())?;
        tim.push_str(" sound ");
        integer_print::formatter(&mut tim, self.sound_timer.get_value())?;

        let mem = opcode_print::printer(&self.memory, INDENT_SIZE)?;

        // an empty stack gets a placeholder instead of a list of zeros
        let stk = if self.stack.is_empty() {
            single_line("empty")?
        } else {
            integer_print::printer(&self.stack, INDENT_SIZE)?
        };

        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;
        let dis = display_print::printer(&self.display[..], INDENT_SIZE);

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tState :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tTimers :\n{}\n\
                \tMemory :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                \tDisplay :\n{}\n\
                }}",
            nam, sta, opc, prc, idx, tim, mem, stk, reg, dis
        )
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{super::tests, opcode_print::ZERO_FILLER},
        crate::definitions::display,
    };

    const OUTPUT_HEAD: &str = "\
        Chipset {\n\
            \tProgram Name :\n\
                \t\tTEST\n\
            \tState :\n\
                \t\tRunning\n\
            \tOpcode :\n\
                \t\t0x0000\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tTimers :\n\
                \t\tdelay 0x0000 sound 0x0000\n\
            \tMemory :\n\
                \t\t0x0000 - 0x004F : 0x0000                    ...                    0x0000\n\
                \t\t0x0050 - 0x005F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0060 - 0x006F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0070 - 0x007F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0080 - 0x008F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0090 - 0x009F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x00A0 - 0x01FF : 0x0000                    ...                    0x0000\n\
                \t\t0x0200 - 0x020F : 0x6005 0x6103 0x8014 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0210 - 0x0FFF : 0x0000                    ...                    0x0000\n\
            \tStack :\n\
                \t\tempty\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tDisplay :";

    #[test]
    fn test_zero_filler() {
        assert_eq!(
            ZERO_FILLER.as_str(),
            "0x0000                    ...                    0x0000"
        );
    }

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let chip = tests::get_default_chip();

        let actual_full = format!("{}", chip);
        let mut actual = actual_full.split('\n');

        for exp in OUTPUT_HEAD.split('\n') {
            assert_eq!(Some(exp), actual.next());
        }

        let empty_row = format!("\t\t{}", ".".repeat(display::WIDTH));
        for _ in 0..display::HEIGHT {
            assert_eq!(Some(empty_row.as_str()), actual.next());
        }
        assert_eq!(Some("}"), actual.next());
        assert_eq!(None, actual.next());
    }

    #[test]
    fn test_print_running_chip() {
        let mut chip = tests::get_default_chip();
        chip.stack.push(0x0202);
        chip.stack.push(0x0310);
        chip.display[0][0] = true;
        chip.display[0][display::WIDTH - 1] = true;
        chip.delay_timer.set_value(0x3C);

        let printed = format!("{}", chip);

        assert!(printed.contains("\t\t0x0000 - 0x0001 : 0x0202 0x0310\n"));
        assert!(printed.contains("\t\tdelay 0x003C sound 0x0000\n"));

        let first_row = format!("\t\t#{}#", ".".repeat(display::WIDTH - 2));
        assert!(printed.contains(&first_row));
    }
}
