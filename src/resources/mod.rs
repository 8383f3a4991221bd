use crate::{definitions::rom, RomError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The program bytes, stored on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    ///
    /// The data has to contain at least a single byte and has to fit into the
    /// memory behind the program start.
    ///
    /// ```rust
    /// # use chip8_core::{Rom, RomError};
    /// let rom = Rom::new("JUMP", vec![0x12, 0x00]).expect("A valid rom.");
    /// assert_eq!(rom.get_name(), "JUMP");
    /// assert_eq!(Rom::new("EMPTY", Vec::new()), Err(RomError::Empty));
    /// ```
    pub fn new<D>(name: &str, data: D) -> Result<Self, RomError>
    where
        D: Into<Box<[u8]>>,
    {
        let data = data.into();

        if data.is_empty() {
            return Err(RomError::Empty);
        }

        if data.len() > rom::MAX_SIZE {
            return Err(RomError::TooLarge {
                len: data.len(),
                max: rom::MAX_SIZE,
            });
        }

        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_sizes() {
        assert_eq!(Rom::new("EMPTY", Vec::new()), Err(RomError::Empty));

        let full = vec![0xAA; rom::MAX_SIZE];
        let rom = Rom::new("FULL", full).expect("exactly fits into memory");
        assert_eq!(rom.get_data().len(), rom::MAX_SIZE);

        let too_large = vec![0xAA; rom::MAX_SIZE + 1];
        assert_eq!(
            Rom::new("LARGE", too_large),
            Err(RomError::TooLarge {
                len: rom::MAX_SIZE + 1,
                max: rom::MAX_SIZE
            })
        );
    }

    #[test]
    fn test_rom_from_slice() {
        let data: &[u8] = &[0x60, 0x05];
        let rom = Rom::new("SLICE", data).expect("a two byte rom");
        assert_eq!(rom.get_data(), data);
    }
}
