use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will clear the display
    fn clear_display(&mut self);
    /// Will display all from the pixels, one slice entry per row
    fn display(&mut self, pixels: &[[bool; display::WIDTH]]);
}

#[cfg_attr(test, mockall::automock)]
/// The key state the host provides to the chipset.
pub trait Keypad {
    /// Checks if the key is currently held down, keys outside
    /// of `0x0..=0xF` are never down.
    fn is_key_down(&self, key: usize) -> bool;
}

/// Will represent the last set key with the previous
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    index: usize,
    last: bool,
    current: bool,
}

impl Key {
    fn new(index: usize, last: bool, current: bool) -> Self {
        Self {
            index,
            last,
            current,
        }
    }

    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_last(&self) -> bool {
        self.last
    }

    pub fn get_current(&self) -> bool {
        self.current
    }

    /// Checks if this change was a key going down.
    pub fn is_press(&self) -> bool {
        !self.last && self.current
    }
}

/// Will store the last change to the given keybord
/// and represent the internal keyboard as well
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    last: Option<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Will flip a single key.
    ///
    /// # Panics
    ///
    /// If `key` is not in `0x0..=0xF`.
    pub fn toggle_key(&mut self, key: usize) {
        assert!(key < keyboard::SIZE, "There is no key {:#X}.", key);
        self.set_key(key, !self.keys[key])
    }

    /// Will set a single key, the other keys keep their state.
    ///
    /// # Panics
    ///
    /// If `key` is not in `0x0..=0xF`.
    pub fn set_key(&mut self, key: usize, to: bool) {
        assert!(key < keyboard::SIZE, "There is no key {:#X}.", key);

        // setup last
        self.last = Some(Key::new(key, self.keys[key], to));

        // write back solution
        self.keys[key] = to;
    }

    /// Will overwrite the whole keyboard.
    pub fn set_keys(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keys.copy_from_slice(keys);
        self.last = None;
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn get_last(&self) -> Option<Key> {
        self.last
    }
}

impl Keypad for Keyboard {
    fn is_key_down(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_keeps_others() {
        let mut keyboard = Keyboard::new();
        keyboard.set_key(0x3, true);
        keyboard.set_key(0xA, true);

        assert!(keyboard.is_key_down(0x3));
        assert!(keyboard.is_key_down(0xA));
        assert!(!keyboard.is_key_down(0x4));

        let last = keyboard.get_last().expect("a key was set");
        assert_eq!(last.get_index(), 0xA);
        assert!(last.is_press());
    }

    #[test]
    #[should_panic(expected = "There is no key 0x10.")]
    fn test_set_key_out_of_range() {
        let mut keyboard = Keyboard::new();
        keyboard.set_key(0x10, true);
    }

    #[test]
    #[should_panic(expected = "There is no key 0x10.")]
    fn test_toggle_key_out_of_range() {
        let mut keyboard = Keyboard::new();
        keyboard.toggle_key(0x10);
    }

    #[test]
    fn test_toggle_key() {
        let mut keyboard = Keyboard::new();
        keyboard.toggle_key(0x5);
        assert!(keyboard.is_key_down(0x5));

        keyboard.toggle_key(0x5);
        assert!(!keyboard.is_key_down(0x5));

        let last = keyboard.get_last().expect("a key was toggled");
        assert!(last.get_last());
        assert!(!last.get_current());
        assert!(!last.is_press());
    }

    #[test]
    fn test_set_keys_and_out_of_range() {
        let mut keyboard = Keyboard::new();
        let mut keys = [false; keyboard::SIZE];
        keys[0xF] = true;
        keyboard.set_keys(&keys);

        assert_eq!(&keys[..], keyboard.get_keys());
        assert!(keyboard.get_last().is_none());
        assert!(keyboard.is_key_down(0xF));
        assert!(!keyboard.is_key_down(0x10));
        assert!(!keyboard.is_key_down(0xFF));
    }
}
