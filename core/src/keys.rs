use std::collections::HashMap;

/// # Keymap
/// Input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub const DEFAULT_BINDINGS: [(char, u8); 16] = [
    ('x', 0x0),
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('z', 0xA),
    ('c', 0xB),
    ('4', 0xC),
    ('r', 0xD),
    ('f', 0xE),
    ('v', 0xF),
];

/// # Keys
/// The pressed status of keys 0..F, written by the host and read by instructions.
#[derive(Clone, Debug)]
pub struct Keys {
    pressed: [bool; 16],
    bindings: HashMap<char, u8>,
}

impl Keys {
    pub fn new() -> Self {
        Keys {
            pressed: [false; 16],
            bindings: DEFAULT_BINDINGS.iter().copied().collect(),
        }
    }

    /// Set the pressed status of `key`; only its low nibble is used
    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        self.pressed[usize::from(key & 0xF)] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[usize::from(key & 0xF)]
    }

    /// The lowest numbered key currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|&p| p).map(|key| key as u8)
    }

    pub fn states(&self) -> &[bool; 16] {
        &self.pressed
    }

    /// Releases every key
    pub fn clear(&mut self) {
        self.pressed = [false; 16];
    }

    /// Maps an external input code to a key, replacing any earlier binding for that code
    pub fn bind(&mut self, code: char, key: u8) {
        self.bindings.insert(code, key & 0xF);
    }

    pub fn unbind(&mut self, code: char) -> Option<u8> {
        self.bindings.remove(&code)
    }

    pub fn index_for(&self, code: char) -> Option<u8> {
        self.bindings.get(&code).copied()
    }

    /// Presses the key bound to `code`; returns the key, if any was bound
    pub fn press_code(&mut self, code: char) -> Option<u8> {
        let key = self.index_for(code)?;
        self.press(key);
        Some(key)
    }

    pub fn release_code(&mut self, code: char) -> Option<u8> {
        let key = self.index_for(code)?;
        self.release(key);
        Some(key)
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new()
    }
}
