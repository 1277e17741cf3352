use crate::constants::{ADDRESS_MASK, FLAG_REGISTER, MEMORY_SIZE, PROGRAM_START};
use crate::error::Fault;

/// # Memory
/// Everything the CPU can see.
///
/// ## Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register
/// - (i) a 16-bit index register
///
/// ## Counter
/// - (pc) the program counter, kept within the 4096 byte address space
///
/// ## Timers
/// - 2 8-bit timers (delay & sound), decremented by an external 60Hz tick
///
/// ## Stack
/// - return addresses pushed by CALL and popped by RET
/// - unbounded, unlike the 16 levels of the original hardware
///
/// ## RAM
/// - 4096 bytes; every address is wrapped into range before use
#[derive(Clone)]
pub struct Memory {
    v: [u8; 16],
    i: u16,
    pc: u16,
    delay_timer: u8,
    sound_timer: u8,
    stack: Vec<u16>,
    ram: Box<[u8; MEMORY_SIZE]>,
    rom_len: usize,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: Vec::with_capacity(16),
            ram: Box::new([0; MEMORY_SIZE]),
            rom_len: 0,
        }
    }

    pub fn v(&self, x: u8) -> u8 {
        self.v[usize::from(x & 0xF)]
    }

    pub fn set_v(&mut self, x: u8, value: u8) {
        self.v[usize::from(x & 0xF)] = value;
    }

    pub fn flag(&self) -> u8 {
        self.v[FLAG_REGISTER]
    }

    pub fn set_flag(&mut self, value: u8) {
        self.v[FLAG_REGISTER] = value;
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, i: u16) {
        self.i = i;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc & ADDRESS_MASK;
    }

    /// Reads a byte; addresses past the end of memory wrap around to the start
    pub fn read(&self, addr: u16) -> u8 {
        self.ram[usize::from(addr & ADDRESS_MASK)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.ram[usize::from(addr & ADDRESS_MASK)] = value;
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram[..]
    }

    /// Copies `data` verbatim starting at `addr`
    pub(crate) fn write_block(&mut self, addr: u16, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// Number of ROM bytes currently loaded at `PROGRAM_START`
    pub fn rom_len(&self) -> usize {
        self.rom_len
    }

    pub(crate) fn set_rom_len(&mut self, len: usize) {
        self.rom_len = len;
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// Decrements both timers, stopping at 0
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn push(&mut self, addr: u16) {
        self.stack.push(addr);
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn peek(&self) -> Option<u16> {
        self.stack.last().copied()
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
