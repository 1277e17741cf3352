use crate::memory::Memory;

/// Reads instruction words out of memory.
///
/// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes,
/// the first being the most significant.
pub trait Fetcher {
    /// Gets the opcode currently pointed at by the pc and moves the pc past it.
    fn fetch(&mut self) -> u16;

    /// Gets the opcode at `pc` without moving anything.
    fn seek(&self, pc: u16) -> u16;

    fn increment_pc(&mut self);

    fn decrement_pc(&mut self);

    /// `(address, opcode)` pairs for `count` instructions starting at `from`
    fn disassemble(&self, from: u16, count: usize) -> Vec<(u16, u16)> {
        (0..count)
            .map(|n| {
                let addr = from.wrapping_add(2 * n as u16) & crate::constants::ADDRESS_MASK;
                (addr, self.seek(addr))
            })
            .collect()
    }
}

impl Fetcher for Memory {
    fn fetch(&mut self) -> u16 {
        let op = self.seek(self.pc());
        self.increment_pc();
        op
    }

    fn seek(&self, pc: u16) -> u16 {
        let left = u16::from(self.read(pc));
        let right = u16::from(self.read(pc.wrapping_add(1)));
        left << 8 | right
    }

    fn increment_pc(&mut self) {
        self.set_pc(self.pc().wrapping_add(2));
    }

    fn decrement_pc(&mut self) {
        self.set_pc(self.pc().wrapping_sub(2));
    }
}
