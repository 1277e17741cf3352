use std::fmt;

use log::{info, warn};

use duo8::constants::PROGRAM_START;
use duo8::{loader, Chip8, Plane};

/// What happened over a whole run
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub executed: usize,
    pub ticks: usize,
    pub faults: usize,
    /// Stopped early on a key wait that no held key can satisfy
    pub stalled: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "executed {} instructions over {} ticks, {} faults{}",
            self.executed,
            self.ticks,
            self.faults,
            if self.stalled {
                ", stalled waiting for a key"
            } else {
                ""
            }
        )
    }
}

/// Steps `chip8` up to `cycles` times, ticking the timers every `per_tick` instructions
pub fn run(chip8: &mut Chip8, cycles: usize, per_tick: usize) -> Summary {
    let per_tick = per_tick.max(1);
    let mut summary = Summary::default();

    for cycle in 1..=cycles {
        let decoded = chip8.step();
        summary.executed += 1;
        if decoded.effect.fault.is_some() {
            summary.faults += 1;
        }
        if cycle % per_tick == 0 {
            chip8.tick();
            summary.ticks += 1;
        }
        // Held keys never change during a run
        if decoded.effect.waiting {
            warn!("{} with no key held, stopping", decoded.trace);
            summary.stalled = true;
            break;
        }
    }

    info!("{}", summary);
    summary
}

/// Prints the ROM bytes followed by a listing of the instructions they hold
pub fn dump(chip8: &Chip8) {
    println!("{}", loader::annotated_dump(chip8.memory()));
    for line in listing(chip8) {
        println!("{}", line);
    }
}

/// One dry-run line per instruction of the loaded ROM
pub fn listing(chip8: &Chip8) -> Vec<String> {
    let words = (chip8.memory().rom_len() + 1) / 2;
    chip8
        .disassemble(PROGRAM_START, words)
        .into_iter()
        .map(|(addr, decoded)| format!("{:03X}  {}", addr, decoded.trace))
        .collect()
}

/// The active area as text: `#` plane A, `+` plane B, `@` both
pub fn render(chip8: &Chip8) -> String {
    let display = chip8.display();
    let mut frame = String::with_capacity((display.width() + 1) * display.height());
    for y in 0..display.height() {
        for x in 0..display.width() {
            frame.push(
                match (display.pixel(x, y, Plane::A), display.pixel(x, y, Plane::B)) {
                    (true, true) => '@',
                    (true, false) => '#',
                    (false, true) => '+',
                    (false, false) => '.',
                },
            );
        }
        frame.push('\n');
    }
    frame
}
