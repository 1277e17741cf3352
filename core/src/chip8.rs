use log::info;

use crate::config::{Config, FadeConfig, Quirks};
use crate::decoder::{Decoded, Decoder};
use crate::display::PixelManager;
use crate::error::LoadError;
use crate::fetcher::Fetcher;
use crate::keys::Keys;
use crate::loader;
use crate::memory::Memory;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language. This one also speaks the
/// dual-plane extensions: scrolling, a 128x64 mode and plane selection.
///
/// Tracks:
///  - `memory` registers, stack, timers and RAM
///  - `display` both planes plus the fade grid
///  - `keys` with public interfaces for manipulating them
///  - `decoder` quirks and the random source
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and explaining instructions without running them
/// - advancing its timers
/// - inspecting memory and both planes for rendering by some display
///
/// Everything lives in one value so a host that renders from another thread can put the whole
/// machine behind a single lock.
pub struct Chip8 {
    config: Config,
    memory: Memory,
    display: PixelManager,
    keys: Keys,
    decoder: Decoder,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Self::with_decoder(config, Decoder::new(config.quirks))
    }

    /// A machine whose random numbers are reproducible
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_decoder(config, Decoder::with_seed(config.quirks, seed))
    }

    fn with_decoder(config: Config, decoder: Decoder) -> Self {
        Chip8 {
            config,
            memory: loader::blank(),
            display: fresh_display(&config),
            keys: Keys::new(),
            decoder,
        }
    }

    /// Load a rom, replacing memory and the display wholesale.
    ///
    /// Nothing changes if the rom is rejected.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        let memory = loader::load(rom)?;
        self.memory = memory;
        self.display = fresh_display(&self.config);
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - gets the next opcode and moves the pc past it
    /// - executes it
    pub fn step(&mut self) -> Decoded {
        let op = self.memory.fetch();
        self.decoder
            .execute(op, &mut self.memory, &mut self.display, &self.keys)
    }

    pub fn run(&mut self, cycles: usize) -> Vec<Decoded> {
        (0..cycles).map(|_| self.step()).collect()
    }

    /// The 60Hz tick: decrements both timers and decays faded pixels
    pub fn tick(&mut self) {
        self.memory.tick_timers();
        self.display.tick_fade();
    }

    /// Describes the instruction at `addr` without running it
    pub fn explain_at(&self, addr: u16) -> Decoded {
        self.decoder.explain(self.memory.seek(addr))
    }

    /// Describes `count` instructions starting at `from`
    pub fn disassemble(&self, from: u16, count: usize) -> Vec<(u16, Decoded)> {
        self.memory
            .disassemble(from, count)
            .into_iter()
            .map(|(addr, op)| (addr, self.decoder.explain(op)))
            .collect()
    }

    pub fn key_down(&mut self, key: u8) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: u8) {
        self.keys.release(key);
    }

    pub fn keys_mut(&mut self) -> &mut Keys {
        &mut self.keys
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &PixelManager {
        &self.display
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Takes effect from the next instruction
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.config.quirks = quirks;
        self.decoder.set_quirks(quirks);
    }

    pub fn set_fade_config(&mut self, fade: FadeConfig) {
        self.config.fade = fade;
        self.display.set_fade_config(fade);
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.memory.sound_timer() > 0
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn fresh_display(config: &Config) -> PixelManager {
    let mut display = PixelManager::new(config.fade);
    display.set_resolution(config.resolution);
    display.set_selector(config.selector);
    display
}
