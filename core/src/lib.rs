pub use chip8::Chip8;
pub use config::{Config, FadeConfig, Quirks};
pub use decoder::{Decoded, Decoder, Effect};
pub use display::{PixelManager, Plane, PlaneSelector, Resolution};
pub use error::{Fault, LoadError};
pub use fetcher::Fetcher;
pub use instruction::Instruction;
pub use keys::Keys;
pub use memory::Memory;
pub use opcode::Opcode;

mod chip8;
pub mod config;
pub mod constants;
mod decoder;
pub mod display;
mod error;
mod fetcher;
mod instruction;
pub mod keys;
pub mod loader;
mod memory;
mod opcode;
mod operations;
