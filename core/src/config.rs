use crate::constants::DEFAULT_FADE_SPEED;
use crate::display::{PlaneSelector, Resolution};

/// # Quirks
/// Switches reproducing the instruction semantics of particular historical interpreters.
///
/// Everything defaults to `false`, which is the behavior most modern ROMs expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE shift VY into VX instead of shifting VX in place
    pub shift_uses_vy: bool,
    /// BNNN adds VX (X being the high nibble of NNN) instead of V0
    pub jump_offset_uses_vx: bool,
    /// FX55/FX65 leave I pointing just past the last register transferred
    pub index_advances: bool,
    /// 8XY5/8XY7 write VF before the difference, so when X is F the difference survives
    pub flag_before_result: bool,
}

/// How erased pixels linger for renderers that want smoothing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
    pub enabled: bool,
    /// Intensity removed from each fading pixel per tick
    pub speed: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        FadeConfig {
            enabled: true,
            speed: DEFAULT_FADE_SPEED,
        }
    }
}

/// Everything the host configures before a ROM starts running
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Config {
    pub quirks: Quirks,
    pub fade: FadeConfig,
    /// Display mode a freshly loaded ROM starts in
    pub resolution: Resolution,
    /// Planes a freshly loaded ROM draws to
    pub selector: PlaneSelector,
}
