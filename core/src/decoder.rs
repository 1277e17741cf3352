use log::{trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Quirks;
use crate::display::PixelManager;
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keys::Keys;
use crate::memory::Memory;
use crate::operations::{handler, Machine};

/// Side effects of an executed instruction that a host may want to react to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effect {
    /// For conditional skips, whether the skip fired
    pub branch: Option<bool>,
    /// A pixel, the resolution or the selector may have changed
    pub redraw: bool,
    /// The PC was held because no key was pressed
    pub waiting: bool,
    pub fault: Option<Fault>,
}

/// # Decoded
/// A single opcode after classification, with its human readable trace.
///
/// The trace always starts with the dry-run text for the opcode; executing appends the
/// runtime values after a further ` ; `.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u16,
    pub instruction: Instruction,
    pub trace: String,
    pub effect: Effect,
}

/// # Decoder
/// Classifies opcodes and either describes them (dry run) or applies them to the machine.
///
/// The decoder owns the pieces of state that belong to the interpreter rather than the
/// program: the quirk switches and the random source for CXKK.
pub struct Decoder {
    quirks: Quirks,
    rng: StdRng,
}

impl Decoder {
    pub fn new(quirks: Quirks) -> Self {
        Decoder {
            quirks,
            rng: StdRng::from_entropy(),
        }
    }

    /// A decoder whose CXKK results are reproducible
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Decoder {
            quirks,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    /// Describes `op` without touching any state
    pub fn explain(&self, op: u16) -> Decoded {
        let instruction = Instruction::classify(op);
        Decoded {
            opcode: op,
            instruction,
            trace: self.skeleton(op, instruction),
            effect: Effect::default(),
        }
    }

    /// Applies `op` to the machine. The PC is expected to already point past `op`.
    pub fn execute(
        &mut self,
        op: u16,
        memory: &mut Memory,
        display: &mut PixelManager,
        keys: &Keys,
    ) -> Decoded {
        let instruction = Instruction::classify(op);
        let mut machine = Machine {
            memory,
            display,
            keys,
            quirks: &self.quirks,
            rng: &mut self.rng,
        };
        let outcome = handler(instruction)(op, &mut machine);

        let mut trace = self.skeleton(op, instruction);
        if !outcome.detail.is_empty() {
            trace.push_str(" ; ");
            trace.push_str(&outcome.detail);
        }
        trace!("{}", trace);
        if let Some(fault) = outcome.effect.fault {
            warn!("{} ({})", fault, trace);
        }

        Decoded {
            opcode: op,
            instruction,
            trace,
            effect: outcome.effect,
        }
    }

    /// Either `explain` or `execute` depending on `dry_run`
    pub fn decode(
        &mut self,
        op: u16,
        dry_run: bool,
        memory: &mut Memory,
        display: &mut PixelManager,
        keys: &Keys,
    ) -> Decoded {
        if dry_run {
            self.explain(op)
        } else {
            self.execute(op, memory, display, keys)
        }
    }

    fn skeleton(&self, op: u16, instruction: Instruction) -> String {
        format!(
            "{:04X}  {:<18} ; {}",
            op,
            instruction.mnemonic(op, &self.quirks),
            instruction.summary(op, &self.quirks)
        )
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

#[cfg(test)]
mod test_decoder {
    use super::*;
    use crate::constants::FONT;
    use crate::display::{Plane, PlaneSelector, Resolution};
    use crate::fetcher::Fetcher;

    struct Rig {
        memory: Memory,
        display: PixelManager,
        keys: Keys,
        decoder: Decoder,
    }

    impl Rig {
        fn new() -> Self {
            Self::with_quirks(Quirks::default())
        }

        fn with_quirks(quirks: Quirks) -> Self {
            Rig {
                memory: Memory::new(),
                display: PixelManager::default(),
                keys: Keys::new(),
                decoder: Decoder::with_seed(quirks, 8),
            }
        }

        /// Executes `op` as if it had just been fetched from the PC
        fn exec(&mut self, op: u16) -> Decoded {
            self.memory.increment_pc();
            self.decoder
                .execute(op, &mut self.memory, &mut self.display, &self.keys)
        }

        fn regs(&mut self, values: &[(u8, u8)]) {
            for &(x, value) in values {
                self.memory.set_v(x, value);
            }
        }
    }

    #[test]
    fn test_00e0_clr() {
        let mut rig = Rig::new();
        rig.display.draw(3, 4, Plane::A);
        rig.display.draw(5, 6, Plane::B);
        let decoded = rig.exec(0x00E0);
        assert!(decoded.effect.redraw);
        assert!(!rig.display.pixel(3, 4, Plane::A));
        assert!(!rig.display.pixel(5, 6, Plane::B));
    }

    #[test]
    fn test_00ee_rts() {
        let mut rig = Rig::new();
        rig.memory.push(0x0ABC);
        rig.exec(0x00EE);
        assert_eq!(rig.memory.pc(), 0x0ABC);
        assert!(rig.memory.stack().is_empty());
    }

    #[test]
    fn test_00ee_rts_underflow() {
        let mut rig = Rig::new();
        let decoded = rig.exec(0x00EE);
        assert_eq!(decoded.effect.fault, Some(Fault::StackUnderflow));
        assert_eq!(rig.memory.pc(), 0x202);
    }

    #[test]
    fn test_1nnn_jump() {
        let mut rig = Rig::new();
        rig.exec(0x1ABC);
        assert_eq!(rig.memory.pc(), 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut rig = Rig::new();
        rig.exec(0x2ABC);
        assert_eq!(rig.memory.pc(), 0x0ABC);
        assert_eq!(rig.memory.peek(), Some(0x202));
    }

    #[test]
    fn test_3xkk_ske() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x11)]);
        let decoded = rig.exec(0x3111);
        assert_eq!(decoded.effect.branch, Some(true));
        assert_eq!(rig.memory.pc(), 0x204);
        let decoded = rig.exec(0x3112);
        assert_eq!(decoded.effect.branch, Some(false));
        assert_eq!(rig.memory.pc(), 0x206);
    }

    #[test]
    fn test_4xkk_skne() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x11)]);
        rig.exec(0x4111);
        assert_eq!(rig.memory.pc(), 0x202);
        rig.exec(0x4112);
        assert_eq!(rig.memory.pc(), 0x206);
    }

    #[test]
    fn test_5xy0_skre() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x11), (2, 0x11), (3, 0x12)]);
        rig.exec(0x5120);
        assert_eq!(rig.memory.pc(), 0x204);
        rig.exec(0x5130);
        assert_eq!(rig.memory.pc(), 0x206);
    }

    #[test]
    fn test_9xy0_skrne() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x11), (2, 0x11), (3, 0x12)]);
        rig.exec(0x9120);
        assert_eq!(rig.memory.pc(), 0x202);
        rig.exec(0x9130);
        assert_eq!(rig.memory.pc(), 0x206);
    }

    #[test]
    fn test_6xkk_load() {
        let mut rig = Rig::new();
        rig.exec(0x6122);
        assert_eq!(rig.memory.v(1), 0x22);
    }

    #[test]
    fn test_7xkk_add_every_value() {
        let mut rig = Rig::new();
        for start in 0..=255u8 {
            for kk in 0..=255u8 {
                rig.regs(&[(1, start), (0xF, 0x7)]);
                rig.exec(0x7100 | u16::from(kk));
                assert_eq!(rig.memory.v(1), start.wrapping_add(kk));
                assert_eq!(rig.memory.flag(), 0x7);
            }
        }
    }

    #[test]
    fn test_8xy0_mv() {
        let mut rig = Rig::new();
        rig.regs(&[(2, 0x22)]);
        rig.exec(0x8120);
        assert_eq!(rig.memory.v(1), 0x22);
    }

    #[test]
    fn test_8xy1_or() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0b1010), (2, 0b0110)]);
        rig.exec(0x8121);
        assert_eq!(rig.memory.v(1), 0b1110);
    }

    #[test]
    fn test_8xy2_and() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0b1010), (2, 0b0110)]);
        rig.exec(0x8122);
        assert_eq!(rig.memory.v(1), 0b0010);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0b1010), (2, 0b0110)]);
        rig.exec(0x8123);
        assert_eq!(rig.memory.v(1), 0b1100);
    }

    #[test]
    fn test_8xy4_add_every_pair() {
        let mut rig = Rig::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                rig.regs(&[(1, a), (2, b)]);
                rig.exec(0x8124);
                assert_eq!(rig.memory.v(1), a.wrapping_add(b));
                assert_eq!(rig.memory.flag(), (u16::from(a) + u16::from(b) > 0xFF) as u8);
            }
        }
    }

    #[test]
    fn test_8xy4_add_carry_into_vf() {
        let mut rig = Rig::new();
        rig.regs(&[(0xF, 0xFF), (2, 0x01)]);
        rig.exec(0x8F24);
        assert_eq!(rig.memory.flag(), 0x1);
    }

    #[test]
    fn test_8xy5_sub_every_pair() {
        let mut rig = Rig::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                rig.regs(&[(1, a), (2, b)]);
                rig.exec(0x8125);
                assert_eq!(rig.memory.v(1), a.wrapping_sub(b));
                assert_eq!(rig.memory.flag(), (a > b) as u8);
            }
        }
    }

    #[test]
    fn test_8xy7_subn_every_pair() {
        let mut rig = Rig::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                rig.regs(&[(1, a), (2, b)]);
                rig.exec(0x8127);
                assert_eq!(rig.memory.v(1), b.wrapping_sub(a));
                assert_eq!(rig.memory.flag(), (b > a) as u8);
            }
        }
    }

    #[test]
    fn test_8xy5_sub_equal_operands_clear_flag() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x40), (2, 0x40)]);
        rig.exec(0x8125);
        assert_eq!(rig.memory.v(1), 0x00);
        assert_eq!(rig.memory.flag(), 0x0);
    }

    #[test]
    fn test_8fy5_flag_order_quirk() {
        let mut rig = Rig::new();
        rig.regs(&[(0xF, 0x30), (2, 0x10)]);
        rig.exec(0x8F25);
        assert_eq!(rig.memory.flag(), 0x1);

        let mut rig = Rig::with_quirks(Quirks {
            flag_before_result: true,
            ..Quirks::default()
        });
        rig.regs(&[(0xF, 0x30), (2, 0x10)]);
        rig.exec(0x8F25);
        assert_eq!(rig.memory.flag(), 0x20);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut rig = Rig::new();
        for value in 0..=255u8 {
            rig.regs(&[(1, value), (2, 0xAA)]);
            rig.exec(0x8126);
            assert_eq!(rig.memory.v(1), value >> 1);
            assert_eq!(rig.memory.flag(), value & 0x1);
        }
    }

    #[test]
    fn test_8xye_shl() {
        let mut rig = Rig::new();
        for value in 0..=255u8 {
            rig.regs(&[(1, value), (2, 0xAA)]);
            rig.exec(0x812E);
            assert_eq!(rig.memory.v(1), value << 1);
            assert_eq!(rig.memory.flag(), value >> 7);
        }
    }

    #[test]
    fn test_shift_source_quirk() {
        let mut rig = Rig::with_quirks(Quirks {
            shift_uses_vy: true,
            ..Quirks::default()
        });
        rig.regs(&[(1, 0x00), (2, 0x81)]);
        rig.exec(0x8126);
        assert_eq!(rig.memory.v(1), 0x40);
        assert_eq!(rig.memory.flag(), 0x1);
        assert_eq!(rig.memory.v(2), 0x81);
    }

    #[test]
    fn test_annn_loadi() {
        let mut rig = Rig::new();
        rig.exec(0xAABC);
        assert_eq!(rig.memory.i(), 0x0ABC);
    }

    #[test]
    fn test_bnnn_jumpi() {
        let mut rig = Rig::new();
        rig.regs(&[(0, 0x10), (3, 0x20)]);
        rig.exec(0xB300);
        assert_eq!(rig.memory.pc(), 0x310);

        let mut rig = Rig::with_quirks(Quirks {
            jump_offset_uses_vx: true,
            ..Quirks::default()
        });
        rig.regs(&[(0, 0x10), (3, 0x20)]);
        rig.exec(0xB300);
        assert_eq!(rig.memory.pc(), 0x320);
    }

    #[test]
    fn test_cxkk_rand_is_masked_and_seeded() {
        let mut first = Rig::new();
        let mut second = Rig::new();
        for _ in 0..32 {
            first.exec(0xC10F);
            second.exec(0xC10F);
            assert_eq!(first.memory.v(1) & 0xF0, 0);
            assert_eq!(first.memory.v(1), second.memory.v(1));
        }
        first.exec(0xC100);
        assert_eq!(first.memory.v(1), 0);
    }

    #[test]
    fn test_dxyn_draw() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x400);
        rig.memory.write(0x400, 0b1100_0000);
        rig.regs(&[(0, 10), (1, 10)]);
        let decoded = rig.exec(0xD011);
        assert!(decoded.effect.redraw);
        assert!(rig.display.pixel(10, 10, Plane::A));
        assert!(rig.display.pixel(11, 10, Plane::A));
        assert_eq!(rig.memory.flag(), 0x0);

        rig.exec(0xD011);
        assert!(!rig.display.pixel(10, 10, Plane::A));
        assert_eq!(rig.memory.flag(), 0x1);
    }

    #[test]
    fn test_dxyn_full_row_at_ten_ten() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x400);
        rig.memory.write(0x400, 0xFF);
        rig.regs(&[(0, 10), (1, 10)]);
        rig.exec(0xD011);
        for x in 0..128 {
            assert_eq!(rig.display.pixel(x, 10, Plane::A), (10..=17).contains(&x));
        }
        assert_eq!(rig.memory.flag(), 0x0);
    }

    #[test]
    fn test_dxy0_draws_nothing() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x400);
        rig.memory.write(0x400, 0xFF);
        rig.regs(&[(0xF, 0x1)]);
        rig.exec(0xD000);
        assert!(!rig.display.pixel(0, 0, Plane::A));
        assert_eq!(rig.memory.flag(), 0x0);
    }

    #[test]
    fn test_dxyn_both_planes_read_consecutive_rows() {
        let mut rig = Rig::new();
        rig.display.set_selector(PlaneSelector::Both);
        rig.memory.set_i(0x400);
        rig.memory.write(0x400, 0b1000_0000);
        rig.memory.write(0x401, 0b0100_0000);
        rig.exec(0xD001);
        assert!(rig.display.pixel(0, 0, Plane::A));
        assert!(!rig.display.pixel(1, 0, Plane::A));
        assert!(rig.display.pixel(1, 0, Plane::B));
        assert!(!rig.display.pixel(0, 0, Plane::B));
    }

    #[test]
    fn test_dxyn_no_plane_selected() {
        let mut rig = Rig::new();
        rig.display.set_selector(PlaneSelector::None);
        rig.memory.set_i(0x400);
        rig.memory.write(0x400, 0xFF);
        rig.exec(0xD001);
        assert!(!rig.display.pixel(0, 0, Plane::A));
        assert!(!rig.display.pixel(0, 0, Plane::B));
    }

    #[test]
    fn test_ex9e_skpr_and_exa1_skup() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x5)]);
        rig.exec(0xE19E);
        assert_eq!(rig.memory.pc(), 0x202);
        rig.exec(0xE1A1);
        assert_eq!(rig.memory.pc(), 0x206);

        rig.keys.press(0x5);
        rig.exec(0xE19E);
        assert_eq!(rig.memory.pc(), 0x20A);
        rig.exec(0xE1A1);
        assert_eq!(rig.memory.pc(), 0x20C);
    }

    #[test]
    fn test_ex9e_uses_low_nibble_of_vx() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x35)]);
        rig.keys.press(0x5);
        let decoded = rig.exec(0xE19E);
        assert_eq!(decoded.effect.branch, Some(true));
    }

    #[test]
    fn test_fx07_moved() {
        let mut rig = Rig::new();
        rig.memory.set_delay_timer(0x33);
        rig.exec(0xF107);
        assert_eq!(rig.memory.v(1), 0x33);
    }

    #[test]
    fn test_fx0a_keyd_waits() {
        let mut rig = Rig::new();
        let decoded = rig.exec(0xF10A);
        assert!(decoded.effect.waiting);
        assert_eq!(rig.memory.pc(), 0x200);

        rig.keys.press(0x9);
        let decoded = rig.exec(0xF10A);
        assert!(!decoded.effect.waiting);
        assert_eq!(rig.memory.v(1), 0x9);
        assert_eq!(rig.memory.pc(), 0x202);
    }

    #[test]
    fn test_fx15_loads_and_fx18_ld() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x21), (2, 0x42)]);
        rig.exec(0xF115);
        rig.exec(0xF218);
        assert_eq!(rig.memory.delay_timer(), 0x21);
        assert_eq!(rig.memory.sound_timer(), 0x42);
    }

    #[test]
    fn test_fx1e_addi() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x0FFF);
        rig.regs(&[(1, 0x02), (0xF, 0x7)]);
        rig.exec(0xF11E);
        assert_eq!(rig.memory.i(), 0x1001);
        assert_eq!(rig.memory.flag(), 0x7);
    }

    #[test]
    fn test_fx29_ldspr_every_digit() {
        let mut rig = Rig::new();
        rig.memory.write_block(0x50, &FONT);
        for digit in 0..=255u8 {
            rig.regs(&[(1, digit)]);
            rig.exec(0xF129);
            let glyph = u16::from(digit & 0xF);
            assert_eq!(rig.memory.i(), 0x50 + 5 * glyph);
            let start = usize::from(5 * glyph);
            assert_eq!(
                &rig.memory.ram()[usize::from(rig.memory.i())..][..5],
                &FONT[start..start + 5]
            );
        }
    }

    #[test]
    fn test_fx33_bcd_every_value() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x300);
        for value in 0..=255u8 {
            rig.regs(&[(1, value)]);
            rig.exec(0xF133);
            let digits = [
                rig.memory.read(0x300),
                rig.memory.read(0x301),
                rig.memory.read(0x302),
            ];
            assert_eq!(
                u16::from(digits[0]) * 100 + u16::from(digits[1]) * 10 + u16::from(digits[2]),
                u16::from(value)
            );
            assert!(digits.iter().all(|&d| d < 10));
        }
    }

    #[test]
    fn test_fx55_fx65_round_trip() {
        for x in 0..=0xFu8 {
            let mut rig = Rig::new();
            rig.memory.set_i(0x300);
            for reg in 0..=x {
                rig.regs(&[(reg, 0x10 + reg)]);
            }
            rig.exec(0xF055 | u16::from(x) << 8);
            assert_eq!(rig.memory.i(), 0x300);

            for reg in 0..16 {
                rig.regs(&[(reg, 0)]);
            }
            rig.exec(0xF065 | u16::from(x) << 8);
            for reg in 0..=x {
                assert_eq!(rig.memory.v(reg), 0x10 + reg);
            }
            for reg in (x + 1)..16 {
                assert_eq!(rig.memory.v(reg), 0);
            }
        }
    }

    #[test]
    fn test_fx55_index_advances_quirk() {
        let mut rig = Rig::with_quirks(Quirks {
            index_advances: true,
            ..Quirks::default()
        });
        rig.memory.set_i(0x300);
        rig.exec(0xF355);
        assert_eq!(rig.memory.i(), 0x304);
        rig.exec(0xF165);
        assert_eq!(rig.memory.i(), 0x306);
    }

    #[test]
    fn test_fn01_plane() {
        let mut rig = Rig::new();
        rig.exec(0xF301);
        assert_eq!(rig.display.selector(), PlaneSelector::Both);
        rig.exec(0xF001);
        assert_eq!(rig.display.selector(), PlaneSelector::None);
        rig.exec(0xF601);
        assert_eq!(rig.display.selector(), PlaneSelector::B);
    }

    #[test]
    fn test_resolution_switch_keeps_pixels() {
        let mut rig = Rig::new();
        rig.display.draw(1, 1, Plane::A);
        rig.exec(0x00FF);
        assert_eq!(rig.display.resolution(), Resolution::Extended);
        assert!(rig.display.pixel(1, 1, Plane::A));
        rig.exec(0x00FE);
        assert_eq!(rig.display.resolution(), Resolution::Standard);
        assert!(rig.display.pixel(1, 1, Plane::A));
    }

    #[test]
    fn test_00cn_scroll_down() {
        let mut rig = Rig::new();
        rig.exec(0x00FF);
        rig.display.draw(0, 0, Plane::A);
        rig.exec(0x00C3);
        assert!(!rig.display.pixel(0, 0, Plane::A));
        assert!(rig.display.pixel(0, 3, Plane::A));
        rig.exec(0x00D2);
        assert!(rig.display.pixel(0, 1, Plane::A));
    }

    #[test]
    fn test_00fb_scroll_right_standard_is_halved() {
        let mut rig = Rig::new();
        rig.display.draw(0, 0, Plane::A);
        rig.exec(0x00FB);
        assert!(rig.display.pixel(2, 0, Plane::A));
        rig.exec(0x00FC);
        assert!(rig.display.pixel(0, 0, Plane::A));
    }

    #[test]
    fn test_unknown_opcode_is_reported() {
        let mut rig = Rig::new();
        let decoded = rig.exec(0x5121);
        assert_eq!(decoded.instruction, Instruction::Unknown);
        assert_eq!(
            decoded.effect.fault,
            Some(Fault::UnknownOpcode { opcode: 0x5121 })
        );
        assert_eq!(rig.memory.pc(), 0x202);
    }

    #[test]
    fn test_0000_does_nothing() {
        let mut rig = Rig::new();
        let decoded = rig.exec(0x0000);
        assert_eq!(decoded.effect, Effect::default());
        assert_eq!(rig.memory.pc(), 0x202);
    }

    #[test]
    fn test_explain_leaves_state_alone() {
        let mut rig = Rig::new();
        rig.memory.set_i(0x300);
        let before = rig.memory.clone();
        for op in [0x6122u16, 0xC1FF, 0xD015, 0x00E0, 0xF155, 0x2ABC].iter() {
            rig.decoder
                .decode(*op, true, &mut rig.memory, &mut rig.display, &rig.keys);
        }
        assert_eq!(rig.memory.registers(), before.registers());
        assert_eq!(rig.memory.ram(), before.ram());
        assert_eq!(rig.memory.pc(), before.pc());
        assert!(rig.memory.stack().is_empty());
    }

    #[test]
    fn test_trace_extends_explanation() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x10), (2, 0x20)]);
        for op in [0x7122u16, 0x8124, 0x8125, 0xA300, 0xF133, 0x3110, 0x00EE, 0x0123].iter() {
            let dry = rig.decoder.explain(*op);
            let wet = rig.exec(*op);
            assert!(wet.trace.starts_with(&dry.trace), "{}", wet.trace);
            assert_eq!(dry.instruction, wet.instruction);
        }
    }

    #[test]
    fn test_trace_layout() {
        let rig = Rig::new();
        assert_eq!(
            rig.decoder.explain(0x7122).trace,
            "7122  ADD V1, 0x22       ; V1 += 0x22"
        );
    }

    #[test]
    fn test_trace_reports_values() {
        let mut rig = Rig::new();
        rig.regs(&[(1, 0x10)]);
        let decoded = rig.exec(0x7122);
        assert_eq!(
            decoded.trace,
            "7122  ADD V1, 0x22       ; V1 += 0x22 ; V1: 0x10 -> 0x32"
        );
    }
}
