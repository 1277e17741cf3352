use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::Quirks;
use crate::constants::{FONT_ADDRESS, FONT_GLYPH_SIZE};
use crate::decoder::Effect;
use crate::display::{PixelManager, PlaneSelector, Resolution};
use crate::error::Fault;
use crate::fetcher::Fetcher;
use crate::instruction::{jump_base, shift_source, Instruction};
use crate::keys::Keys;
use crate::memory::Memory;
use crate::opcode::Opcode;

/// Everything a single instruction may read or mutate
pub struct Machine<'a> {
    pub memory: &'a mut Memory,
    pub display: &'a mut PixelManager,
    pub keys: &'a Keys,
    pub quirks: &'a Quirks,
    pub rng: &'a mut StdRng,
}

/// Runtime details of one executed instruction
#[derive(Debug, Default)]
pub struct Outcome {
    pub detail: String,
    pub effect: Effect,
}

impl Outcome {
    fn note(detail: String) -> Self {
        Outcome {
            detail,
            effect: Effect::default(),
        }
    }

    fn redraw(detail: String) -> Self {
        let mut outcome = Outcome::note(detail);
        outcome.effect.redraw = true;
        outcome
    }
}

pub type Handler = fn(op: u16, m: &mut Machine) -> Outcome;

/// Selects the handler for an already classified instruction
pub fn handler(instruction: Instruction) -> Handler {
    match instruction {
        Instruction::Empty => nop,
        Instruction::ClearScreen => clr,
        Instruction::Return => rts,
        Instruction::ScrollRight => scr,
        Instruction::ScrollLeft => scl,
        Instruction::LowResolution => low,
        Instruction::HighResolution => high,
        Instruction::ScrollDown => scd,
        Instruction::ScrollUp => scu,
        Instruction::SkipIfKey => skpr,
        Instruction::SkipIfNotKey => skup,
        Instruction::GetDelay => moved,
        Instruction::WaitKey => keyd,
        Instruction::SetDelay => loads,
        Instruction::SetSound => ld,
        Instruction::AddIndex => addi,
        Instruction::FontChar => ldspr,
        Instruction::Bcd => bcd,
        Instruction::Dump => stor,
        Instruction::Fill => read,
        Instruction::SelectPlane => plane,
        Instruction::Jump => jump,
        Instruction::Call => call,
        Instruction::SkipIfEqual => ske,
        Instruction::SkipIfNotEqual => skne,
        Instruction::Load => load,
        Instruction::AddImmediate => add,
        Instruction::LoadIndex => loadi,
        Instruction::JumpOffset => jumpi,
        Instruction::Random => rand,
        Instruction::Draw => draw,
        Instruction::SkipIfRegistersEqual => skre,
        Instruction::Move => mv,
        Instruction::Or => or,
        Instruction::And => and,
        Instruction::Xor => xor,
        Instruction::AddRegisters => addr,
        Instruction::Subtract => sub,
        Instruction::ShiftRight => shr,
        Instruction::SubtractReversed => subn,
        Instruction::ShiftLeft => shl,
        Instruction::SkipIfRegistersNotEqual => skrne,
        Instruction::Unknown => unknown,
    }
}

/// Skips the next instruction when `condition` holds
fn skip_if(m: &mut Machine, condition: bool, detail: String) -> Outcome {
    if condition {
        m.memory.increment_pc();
    }
    let mut outcome = Outcome::note(format!(
        "{}, {}",
        detail,
        if condition { "skipped" } else { "not skipped" }
    ));
    outcome.effect.branch = Some(condition);
    outcome
}

/// Writes `value` to Vx and describes the change
fn assign(m: &mut Machine, x: u8, value: u8) -> String {
    let before = m.memory.v(x);
    m.memory.set_v(x, value);
    format!("V{:X}: {:#04X} -> {:#04X}", x, before, value)
}

/// do nothing
fn nop(_op: u16, _m: &mut Machine) -> Outcome {
    Outcome::default()
}

/// clear
fn clr(_op: u16, m: &mut Machine) -> Outcome {
    m.display.clear();
    Outcome::redraw(String::new())
}

/// PC = STACK.pop()
fn rts(_op: u16, m: &mut Machine) -> Outcome {
    match m.memory.pop() {
        Ok(addr) => {
            m.memory.set_pc(addr);
            Outcome::note(format!("returning to {:#05X}", addr))
        }
        Err(fault) => {
            let mut outcome = Outcome::note(format!(
                "stack was empty, PC left at {:#05X}",
                m.memory.pc()
            ));
            outcome.effect.fault = Some(fault);
            outcome
        }
    }
}

/// scroll right 4 (2 in standard resolution)
fn scr(_op: u16, m: &mut Machine) -> Outcome {
    m.display.scroll_right();
    Outcome::redraw(format!("planes {:?}", m.display.selector()))
}

/// scroll left 4 (2 in standard resolution)
fn scl(_op: u16, m: &mut Machine) -> Outcome {
    m.display.scroll_left();
    Outcome::redraw(format!("planes {:?}", m.display.selector()))
}

/// scroll down n (n / 2 in standard resolution)
fn scd(op: u16, m: &mut Machine) -> Outcome {
    m.display.scroll_down(usize::from(op.n()));
    Outcome::redraw(format!("planes {:?}", m.display.selector()))
}

/// scroll up n (n / 2 in standard resolution)
fn scu(op: u16, m: &mut Machine) -> Outcome {
    m.display.scroll_up(usize::from(op.n()));
    Outcome::redraw(format!("planes {:?}", m.display.selector()))
}

/// resolution = 64x32
fn low(_op: u16, m: &mut Machine) -> Outcome {
    debug!("switching to standard resolution");
    m.display.set_resolution(Resolution::Standard);
    Outcome::redraw(String::new())
}

/// resolution = 128x64
fn high(_op: u16, m: &mut Machine) -> Outcome {
    debug!("switching to extended resolution");
    m.display.set_resolution(Resolution::Extended);
    Outcome::redraw(String::new())
}

/// PC = addr
fn jump(op: u16, m: &mut Machine) -> Outcome {
    m.memory.set_pc(op.addr());
    Outcome::default()
}

/// STACK.push(PC); PC = addr
fn call(op: u16, m: &mut Machine) -> Outcome {
    let ret = m.memory.pc();
    m.memory.push(ret);
    m.memory.set_pc(op.addr());
    Outcome::note(format!("return address {:#05X}, depth {}", ret, m.memory.stack().len()))
}

/// if Vx == kk then pc += 2
fn ske(op: u16, m: &mut Machine) -> Outcome {
    let vx = m.memory.v(op.x());
    skip_if(m, vx == op.kk(), format!("V{:X} = {:#04X}", op.x(), vx))
}

/// if Vx != kk then pc += 2
fn skne(op: u16, m: &mut Machine) -> Outcome {
    let vx = m.memory.v(op.x());
    skip_if(m, vx != op.kk(), format!("V{:X} = {:#04X}", op.x(), vx))
}

/// if Vx == Vy then pc += 2
fn skre(op: u16, m: &mut Machine) -> Outcome {
    let (vx, vy) = (m.memory.v(op.x()), m.memory.v(op.y()));
    skip_if(
        m,
        vx == vy,
        format!("V{:X} = {:#04X}, V{:X} = {:#04X}", op.x(), vx, op.y(), vy),
    )
}

/// if Vx != Vy then pc += 2
fn skrne(op: u16, m: &mut Machine) -> Outcome {
    let (vx, vy) = (m.memory.v(op.x()), m.memory.v(op.y()));
    skip_if(
        m,
        vx != vy,
        format!("V{:X} = {:#04X}, V{:X} = {:#04X}", op.x(), vx, op.y(), vy),
    )
}

/// Vx = kk
fn load(op: u16, m: &mut Machine) -> Outcome {
    Outcome::note(assign(m, op.x(), op.kk()))
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it. VF is left alone.
fn add(op: u16, m: &mut Machine) -> Outcome {
    let res = m.memory.v(op.x()).wrapping_add(op.kk());
    Outcome::note(assign(m, op.x(), res))
}

/// Vx = Vy
fn mv(op: u16, m: &mut Machine) -> Outcome {
    let vy = m.memory.v(op.y());
    Outcome::note(assign(m, op.x(), vy))
}

/// Vx |= Vy
fn or(op: u16, m: &mut Machine) -> Outcome {
    let res = m.memory.v(op.x()) | m.memory.v(op.y());
    Outcome::note(assign(m, op.x(), res))
}

/// Vx &= Vy
fn and(op: u16, m: &mut Machine) -> Outcome {
    let res = m.memory.v(op.x()) & m.memory.v(op.y());
    Outcome::note(assign(m, op.x(), res))
}

/// Vx ^= Vy
fn xor(op: u16, m: &mut Machine) -> Outcome {
    let res = m.memory.v(op.x()) ^ m.memory.v(op.y());
    Outcome::note(assign(m, op.x(), res))
}

/// Vx += Vy; VF = overflow
fn addr(op: u16, m: &mut Machine) -> Outcome {
    let (res, over) = m.memory.v(op.x()).overflowing_add(m.memory.v(op.y()));
    let detail = assign(m, op.x(), res);
    m.memory.set_flag(over as u8);
    Outcome::note(format!("{}, VF = {}", detail, over as u8))
}

/// Shared by SUB and SUBN; VF is set when nothing had to be borrowed
fn subtract(m: &mut Machine, x: u8, minuend: u8, subtrahend: u8) -> Outcome {
    let res = minuend.wrapping_sub(subtrahend);
    let flag = (minuend > subtrahend) as u8;
    let detail = if m.quirks.flag_before_result {
        m.memory.set_flag(flag);
        assign(m, x, res)
    } else {
        let detail = assign(m, x, res);
        m.memory.set_flag(flag);
        detail
    };
    Outcome::note(format!("{}, VF = {}", detail, flag))
}

/// Vx -= Vy; VF = Vx > Vy
fn sub(op: u16, m: &mut Machine) -> Outcome {
    let (vx, vy) = (m.memory.v(op.x()), m.memory.v(op.y()));
    subtract(m, op.x(), vx, vy)
}

/// Vx = Vy - Vx; VF = Vy > Vx
fn subn(op: u16, m: &mut Machine) -> Outcome {
    let (vx, vy) = (m.memory.v(op.x()), m.memory.v(op.y()));
    subtract(m, op.x(), vy, vx)
}

/// Vx = Vs >> 1; VF = least significant bit of Vs
fn shr(op: u16, m: &mut Machine) -> Outcome {
    let bits = m.memory.v(shift_source(op, m.quirks));
    let detail = assign(m, op.x(), bits >> 1);
    m.memory.set_flag(bits & 0x1);
    Outcome::note(format!("{}, VF = {}", detail, bits & 0x1))
}

/// Vx = Vs << 1; VF = most significant bit of Vs
fn shl(op: u16, m: &mut Machine) -> Outcome {
    let bits = m.memory.v(shift_source(op, m.quirks));
    let detail = assign(m, op.x(), bits << 1);
    m.memory.set_flag(bits >> 7);
    Outcome::note(format!("{}, VF = {}", detail, bits >> 7))
}

/// I = addr
fn loadi(op: u16, m: &mut Machine) -> Outcome {
    m.memory.set_i(op.addr());
    Outcome::default()
}

/// PC = Vb + addr
fn jumpi(op: u16, m: &mut Machine) -> Outcome {
    let base = jump_base(op, m.quirks);
    let target = op.addr() + u16::from(m.memory.v(base));
    m.memory.set_pc(target);
    Outcome::note(format!("PC = {:#05X}", m.memory.pc()))
}

/// Vx = rand_byte & kk
fn rand(op: u16, m: &mut Machine) -> Outcome {
    let rand_byte: u8 = m.rng.gen();
    Outcome::note(assign(m, op.x(), rand_byte & op.kk()))
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n onto every selected plane at x, y with wrapping.
/// With both planes selected, plane B's rows follow plane A's in memory.
/// Sets VF if any pixels were erased.
fn draw(op: u16, m: &mut Machine) -> Outcome {
    let x = usize::from(m.memory.v(op.x()));
    let y = usize::from(m.memory.v(op.y()));
    let rows = u16::from(op.n());

    // Reset the flag register (used for collision detection)
    m.memory.set_flag(0x0);

    let mut collision = false;
    let mut offset = 0;
    for &plane in m.display.selector().planes() {
        let sprite: Vec<u8> = (0..rows)
            .map(|row| m.memory.read(m.memory.i().wrapping_add(offset + row)))
            .collect();
        collision |= m.display.draw_sprite(x, y, &sprite, plane);
        offset += rows;
    }

    if collision {
        m.memory.set_flag(0x1);
    }
    Outcome::redraw(format!("at ({}, {}), VF = {}", x, y, collision as u8))
}

/// if Vx.pressed then pc += 2
fn skpr(op: u16, m: &mut Machine) -> Outcome {
    let key = m.memory.v(op.x());
    let pressed = m.keys.is_pressed(key);
    skip_if(m, pressed, format!("key {:X} pressed = {}", key & 0xF, pressed))
}

/// if !Vx.pressed then pc += 2
fn skup(op: u16, m: &mut Machine) -> Outcome {
    let key = m.memory.v(op.x());
    let pressed = m.keys.is_pressed(key);
    skip_if(m, !pressed, format!("key {:X} pressed = {}", key & 0xF, pressed))
}

/// Vx = DT
fn moved(op: u16, m: &mut Machine) -> Outcome {
    let dt = m.memory.delay_timer();
    Outcome::note(assign(m, op.x(), dt))
}

/// await keypress for Vx
/// Holds the PC on this instruction until some key is down.
fn keyd(op: u16, m: &mut Machine) -> Outcome {
    match m.keys.first_pressed() {
        Some(key) => Outcome::note(format!("key {:X}, {}", key, assign(m, op.x(), key))),
        None => {
            m.memory.decrement_pc();
            let mut outcome = Outcome::note(format!(
                "no key pressed, holding PC at {:#05X}",
                m.memory.pc()
            ));
            outcome.effect.waiting = true;
            outcome
        }
    }
}

/// DT = Vx
fn loads(op: u16, m: &mut Machine) -> Outcome {
    let vx = m.memory.v(op.x());
    m.memory.set_delay_timer(vx);
    Outcome::note(format!("DT = {:#04X}", vx))
}

/// ST = Vx
fn ld(op: u16, m: &mut Machine) -> Outcome {
    let vx = m.memory.v(op.x());
    m.memory.set_sound_timer(vx);
    Outcome::note(format!("ST = {:#04X}", vx))
}

/// I += Vx
fn addi(op: u16, m: &mut Machine) -> Outcome {
    let before = m.memory.i();
    let vx = m.memory.v(op.x());
    m.memory.set_i(before.wrapping_add(u16::from(vx)));
    Outcome::note(format!("I: {:#05X} -> {:#05X}", before, m.memory.i()))
}

/// I = FONT_ADDRESS + Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
fn ldspr(op: u16, m: &mut Machine) -> Outcome {
    let digit = m.memory.v(op.x()) & 0xF;
    m.memory.set_i(FONT_ADDRESS + FONT_GLYPH_SIZE * u16::from(digit));
    Outcome::note(format!("glyph {:X}, I = {:#05X}", digit, m.memory.i()))
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
fn bcd(op: u16, m: &mut Machine) -> Outcome {
    let vx = m.memory.v(op.x());
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    let i = m.memory.i();
    for (offset, digit) in digits.iter().enumerate() {
        m.memory.write(i.wrapping_add(offset as u16), *digit);
    }
    Outcome::note(format!("{} -> {:?}", vx, digits))
}

/// Leaves I past the last register transferred when the quirk asks for it
fn advance_index(op: u16, m: &mut Machine) -> String {
    if m.quirks.index_advances {
        let i = m.memory.i().wrapping_add(u16::from(op.x()) + 1);
        m.memory.set_i(i);
    }
    format!("I = {:#05X}", m.memory.i())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(op: u16, m: &mut Machine) -> Outcome {
    let i = m.memory.i();
    for reg in 0..=op.x() {
        let byte = m.memory.v(reg);
        m.memory.write(i.wrapping_add(u16::from(reg)), byte);
    }
    Outcome::note(advance_index(op, m))
}

/// V0..=Vx = mem[I..=I+x]
fn read(op: u16, m: &mut Machine) -> Outcome {
    let i = m.memory.i();
    for reg in 0..=op.x() {
        let byte = m.memory.read(i.wrapping_add(u16::from(reg)));
        m.memory.set_v(reg, byte);
    }
    Outcome::note(advance_index(op, m))
}

/// selector = x
fn plane(op: u16, m: &mut Machine) -> Outcome {
    let selector = PlaneSelector::from_bits(op.x());
    debug!("selecting planes {:?}", selector);
    m.display.set_selector(selector);
    Outcome::note(format!("planes {:?}", selector))
}

/// report the opcode and carry on
fn unknown(op: u16, m: &mut Machine) -> Outcome {
    let mut outcome = Outcome::note(format!("ignored, continuing at {:#05X}", m.memory.pc()));
    outcome.effect.fault = Some(Fault::UnknownOpcode { opcode: op });
    outcome
}
