use crate::config::Quirks;
use crate::opcode::Opcode;

/// Every instruction form the interpreter understands.
///
/// The tag is derived once per opcode by `classify`; operands are still read from the opcode
/// itself through `Opcode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Empty,
    ClearScreen,
    Return,
    ScrollRight,
    ScrollLeft,
    LowResolution,
    HighResolution,
    ScrollDown,
    ScrollUp,
    SkipIfKey,
    SkipIfNotKey,
    GetDelay,
    WaitKey,
    SetDelay,
    SetSound,
    AddIndex,
    FontChar,
    Bcd,
    Dump,
    Fill,
    SelectPlane,
    Jump,
    Call,
    SkipIfEqual,
    SkipIfNotEqual,
    Load,
    AddImmediate,
    LoadIndex,
    JumpOffset,
    Random,
    Draw,
    SkipIfRegistersEqual,
    Move,
    Or,
    And,
    Xor,
    AddRegisters,
    Subtract,
    ShiftRight,
    SubtractReversed,
    ShiftLeft,
    SkipIfRegistersNotEqual,
    Unknown,
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    ///
    /// Masks are tried from most to least specific:
    /// - `0xFFFF` fixed opcodes
    /// - `0xFFF0` scrolls carrying a row count
    /// - `0xF0FF` key, timer, index and memory block instructions
    /// - `0xF000` jumps, immediates and draw
    /// - `0xF00F` register comparison and the ALU
    pub fn classify(op: u16) -> Self {
        exact(op)
            .or_else(|| scroll(op & 0xFFF0))
            .or_else(|| peripheral(op & 0xF0FF))
            .or_else(|| immediate(op & 0xF000))
            .or_else(|| alu(op & 0xF00F))
            .unwrap_or(Instruction::Unknown)
    }

    /// Assembly-style name and operands, e.g. `ADD V1, 0x22`
    pub fn mnemonic(self, op: u16, quirks: &Quirks) -> String {
        let (x, y) = (op.x(), op.y());
        match self {
            Instruction::Empty => "NOP".to_string(),
            Instruction::ClearScreen => "CLS".to_string(),
            Instruction::Return => "RET".to_string(),
            Instruction::ScrollRight => "SCR".to_string(),
            Instruction::ScrollLeft => "SCL".to_string(),
            Instruction::LowResolution => "LOW".to_string(),
            Instruction::HighResolution => "HIGH".to_string(),
            Instruction::ScrollDown => format!("SCD {}", op.n()),
            Instruction::ScrollUp => format!("SCU {}", op.n()),
            Instruction::SkipIfKey => format!("SKP V{:X}", x),
            Instruction::SkipIfNotKey => format!("SKNP V{:X}", x),
            Instruction::GetDelay => format!("LD V{:X}, DT", x),
            Instruction::WaitKey => format!("LD V{:X}, K", x),
            Instruction::SetDelay => format!("LD DT, V{:X}", x),
            Instruction::SetSound => format!("LD ST, V{:X}", x),
            Instruction::AddIndex => format!("ADD I, V{:X}", x),
            Instruction::FontChar => format!("LD F, V{:X}", x),
            Instruction::Bcd => format!("LD B, V{:X}", x),
            Instruction::Dump => format!("LD [I], V{:X}", x),
            Instruction::Fill => format!("LD V{:X}, [I]", x),
            Instruction::SelectPlane => format!("PLANE {}", x),
            Instruction::Jump => format!("JP {:#05X}", op.addr()),
            Instruction::Call => format!("CALL {:#05X}", op.addr()),
            Instruction::SkipIfEqual => format!("SE V{:X}, {:#04X}", x, op.kk()),
            Instruction::SkipIfNotEqual => format!("SNE V{:X}, {:#04X}", x, op.kk()),
            Instruction::Load => format!("LD V{:X}, {:#04X}", x, op.kk()),
            Instruction::AddImmediate => format!("ADD V{:X}, {:#04X}", x, op.kk()),
            Instruction::LoadIndex => format!("LD I, {:#05X}", op.addr()),
            Instruction::JumpOffset => {
                format!("JP V{:X}, {:#05X}", jump_base(op, quirks), op.addr())
            }
            Instruction::Random => format!("RND V{:X}, {:#04X}", x, op.kk()),
            Instruction::Draw => format!("DRW V{:X}, V{:X}, {}", x, y, op.n()),
            Instruction::SkipIfRegistersEqual => format!("SE V{:X}, V{:X}", x, y),
            Instruction::Move => format!("LD V{:X}, V{:X}", x, y),
            Instruction::Or => format!("OR V{:X}, V{:X}", x, y),
            Instruction::And => format!("AND V{:X}, V{:X}", x, y),
            Instruction::Xor => format!("XOR V{:X}, V{:X}", x, y),
            Instruction::AddRegisters => format!("ADD V{:X}, V{:X}", x, y),
            Instruction::Subtract => format!("SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight => format!("SHR V{:X}, V{:X}", x, shift_source(op, quirks)),
            Instruction::SubtractReversed => format!("SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft => format!("SHL V{:X}, V{:X}", x, shift_source(op, quirks)),
            Instruction::SkipIfRegistersNotEqual => format!("SNE V{:X}, V{:X}", x, y),
            Instruction::Unknown => format!("??? {:04X}", op),
        }
    }

    /// What the instruction does, without reference to any runtime values
    pub fn summary(self, op: u16, quirks: &Quirks) -> String {
        let (x, y) = (op.x(), op.y());
        match self {
            Instruction::Empty => "do nothing".to_string(),
            Instruction::ClearScreen => "clear both planes".to_string(),
            Instruction::Return => "PC = stack.pop()".to_string(),
            Instruction::ScrollRight => "scroll selected planes right".to_string(),
            Instruction::ScrollLeft => "scroll selected planes left".to_string(),
            Instruction::LowResolution => "switch to 64x32".to_string(),
            Instruction::HighResolution => "switch to 128x64".to_string(),
            Instruction::ScrollDown => format!("scroll selected planes down {}", op.n()),
            Instruction::ScrollUp => format!("scroll selected planes up {}", op.n()),
            Instruction::SkipIfKey => format!("skip next if key V{:X} is pressed", x),
            Instruction::SkipIfNotKey => format!("skip next if key V{:X} is not pressed", x),
            Instruction::GetDelay => format!("V{:X} = DT", x),
            Instruction::WaitKey => format!("wait for a key press, V{:X} = key", x),
            Instruction::SetDelay => format!("DT = V{:X}", x),
            Instruction::SetSound => format!("ST = V{:X}", x),
            Instruction::AddIndex => format!("I += V{:X}", x),
            Instruction::FontChar => format!("I = glyph address of V{:X}", x),
            Instruction::Bcd => format!("mem[I..I+3] = bcd(V{:X})", x),
            Instruction::Dump => format!("mem[I..=I+{}] = V0..=V{:X}", x, x),
            Instruction::Fill => format!("V0..=V{:X} = mem[I..=I+{}]", x, x),
            Instruction::SelectPlane => format!("select planes {:#04b}", x & 0b11),
            Instruction::Jump => format!("PC = {:#05X}", op.addr()),
            Instruction::Call => format!("stack.push(PC); PC = {:#05X}", op.addr()),
            Instruction::SkipIfEqual => format!("skip next if V{:X} == {:#04X}", x, op.kk()),
            Instruction::SkipIfNotEqual => format!("skip next if V{:X} != {:#04X}", x, op.kk()),
            Instruction::Load => format!("V{:X} = {:#04X}", x, op.kk()),
            Instruction::AddImmediate => format!("V{:X} += {:#04X}", x, op.kk()),
            Instruction::LoadIndex => format!("I = {:#05X}", op.addr()),
            Instruction::JumpOffset => {
                format!("PC = {:#05X} + V{:X}", op.addr(), jump_base(op, quirks))
            }
            Instruction::Random => format!("V{:X} = random & {:#04X}", x, op.kk()),
            Instruction::Draw => format!(
                "draw {} rows from I at (V{:X}, V{:X}); VF = collision",
                op.n(),
                x,
                y
            ),
            Instruction::SkipIfRegistersEqual => format!("skip next if V{:X} == V{:X}", x, y),
            Instruction::Move => format!("V{:X} = V{:X}", x, y),
            Instruction::Or => format!("V{:X} |= V{:X}", x, y),
            Instruction::And => format!("V{:X} &= V{:X}", x, y),
            Instruction::Xor => format!("V{:X} ^= V{:X}", x, y),
            Instruction::AddRegisters => format!("V{:X} += V{:X}; VF = carry", x, y),
            Instruction::Subtract => format!("V{:X} -= V{:X}; VF = no borrow", x, y),
            Instruction::ShiftRight => format!(
                "V{:X} = V{:X} >> 1; VF = shifted bit",
                x,
                shift_source(op, quirks)
            ),
            Instruction::SubtractReversed => {
                format!("V{:X} = V{:X} - V{:X}; VF = no borrow", x, y, x)
            }
            Instruction::ShiftLeft => format!(
                "V{:X} = V{:X} << 1; VF = shifted bit",
                x,
                shift_source(op, quirks)
            ),
            Instruction::SkipIfRegistersNotEqual => format!("skip next if V{:X} != V{:X}", x, y),
            Instruction::Unknown => "unknown opcode".to_string(),
        }
    }

    /// Whether the instruction conditionally skips the next one
    pub fn is_skip(self) -> bool {
        matches!(
            self,
            Instruction::SkipIfKey
                | Instruction::SkipIfNotKey
                | Instruction::SkipIfEqual
                | Instruction::SkipIfNotEqual
                | Instruction::SkipIfRegistersEqual
                | Instruction::SkipIfRegistersNotEqual
        )
    }
}

/// The register BNNN adds to NNN
pub fn jump_base(op: u16, quirks: &Quirks) -> u8 {
    if quirks.jump_offset_uses_vx {
        op.x()
    } else {
        0x0
    }
}

/// The register 8XY6 and 8XYE read before shifting
pub fn shift_source(op: u16, quirks: &Quirks) -> u8 {
    if quirks.shift_uses_vy {
        op.y()
    } else {
        op.x()
    }
}

fn exact(op: u16) -> Option<Instruction> {
    match op {
        0x0000 => Some(Instruction::Empty),
        0x00E0 => Some(Instruction::ClearScreen),
        0x00EE => Some(Instruction::Return),
        0x00FB => Some(Instruction::ScrollRight),
        0x00FC => Some(Instruction::ScrollLeft),
        0x00FE => Some(Instruction::LowResolution),
        0x00FF => Some(Instruction::HighResolution),
        _ => None,
    }
}

fn scroll(masked: u16) -> Option<Instruction> {
    match masked {
        0x00C0 => Some(Instruction::ScrollDown),
        0x00D0 => Some(Instruction::ScrollUp),
        _ => None,
    }
}

fn peripheral(masked: u16) -> Option<Instruction> {
    match masked {
        0xE09E => Some(Instruction::SkipIfKey),
        0xE0A1 => Some(Instruction::SkipIfNotKey),
        0xF001 => Some(Instruction::SelectPlane),
        0xF007 => Some(Instruction::GetDelay),
        0xF00A => Some(Instruction::WaitKey),
        0xF015 => Some(Instruction::SetDelay),
        0xF018 => Some(Instruction::SetSound),
        0xF01E => Some(Instruction::AddIndex),
        0xF029 => Some(Instruction::FontChar),
        0xF033 => Some(Instruction::Bcd),
        0xF055 => Some(Instruction::Dump),
        0xF065 => Some(Instruction::Fill),
        _ => None,
    }
}

fn immediate(masked: u16) -> Option<Instruction> {
    match masked {
        0x1000 => Some(Instruction::Jump),
        0x2000 => Some(Instruction::Call),
        0x3000 => Some(Instruction::SkipIfEqual),
        0x4000 => Some(Instruction::SkipIfNotEqual),
        0x6000 => Some(Instruction::Load),
        0x7000 => Some(Instruction::AddImmediate),
        0xA000 => Some(Instruction::LoadIndex),
        0xB000 => Some(Instruction::JumpOffset),
        0xC000 => Some(Instruction::Random),
        0xD000 => Some(Instruction::Draw),
        _ => None,
    }
}

fn alu(masked: u16) -> Option<Instruction> {
    match masked {
        0x5000 => Some(Instruction::SkipIfRegistersEqual),
        0x8000 => Some(Instruction::Move),
        0x8001 => Some(Instruction::Or),
        0x8002 => Some(Instruction::And),
        0x8003 => Some(Instruction::Xor),
        0x8004 => Some(Instruction::AddRegisters),
        0x8005 => Some(Instruction::Subtract),
        0x8006 => Some(Instruction::ShiftRight),
        0x8007 => Some(Instruction::SubtractReversed),
        0x800E => Some(Instruction::ShiftLeft),
        0x9000 => Some(Instruction::SkipIfRegistersNotEqual),
        _ => None,
    }
}
