//! Static instruction descriptors.
//!
//! Both tables are built once on first use and never change afterwards. Each
//! descriptor records how many operand bytes follow the opcode, the base cost
//! in CPU cycles (the not-taken cost for conditional branches), and the
//! operation to perform. Execution is a single `match` over [`Op`].

use std::fmt;

use lazy_static::lazy_static;

/// First byte of every extended (bit manipulation) instruction.
pub const PREFIX_CB: u8 = 0xCB;

/// 8-bit operand in register-index order: B, C, D, E, H, L, (HL), A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlInd,
    A,
}

impl R8 {
    const ALL: [R8; 8] = [R8::B, R8::C, R8::D, R8::E, R8::H, R8::L, R8::HlInd, R8::A];

    fn from_index(index: u8) -> R8 {
        Self::ALL[(index & 0x07) as usize]
    }

    #[inline]
    fn is_memory(self) -> bool {
        self == R8::HlInd
    }
}

/// Register pairs addressed by 16-bit loads and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16 {
    BC,
    DE,
    HL,
    SP,
}

impl R16 {
    fn from_index(index: u8) -> R16 {
        [R16::BC, R16::DE, R16::HL, R16::SP][(index & 0x03) as usize]
    }
}

/// Register pairs addressed by PUSH and POP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackR16 {
    BC,
    DE,
    HL,
    AF,
}

impl StackR16 {
    fn from_index(index: u8) -> StackR16 {
        [StackR16::BC, StackR16::DE, StackR16::HL, StackR16::AF][(index & 0x03) as usize]
    }
}

/// Memory pointers used by `LD (rr),A` and `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    HlInc,
    HlDec,
}

impl Indirect {
    fn from_index(index: u8) -> Indirect {
        [Indirect::BC, Indirect::DE, Indirect::HlInc, Indirect::HlDec][(index & 0x03) as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    fn from_index(index: u8) -> Cond {
        [Cond::NZ, Cond::Z, Cond::NC, Cond::C][(index & 0x03) as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_index(index: u8) -> AluOp {
        [
            AluOp::Add,
            AluOp::Adc,
            AluOp::Sub,
            AluOp::Sbc,
            AluOp::And,
            AluOp::Xor,
            AluOp::Or,
            AluOp::Cp,
        ][(index & 0x07) as usize]
    }
}

/// Right-hand side of an 8-bit ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand8 {
    Reg(R8),
    Imm,
}

/// Rotate and shift operations of the extended table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl RotOp {
    fn from_index(index: u8) -> RotOp {
        [
            RotOp::Rlc,
            RotOp::Rrc,
            RotOp::Rl,
            RotOp::Rr,
            RotOp::Sla,
            RotOp::Sra,
            RotOp::Swap,
            RotOp::Srl,
        ][(index & 0x07) as usize]
    }
}

/// Every operation the CPU can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    LdR8R8 { dst: R8, src: R8 },
    LdR8Imm(R8),
    LdR16Imm(R16),
    LdIndA(Indirect),
    LdAInd(Indirect),
    LdA16Sp,
    LdA16A,
    LdAA16,
    LdhA8A,
    LdhAA8,
    LdhCA,
    LdhAC,
    LdSpHl,
    LdHlSpE8,

    Inc8(R8),
    Dec8(R8),
    Inc16(R16),
    Dec16(R16),
    AddHl(R16),
    AddSpE8,
    Alu(AluOp, Operand8),

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr(Option<Cond>),
    Jp(Option<Cond>),
    JpHl,
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u8),
    Push(StackR16),
    Pop(StackR16),

    Rot(RotOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

/// Descriptor for one opcode.
#[derive(Clone, Debug)]
pub struct Instruction {
    pub opcode: u8,
    /// True for entries of the CB-prefixed table.
    pub prefixed: bool,
    pub mnemonic: String,
    /// Bytes following the opcode (0..=2). For prefixed entries this is the
    /// sub-opcode byte.
    pub operands: u8,
    /// Base cost in CPU cycles. Conditional branches report their not-taken
    /// cost here; the extra cost of a taken branch is returned by `execute`.
    pub cycles: u32,
    pub op: Op,
}

lazy_static! {
    static ref INSTRUCTIONS: [Option<Instruction>; 256] =
        std::array::from_fn(|i| decode_main(i as u8));
    static ref CB_INSTRUCTIONS: [Instruction; 256] = std::array::from_fn(|i| decode_cb(i as u8));
}

/// Descriptor for an unprefixed opcode, or `None` for the opcode holes and
/// the CB prefix itself.
pub fn instruction(opcode: u8) -> Option<&'static Instruction> {
    INSTRUCTIONS[opcode as usize].as_ref()
}

/// Descriptor for the byte following a CB prefix. The extended table has no
/// holes.
pub fn cb_instruction(opcode: u8) -> &'static Instruction {
    &CB_INSTRUCTIONS[opcode as usize]
}

#[inline]
fn mem_cost(r: R8, reg: u32, mem: u32) -> u32 {
    if r.is_memory() {
        mem
    } else {
        reg
    }
}

fn decode_main(opcode: u8) -> Option<Instruction> {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let (op, operands, cycles) = match (x, z) {
        (0, 0) => match y {
            0 => (Op::Nop, 0, 4),
            1 => (Op::LdA16Sp, 2, 20),
            2 => (Op::Stop, 1, 4),
            3 => (Op::Jr(None), 1, 12),
            _ => (Op::Jr(Some(Cond::from_index(y - 4))), 1, 8),
        },
        (0, 1) if q == 0 => (Op::LdR16Imm(R16::from_index(p)), 2, 12),
        (0, 1) => (Op::AddHl(R16::from_index(p)), 0, 8),
        (0, 2) if q == 0 => (Op::LdIndA(Indirect::from_index(p)), 0, 8),
        (0, 2) => (Op::LdAInd(Indirect::from_index(p)), 0, 8),
        (0, 3) if q == 0 => (Op::Inc16(R16::from_index(p)), 0, 8),
        (0, 3) => (Op::Dec16(R16::from_index(p)), 0, 8),
        (0, 4) => {
            let r = R8::from_index(y);
            (Op::Inc8(r), 0, mem_cost(r, 4, 12))
        }
        (0, 5) => {
            let r = R8::from_index(y);
            (Op::Dec8(r), 0, mem_cost(r, 4, 12))
        }
        (0, 6) => {
            let r = R8::from_index(y);
            (Op::LdR8Imm(r), 1, mem_cost(r, 8, 12))
        }
        (0, _) => {
            let op = [
                Op::Rlca,
                Op::Rrca,
                Op::Rla,
                Op::Rra,
                Op::Daa,
                Op::Cpl,
                Op::Scf,
                Op::Ccf,
            ][y as usize];
            (op, 0, 4)
        }
        (1, 6) if y == 6 => (Op::Halt, 0, 4),
        (1, _) => {
            let dst = R8::from_index(y);
            let src = R8::from_index(z);
            let cycles = if dst.is_memory() || src.is_memory() { 8 } else { 4 };
            (Op::LdR8R8 { dst, src }, 0, cycles)
        }
        (2, _) => {
            let r = R8::from_index(z);
            (
                Op::Alu(AluOp::from_index(y), Operand8::Reg(r)),
                0,
                mem_cost(r, 4, 8),
            )
        }
        (3, 0) => match y {
            0..=3 => (Op::Ret(Some(Cond::from_index(y))), 0, 8),
            4 => (Op::LdhA8A, 1, 12),
            5 => (Op::AddSpE8, 1, 16),
            6 => (Op::LdhAA8, 1, 12),
            _ => (Op::LdHlSpE8, 1, 12),
        },
        (3, 1) if q == 0 => (Op::Pop(StackR16::from_index(p)), 0, 12),
        (3, 1) => match p {
            0 => (Op::Ret(None), 0, 16),
            1 => (Op::Reti, 0, 16),
            2 => (Op::JpHl, 0, 4),
            _ => (Op::LdSpHl, 0, 8),
        },
        (3, 2) => match y {
            0..=3 => (Op::Jp(Some(Cond::from_index(y))), 2, 12),
            4 => (Op::LdhCA, 0, 8),
            5 => (Op::LdA16A, 2, 16),
            6 => (Op::LdhAC, 0, 8),
            _ => (Op::LdAA16, 2, 16),
        },
        (3, 3) => match y {
            0 => (Op::Jp(None), 2, 16),
            6 => (Op::Di, 0, 4),
            7 => (Op::Ei, 0, 4),
            _ => return None,
        },
        (3, 4) if y < 4 => (Op::Call(Some(Cond::from_index(y))), 2, 12),
        (3, 5) if q == 0 => (Op::Push(StackR16::from_index(p)), 0, 16),
        (3, 5) if p == 0 => (Op::Call(None), 2, 24),
        (3, 6) => (Op::Alu(AluOp::from_index(y), Operand8::Imm), 1, 8),
        (3, 7) => (Op::Rst(y * 8), 0, 16),
        _ => return None,
    };

    Some(Instruction {
        opcode,
        prefixed: false,
        mnemonic: op.to_string(),
        operands,
        cycles,
        op,
    })
}

fn decode_cb(opcode: u8) -> Instruction {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let r = R8::from_index(opcode);

    let op = match x {
        0 => Op::Rot(RotOp::from_index(y), r),
        1 => Op::Bit(y, r),
        2 => Op::Res(y, r),
        _ => Op::Set(y, r),
    };
    let cycles = match (x, r.is_memory()) {
        (_, false) => 8,
        (1, true) => 12,
        (_, true) => 16,
    };

    Instruction {
        opcode,
        prefixed: true,
        mnemonic: op.to_string(),
        operands: 1,
        cycles,
        op,
    }
}

impl fmt::Display for R8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for R16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            R16::BC => "BC",
            R16::DE => "DE",
            R16::HL => "HL",
            R16::SP => "SP",
        })
    }
}

impl fmt::Display for StackR16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StackR16::BC => "BC",
            StackR16::DE => "DE",
            StackR16::HL => "HL",
            StackR16::AF => "AF",
        })
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        })
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        })
    }
}

impl fmt::Display for Operand8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand8::Reg(r) => write!(f, "{r}"),
            Operand8::Imm => f.write_str("d8"),
        }
    }
}

impl fmt::Display for RotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotOp::Rlc => "RLC",
            RotOp::Rrc => "RRC",
            RotOp::Rl => "RL",
            RotOp::Rr => "RR",
            RotOp::Sla => "SLA",
            RotOp::Sra => "SRA",
            RotOp::Swap => "SWAP",
            RotOp::Srl => "SRL",
        })
    }
}

fn write_cond(f: &mut fmt::Formatter<'_>, name: &str, cond: Option<Cond>, rest: &str) -> fmt::Result {
    match (cond, rest.is_empty()) {
        (Some(c), true) => write!(f, "{name} {c}"),
        (Some(c), false) => write!(f, "{name} {c},{rest}"),
        (None, true) => f.write_str(name),
        (None, false) => write!(f, "{name} {rest}"),
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Nop => f.write_str("NOP"),
            Op::Stop => f.write_str("STOP"),
            Op::Halt => f.write_str("HALT"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::LdR8R8 { dst, src } => write!(f, "LD {dst},{src}"),
            Op::LdR8Imm(r) => write!(f, "LD {r},d8"),
            Op::LdR16Imm(rr) => write!(f, "LD {rr},d16"),
            Op::LdIndA(ind) => write!(f, "LD {ind},A"),
            Op::LdAInd(ind) => write!(f, "LD A,{ind}"),
            Op::LdA16Sp => f.write_str("LD (a16),SP"),
            Op::LdA16A => f.write_str("LD (a16),A"),
            Op::LdAA16 => f.write_str("LD A,(a16)"),
            Op::LdhA8A => f.write_str("LDH (a8),A"),
            Op::LdhAA8 => f.write_str("LDH A,(a8)"),
            Op::LdhCA => f.write_str("LD (C),A"),
            Op::LdhAC => f.write_str("LD A,(C)"),
            Op::LdSpHl => f.write_str("LD SP,HL"),
            Op::LdHlSpE8 => f.write_str("LD HL,SP+r8"),
            Op::Inc8(r) => write!(f, "INC {r}"),
            Op::Dec8(r) => write!(f, "DEC {r}"),
            Op::Inc16(rr) => write!(f, "INC {rr}"),
            Op::Dec16(rr) => write!(f, "DEC {rr}"),
            Op::AddHl(rr) => write!(f, "ADD HL,{rr}"),
            Op::AddSpE8 => f.write_str("ADD SP,r8"),
            Op::Alu(op, src) => match op {
                AluOp::Add => write!(f, "ADD A,{src}"),
                AluOp::Adc => write!(f, "ADC A,{src}"),
                AluOp::Sub => write!(f, "SUB {src}"),
                AluOp::Sbc => write!(f, "SBC A,{src}"),
                AluOp::And => write!(f, "AND {src}"),
                AluOp::Xor => write!(f, "XOR {src}"),
                AluOp::Or => write!(f, "OR {src}"),
                AluOp::Cp => write!(f, "CP {src}"),
            },
            Op::Rlca => f.write_str("RLCA"),
            Op::Rrca => f.write_str("RRCA"),
            Op::Rla => f.write_str("RLA"),
            Op::Rra => f.write_str("RRA"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),
            Op::Jr(cond) => write_cond(f, "JR", cond, "r8"),
            Op::Jp(cond) => write_cond(f, "JP", cond, "a16"),
            Op::JpHl => f.write_str("JP HL"),
            Op::Call(cond) => write_cond(f, "CALL", cond, "a16"),
            Op::Ret(cond) => write_cond(f, "RET", cond, ""),
            Op::Reti => f.write_str("RETI"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Op::Push(rr) => write!(f, "PUSH {rr}"),
            Op::Pop(rr) => write!(f, "POP {rr}"),
            Op::Rot(op, r) => write!(f, "{op} {r}"),
            Op::Bit(n, r) => write!(f, "BIT {n},{r}"),
            Op::Res(n, r) => write!(f, "RES {n},{r}"),
            Op::Set(n, r) => write!(f, "SET {n},{r}"),
        }
    }
}
