//! Flag-computing arithmetic primitives.
//!
//! Every function is pure: it takes operands plus the incoming flags and
//! returns the result with the complete new flag set. Half-carry is the carry
//! out of bit 3 for 8-bit operations and out of bit 11 for 16-bit ones.

use super::instructions::{AluOp, RotOp};
use super::regs::Flags;

pub(super) fn add8(a: u8, b: u8, carry: bool) -> (u8, Flags) {
    let c = carry as u8;
    let full = a as u16 + b as u16 + c as u16;
    let result = full as u8;

    let mut flags = Flags::zero(result);
    flags.set(Flags::H, (a & 0x0F) + (b & 0x0F) + c > 0x0F);
    flags.set(Flags::C, full > 0xFF);
    (result, flags)
}

pub(super) fn sub8(a: u8, b: u8, borrow: bool) -> (u8, Flags) {
    let c = borrow as i16;
    let full = a as i16 - b as i16 - c;
    let half = (a & 0x0F) as i16 - (b & 0x0F) as i16 - c;
    let result = full as u8;

    let mut flags = Flags::zero(result) | Flags::N;
    flags.set(Flags::H, half < 0);
    flags.set(Flags::C, full < 0);
    (result, flags)
}

/// One of the eight accumulator operations. `Cp` returns `a` unchanged.
pub(super) fn alu8(op: AluOp, a: u8, b: u8, flags: Flags) -> (u8, Flags) {
    let carry = flags.contains(Flags::C);
    match op {
        AluOp::Add => add8(a, b, false),
        AluOp::Adc => add8(a, b, carry),
        AluOp::Sub => sub8(a, b, false),
        AluOp::Sbc => sub8(a, b, carry),
        AluOp::And => {
            let r = a & b;
            (r, Flags::zero(r) | Flags::H)
        }
        AluOp::Xor => {
            let r = a ^ b;
            (r, Flags::zero(r))
        }
        AluOp::Or => {
            let r = a | b;
            (r, Flags::zero(r))
        }
        AluOp::Cp => (a, sub8(a, b, false).1),
    }
}

/// INC r / INC (HL). Carry is preserved.
pub(super) fn inc8(value: u8, flags: Flags) -> (u8, Flags) {
    let r = value.wrapping_add(1);
    let mut out = (flags & Flags::C) | Flags::zero(r);
    out.set(Flags::H, value & 0x0F == 0x0F);
    (r, out)
}

/// DEC r / DEC (HL). Carry is preserved.
pub(super) fn dec8(value: u8, flags: Flags) -> (u8, Flags) {
    let r = value.wrapping_sub(1);
    let mut out = (flags & Flags::C) | Flags::zero(r) | Flags::N;
    out.set(Flags::H, value & 0x0F == 0);
    (r, out)
}

/// ADD HL,rr. Zero is preserved.
pub(super) fn add16(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let (r, carry) = hl.overflowing_add(value);
    let mut out = flags & Flags::Z;
    out.set(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    out.set(Flags::C, carry);
    (r, out)
}

/// SP plus a sign-extended 8-bit offset, shared by ADD SP,r8 and
/// LD HL,SP+r8. Zero and subtract are always cleared; H and C come from the
/// unsigned low-byte addition.
pub(super) fn add_sp_e8(sp: u16, offset: u8) -> (u16, Flags) {
    let r = sp.wrapping_add(offset as i8 as i16 as u16);
    let mut flags = Flags::empty();
    flags.set(Flags::H, (sp & 0x000F) + (offset as u16 & 0x0F) > 0x0F);
    flags.set(Flags::C, (sp & 0x00FF) + offset as u16 > 0xFF);
    (r, flags)
}

/// Decimal adjust after a BCD addition or subtraction. N is preserved.
pub(super) fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let mut adjust = 0u8;
    let mut carry = false;

    if flags.contains(Flags::N) {
        if flags.contains(Flags::H) {
            adjust |= 0x06;
        }
        if flags.contains(Flags::C) {
            adjust |= 0x60;
            carry = true;
        }
        let r = a.wrapping_sub(adjust);
        let mut out = Flags::zero(r) | Flags::N;
        out.set(Flags::C, carry);
        return (r, out);
    }

    if flags.contains(Flags::H) || a & 0x0F > 0x09 {
        adjust |= 0x06;
    }
    if flags.contains(Flags::C) || a > 0x99 {
        adjust |= 0x60;
        carry = true;
    }
    let r = a.wrapping_add(adjust);
    let mut out = Flags::zero(r);
    out.set(Flags::C, carry);
    (r, out)
}

/// Rotates and shifts of the extended table. Z reflects the result.
pub(super) fn rotate(op: RotOp, value: u8, flags: Flags) -> (u8, Flags) {
    let carry_in = flags.contains(Flags::C) as u8;
    let (r, carry_out) = match op {
        RotOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        RotOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        RotOp::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
        RotOp::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
        RotOp::Sla => (value << 1, value & 0x80 != 0),
        RotOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        RotOp::Swap => (value.rotate_left(4), false),
        RotOp::Srl => (value >> 1, value & 0x01 != 0),
    };
    let mut out = Flags::zero(r);
    out.set(Flags::C, carry_out);
    (r, out)
}

/// BIT n. Carry is preserved.
pub(super) fn bit(n: u8, value: u8, flags: Flags) -> Flags {
    let mut out = (flags & Flags::C) | Flags::H;
    out.set(Flags::Z, value & (1 << n) == 0);
    out
}
