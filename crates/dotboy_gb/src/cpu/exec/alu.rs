use super::super::alu;
use super::super::instructions::{AluOp, Op, Operand8, RotOp, R16, R8};
use super::super::regs::Flags;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand8, imm: u8) {
        let value = match src {
            Operand8::Reg(r) => self.read_r8(bus, r),
            Operand8::Imm => imm,
        };
        let (result, flags) = alu::alu8(op, self.regs.a, value, self.regs.flags());
        self.regs.a = result;
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let (result, flags) = alu::inc8(value, self.regs.flags());
        self.write_r8(bus, r, result);
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let (result, flags) = alu::dec8(value, self.regs.flags());
        self.write_r8(bus, r, result);
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_add_hl(&mut self, rr: R16) {
        let (result, flags) = alu::add16(self.regs.hl(), self.read_r16(rr), self.regs.flags());
        self.regs.set_hl(result);
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_add_sp_e8(&mut self, offset: u8) {
        let (result, flags) = alu::add_sp_e8(self.regs.sp, offset);
        self.regs.sp = result;
        self.regs.set_flags(flags);
    }

    /// RLCA, RRCA, RLA, RRA: the CB rotates applied to A, with Z forced clear.
    pub(super) fn exec_rotate_a(&mut self, op: Op) {
        let rot = match op {
            Op::Rlca => RotOp::Rlc,
            Op::Rrca => RotOp::Rrc,
            Op::Rla => RotOp::Rl,
            _ => RotOp::Rr,
        };
        let (result, flags) = alu::rotate(rot, self.regs.a, self.regs.flags());
        self.regs.a = result;
        self.regs.set_flags(flags - Flags::Z);
    }

    pub(super) fn exec_daa(&mut self) {
        let (result, flags) = alu::daa(self.regs.a, self.regs.flags());
        self.regs.a = result;
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.regs.set_flags(self.regs.flags() | Flags::N | Flags::H);
    }

    pub(super) fn exec_scf(&mut self) {
        self.regs.set_flags((self.regs.flags() & Flags::Z) | Flags::C);
    }

    pub(super) fn exec_ccf(&mut self) {
        let flags = self.regs.flags();
        let mut out = flags & Flags::Z;
        out.set(Flags::C, !flags.contains(Flags::C));
        self.regs.set_flags(out);
    }
}
