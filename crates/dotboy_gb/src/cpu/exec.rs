mod alu;
mod control;
mod ld;
mod stack;
mod system;

use super::instructions::{Instruction, Op};
use super::{Bus, Cpu};

impl Cpu {
    /// Execute a decoded instruction.
    ///
    /// Operand bytes are read at PC+1.. before anything else happens; PC then
    /// moves past the instruction unless the operation redirects it. Returns
    /// the extra cycles of a taken conditional branch (0 otherwise).
    pub fn execute<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> u32 {
        let pc = self.regs.pc;
        let imm = match instr.operands {
            0 => 0,
            1 => bus.read8(pc.wrapping_add(1)) as u16,
            _ => bus.read16(pc.wrapping_add(1)),
        };
        self.regs.pc = pc.wrapping_add(1 + instr.operands as u16);

        match instr.op {
            Op::Jr(cond) => return self.exec_jr(cond, imm as u8),
            Op::Jp(cond) => return self.exec_jp(cond, imm),
            Op::Call(cond) => return self.exec_call(bus, cond, imm),
            Op::Ret(cond) => return self.exec_ret(bus, cond),

            Op::Nop | Op::Stop => {}
            Op::Halt => self.exec_halt(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::LdR8R8 { dst, src } => {
                let value = self.read_r8(bus, src);
                self.write_r8(bus, dst, value);
            }
            Op::LdR8Imm(r) => self.write_r8(bus, r, imm as u8),
            Op::LdR16Imm(rr) => self.write_r16(rr, imm),
            Op::LdIndA(ind) => self.exec_ld_ind_a(bus, ind),
            Op::LdAInd(ind) => self.exec_ld_a_ind(bus, ind),
            Op::LdA16Sp => bus.write16(imm, self.regs.sp),
            Op::LdA16A => bus.write8(imm, self.regs.a),
            Op::LdAA16 => self.regs.a = bus.read8(imm),
            Op::LdhA8A => self.exec_ldh_store(bus, imm as u8),
            Op::LdhAA8 => self.exec_ldh_load(bus, imm as u8),
            Op::LdhCA => self.exec_ldh_store(bus, self.regs.c),
            Op::LdhAC => self.exec_ldh_load(bus, self.regs.c),
            Op::LdSpHl => self.regs.sp = self.regs.hl(),
            Op::LdHlSpE8 => self.exec_ld_hl_sp_e8(imm as u8),

            Op::Inc8(r) => self.exec_inc8(bus, r),
            Op::Dec8(r) => self.exec_dec8(bus, r),
            Op::Inc16(rr) => self.write_r16(rr, self.read_r16(rr).wrapping_add(1)),
            Op::Dec16(rr) => self.write_r16(rr, self.read_r16(rr).wrapping_sub(1)),
            Op::AddHl(rr) => self.exec_add_hl(rr),
            Op::AddSpE8 => self.exec_add_sp_e8(imm as u8),
            Op::Alu(op, src) => self.exec_alu(bus, op, src, imm as u8),

            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => self.exec_rotate_a(instr.op),
            Op::Daa => self.exec_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(rr) => self.exec_push(bus, rr),
            Op::Pop(rr) => self.exec_pop(bus, rr),

            Op::Rot(op, r) => self.exec_cb_rotate(bus, op, r),
            Op::Bit(n, r) => self.exec_cb_bit(bus, n, r),
            Op::Res(n, r) => self.exec_cb_res(bus, n, r),
            Op::Set(n, r) => self.exec_cb_set(bus, n, r),
        }
        0
    }
}
