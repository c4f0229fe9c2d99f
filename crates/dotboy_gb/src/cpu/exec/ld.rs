use super::super::alu;
use super::super::instructions::Indirect;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_ind_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_ind<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
    }

    /// LDH (a8),A and LD (C),A.
    #[inline]
    pub(super) fn exec_ldh_store<B: Bus>(&mut self, bus: &mut B, offset: u8) {
        bus.write8(0xFF00 | offset as u16, self.regs.a);
    }

    /// LDH A,(a8) and LD A,(C).
    #[inline]
    pub(super) fn exec_ldh_load<B: Bus>(&mut self, bus: &mut B, offset: u8) {
        self.regs.a = bus.read8(0xFF00 | offset as u16);
    }

    pub(super) fn exec_ld_hl_sp_e8(&mut self, offset: u8) {
        let (value, flags) = alu::add_sp_e8(self.regs.sp, offset);
        self.regs.set_hl(value);
        self.regs.set_flags(flags);
    }
}
