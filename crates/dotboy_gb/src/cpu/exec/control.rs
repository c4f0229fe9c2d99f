use super::super::instructions::Cond;
use super::super::{Bus, Cpu};

/// Extra cycles when a conditional branch is taken.
const JR_TAKEN: u32 = 4;
const JP_TAKEN: u32 = 4;
const CALL_TAKEN: u32 = 12;
const RET_TAKEN: u32 = 12;

#[inline]
fn taken_cost(cond: Option<Cond>, extra: u32) -> u32 {
    if cond.is_some() {
        extra
    } else {
        0
    }
}

impl Cpu {
    /// Relative jump; the offset is signed and relative to the next
    /// instruction.
    pub(super) fn exec_jr(&mut self, cond: Option<Cond>, offset: u8) -> u32 {
        if !self.condition(cond) {
            return 0;
        }
        self.regs.pc = self.regs.pc.wrapping_add(offset as i8 as i16 as u16);
        taken_cost(cond, JR_TAKEN)
    }

    pub(super) fn exec_jp(&mut self, cond: Option<Cond>, target: u16) -> u32 {
        if !self.condition(cond) {
            return 0;
        }
        self.regs.pc = target;
        taken_cost(cond, JP_TAKEN)
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>, target: u16) -> u32 {
        if !self.condition(cond) {
            return 0;
        }
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = target;
        taken_cost(cond, CALL_TAKEN)
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> u32 {
        if !self.condition(cond) {
            return 0;
        }
        self.regs.pc = self.pop16(bus);
        taken_cost(cond, RET_TAKEN)
    }

    /// RETI re-enables interrupts immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop16(bus);
        self.ime = true;
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = vector as u16;
    }
}
