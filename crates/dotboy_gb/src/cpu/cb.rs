//! Extended (CB-prefixed) operations: rotates, shifts, and single-bit
//! test/reset/set on the eight 8-bit operands.

use super::alu;
use super::instructions::{RotOp, R8};
use super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_cb_rotate<B: Bus>(&mut self, bus: &mut B, op: RotOp, r: R8) {
        let value = self.read_r8(bus, r);
        let (result, flags) = alu::rotate(op, value, self.regs.flags());
        self.write_r8(bus, r, result);
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_cb_bit<B: Bus>(&mut self, bus: &mut B, n: u8, r: R8) {
        let value = self.read_r8(bus, r);
        let flags = alu::bit(n, value, self.regs.flags());
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_cb_res<B: Bus>(&mut self, bus: &mut B, n: u8, r: R8) {
        let value = self.read_r8(bus, r);
        self.write_r8(bus, r, value & !(1 << n));
    }

    pub(super) fn exec_cb_set<B: Bus>(&mut self, bus: &mut B, n: u8, r: R8) {
        let value = self.read_r8(bus, r);
        self.write_r8(bus, r, value | (1 << n));
    }
}
