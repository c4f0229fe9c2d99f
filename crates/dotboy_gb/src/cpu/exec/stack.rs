use super::super::instructions::StackR16;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, rr: StackR16) {
        let value = self.read_stack_pair(rr);
        self.push16(bus, value);
    }

    /// POP AF drops the low nibble of F.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, rr: StackR16) {
        let value = self.pop16(bus);
        self.write_stack_pair(rr, value);
    }
}
