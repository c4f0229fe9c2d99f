use super::super::interrupts::IF_ADDR;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        self.halted = true;
        self.halt_if = bus.read8(IF_ADDR);
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_pending = false;
    }

    /// Takes effect after the next instruction.
    pub(super) fn exec_ei(&mut self) {
        self.ime_pending = true;
    }
}
