use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::zeroed();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// CPU with all registers cleared and PC at 0x0000, ready to run a boot
    /// ROM image.
    pub fn zeroed() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            ime_pending: false,
            halt_if: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
