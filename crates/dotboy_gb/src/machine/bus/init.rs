use super::super::io;
use super::GameBoyBus;

impl GameBoyBus {
    /// I/O registers as the DMG boot ROM leaves them at PC=0x0100.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        self.timer.init_dmg();
        self.serial.sb = 0x00;
        self.serial.sc = 0x7E;

        // The boot ROM leaves a VBlank request pending.
        self.memory[io::IF as usize] = 0x01;
        self.memory[io::IE as usize] = 0x00;

        // Sound registers are not emulated but their reset values are
        // visible to software.
        const SOUND: [(usize, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in SOUND {
            self.memory[addr] = value;
        }

        self.set_io(io::LCDC, 0x91);
        self.set_io(io::STAT, 0x85);
        self.set_io(io::SCY, 0x00);
        self.set_io(io::SCX, 0x00);
        self.set_io(io::LY, 0x00);
        self.set_io(io::LYC, 0x00);
        self.set_io(io::DMA, 0xFF);
        self.set_io(io::BGP, 0xFC);
        self.set_io(io::OBP0, 0xFF);
        self.set_io(io::OBP1, 0xFF);
        self.set_io(io::WY, 0x00);
        self.set_io(io::WX, 0x00);
        self.set_io(io::BOOT, 0x01);
    }

    /// Power-on state for running a boot ROM: everything zero except the
    /// bits that always read back as 1.
    pub(super) fn apply_power_on_io_state(&mut self) {
        self.timer = super::Timer::new();
        self.serial.sc = 0x7E;
        self.set_io(io::STAT, 0x80);
    }
}
