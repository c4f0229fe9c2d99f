use super::Timer;

impl Timer {
    #[inline]
    pub(crate) fn read_div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    /// Any write clears the whole counter. A falling edge on the selected
    /// bit clocks TIMA.
    pub(crate) fn write_div(&mut self, if_reg: &mut u8) {
        let before = self.input();
        self.counter = 0;
        if before {
            self.increment_tima(if_reg);
        }
    }

    #[inline]
    pub(crate) fn read_tac(&self) -> u8 {
        0xF8 | (self.tac & 0x07)
    }

    pub(crate) fn write_tac(&mut self, value: u8, if_reg: &mut u8) {
        let before = self.input();
        self.tac = value & 0x07;
        if before && !self.input() {
            self.increment_tima(if_reg);
        }
    }
}
