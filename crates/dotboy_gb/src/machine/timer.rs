//! Divider and programmable timer.
//!
//! A 16-bit counter advances once per CPU cycle; DIV exposes its upper byte.
//! TIMA counts falling edges of the counter bit selected by TAC while the
//! timer is enabled.
mod io;

use crate::cpu::InterruptFlags;

pub(crate) struct Timer {
    /// Hidden system counter; DIV is bits 15:8.
    pub(super) counter: u16,
    pub(super) tima: u8,
    pub(super) tma: u8,
    /// TAC, lower 3 bits.
    pub(super) tac: u8,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
        }
    }

    /// DMG state at PC=0x0100: DIV reads 0xAB.
    pub(super) fn init_dmg(&mut self) {
        self.counter = 0xABCC;
        self.tima = 0;
        self.tma = 0;
        self.tac = 0x00;
    }

    #[inline]
    pub(super) fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// TAC[1:0] → counter bit: 00 → 9, 01 → 3, 10 → 5, 11 → 7.
    #[inline]
    fn selected_bit(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// The signal TIMA is clocked from.
    #[inline]
    fn input(&self) -> bool {
        self.enabled() && self.counter & self.selected_bit() != 0
    }

    fn increment_tima(&mut self, if_reg: &mut u8) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            *if_reg |= InterruptFlags::TIMER.bits();
        } else {
            self.tima = next;
        }
    }

    /// Advance by `cycles` CPU cycles, raising the timer interrupt in
    /// `if_reg` on TIMA overflow.
    pub(super) fn tick(&mut self, cycles: u32, if_reg: &mut u8) {
        for _ in 0..cycles {
            let before = self.input();
            self.counter = self.counter.wrapping_add(1);
            if before && !self.input() {
                self.increment_tima(if_reg);
            }
        }
    }
}
