use crate::cpu::InterruptFlags;

use super::super::io;
use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read_joyp(&self) -> u8 {
        // Bits 7-6 always read as 1.
        let select = self.joyp_select & 0x30;
        let mut low = 0x0F;
        // A group is selected by writing 0 to its bit; pressed keys read 0.
        if select & 0x10 == 0 {
            low &= !self.joyp_dpad;
        }
        if select & 0x20 == 0 {
            low &= !self.joyp_buttons;
        }
        0xC0 | select | (low & 0x0F)
    }

    pub(super) fn write_joyp(&mut self, value: u8) {
        self.joyp_select = value & 0x30;
    }

    pub(crate) fn joypad_set_button_bit(&mut self, bit: u8, pressed: bool) {
        Self::set_key_bit(&mut self.joyp_buttons, bit, pressed, &mut self.memory[io::IF as usize]);
    }

    pub(crate) fn joypad_set_dpad_bit(&mut self, bit: u8, pressed: bool) {
        Self::set_key_bit(&mut self.joyp_dpad, bit, pressed, &mut self.memory[io::IF as usize]);
    }

    /// A new press raises the joypad interrupt.
    fn set_key_bit(keys: &mut u8, bit: u8, pressed: bool, if_reg: &mut u8) {
        let mask = 1 << bit;
        if pressed {
            if *keys & mask == 0 {
                *if_reg |= InterruptFlags::JOYPAD.bits();
            }
            *keys |= mask;
        } else {
            *keys &= !mask;
        }
    }
}
