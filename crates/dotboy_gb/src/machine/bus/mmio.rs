use super::super::io;
use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read8_mmio(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom_mapped => self
                .boot_rom
                .as_ref()
                .and_then(|rom| rom.get(addr as usize).copied())
                .unwrap_or(0xFF),

            // Echo RAM: 0xE000..0xFDFF mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize],

            // Unusable.
            0xFEA0..=0xFEFF => 0xFF,

            io::P1 => self.read_joyp(),
            io::SB => self.serial.sb,
            io::SC => self.serial.read_sc(),
            io::DIV => self.timer.read_div(),
            io::TIMA => self.timer.tima,
            io::TMA => self.timer.tma,
            io::TAC => self.timer.read_tac(),
            io::IF => self.memory[addr as usize] | 0xE0,

            _ => self.memory[addr as usize],
        }
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                log::trace!(
                    "GB bus: ignored write 0x{:02X} to ROM at 0x{:04X}",
                    value,
                    addr
                );
            }

            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize] = value,

            0xFEA0..=0xFEFF => {}

            io::P1 => self.write_joyp(value),
            io::SB => self.serial.sb = value,
            io::SC => self.serial.write_sc(value),
            io::DIV => {
                let if_reg = &mut self.memory[io::IF as usize];
                self.timer.write_div(if_reg);
            }
            io::TIMA => self.timer.tima = value,
            io::TMA => self.timer.tma = value,
            io::TAC => {
                let if_reg = &mut self.memory[io::IF as usize];
                self.timer.write_tac(value, if_reg);
            }
            io::IF => self.memory[addr as usize] = value & 0x1F,

            // Read-only from the CPU; the video controller owns it.
            io::LY => {}
            // Bits 0-2 are read-only.
            io::STAT => {
                let stat = &mut self.memory[addr as usize];
                *stat = 0x80 | (value & 0x78) | (*stat & 0x07);
            }
            io::DMA => self.do_oam_dma(value),
            io::BOOT => {
                if value != 0 && self.boot_rom_mapped {
                    log::debug!("GB bus: boot ROM unmapped");
                    self.boot_rom_mapped = false;
                }
                self.memory[addr as usize] = value;
            }

            _ => self.memory[addr as usize] = value,
        }
    }
}
