use super::super::io;
use super::GameBoyBus;

const OAM_START: u16 = 0xFE00;
const OAM_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA: copy XX00..XX9F to FE00..FE9F. The transfer completes at
    /// once instead of over 160 machine cycles.
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        for i in 0..OAM_LEN {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.memory[(OAM_START + i) as usize] = byte;
        }
        self.memory[io::DMA as usize] = value;
    }
}
