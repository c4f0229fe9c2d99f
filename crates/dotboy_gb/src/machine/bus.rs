use crate::cpu::{Bus, InterruptFlags};

use super::{io, serial::Serial, timer::Timer, MEMORY_SIZE};

mod dma;
mod init;
mod joypad;
mod mmio;

/// Size of the DMG boot ROM overlay.
pub(crate) const BOOT_ROM_SIZE: usize = 0x100;
/// Cartridge ROM window without a bank controller.
pub(crate) const ROM_WINDOW: usize = 0x8000;

/// The machine's address space.
///
/// Regions live in one flat 64 KiB array indexed by address; the I/O
/// registers with side effects (joypad, serial, timer, DMA, boot ROM
/// switch) are routed through `mmio`. The video controller reads and writes
/// its registers here directly.
pub(crate) struct GameBoyBus {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) serial: Serial,
    pub(super) timer: Timer,
    boot_rom: Option<Vec<u8>>,
    boot_rom_mapped: bool,
    // Selection bits as written to P1 (bits 5/4), and pressed keys with
    // bit=1 meaning pressed:
    // - joyp_buttons: bit0=A, bit1=B, bit2=Select, bit3=Start
    // - joyp_dpad:    bit0=Right, bit1=Left, bit2=Up, bit3=Down
    joyp_select: u8,
    joyp_buttons: u8,
    joyp_dpad: u8,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GameBoyBus {
    /// A bus in the post-boot state, or at power-on with the boot ROM mapped
    /// when one is given.
    pub(crate) fn new(boot_rom: Option<Vec<u8>>) -> Self {
        let mut bus = Self {
            memory: [0; MEMORY_SIZE],
            serial: Serial::default(),
            timer: Timer::new(),
            boot_rom_mapped: boot_rom.is_some(),
            boot_rom,
            joyp_select: 0x30,
            joyp_buttons: 0x00,
            joyp_dpad: 0x00,
        };
        if bus.boot_rom_mapped {
            bus.apply_power_on_io_state();
        } else {
            bus.apply_dmg_initial_io_state();
        }
        bus
    }

    /// Map the first 32 KiB of `rom` at 0x0000. Longer images are truncated.
    pub(crate) fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(ROM_WINDOW);
        self.memory[..ROM_WINDOW].fill(0xFF);
        self.memory[..len].copy_from_slice(&rom[..len]);
        if rom.len() > ROM_WINDOW {
            log::warn!(
                "GB bus: ROM is {} bytes; only the first {} are mapped (no bank controller)",
                rom.len(),
                ROM_WINDOW
            );
        }
    }

    #[inline]
    pub(crate) fn boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }

    #[inline]
    pub(crate) fn io(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub(crate) fn set_io(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    pub(crate) fn request_interrupt(&mut self, flags: InterruptFlags) {
        self.memory[io::IF as usize] |= flags.bits();
    }

    /// Advance the timer, raising its interrupt in IF on overflow.
    pub(crate) fn tick_timer(&mut self, cycles: u32) {
        let if_reg = &mut self.memory[io::IF as usize];
        self.timer.tick(cycles, if_reg);
    }

    #[inline]
    pub(crate) fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }
}

impl Bus for GameBoyBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}
