use dotboy_common::key::Key;

use super::bus::BOOT_ROM_SIZE;
use super::ppu::{Ppu, PpuMode};
use super::{CartridgeHeader, GameBoyBus, GameBoyConfig};
use crate::cpu::{Bus, Cpu};
use crate::error::GbError;

/// Cycles that pass per scheduler step while the CPU is halted.
const HALT_TICK_CYCLES: u32 = 4;

/// High-level Game Boy machine.
///
/// Owns the CPU, the bus and the video controller, and runs them in
/// lockstep one instruction at a time. This is the main entry point used by
/// the `GameBoyApp` wrapper.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    pub(crate) ppu: Ppu,
    config: GameBoyConfig,
    cartridge: Option<CartridgeHeader>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(GameBoyConfig::default())
    }

    pub fn with_config(config: GameBoyConfig) -> Self {
        if let Some(boot) = &config.boot_rom {
            if boot.len() != BOOT_ROM_SIZE {
                log::warn!(
                    "GB: boot ROM is {} bytes, expected {}",
                    boot.len(),
                    BOOT_ROM_SIZE
                );
            }
        }
        let cpu = if config.boot_rom.is_some() {
            Cpu::zeroed()
        } else {
            Cpu::new()
        };
        Self {
            cpu,
            bus: GameBoyBus::new(config.boot_rom.clone()),
            ppu: Ppu::new(),
            config,
            cartridge: None,
        }
    }

    /// Return to power-on state. The loaded cartridge is lost.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config.clone());
    }

    #[inline]
    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    /// Parse the cartridge header and map the ROM.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<&CartridgeHeader, GbError> {
        let header = CartridgeHeader::parse(rom)?;
        log::info!(
            "GB cartridge: title={:?} type=0x{:02X} rom=0x{:02X} ram=0x{:02X} cgb=0x{:02X}",
            header.title,
            header.cartridge_type,
            header.rom_size,
            header.ram_size,
            header.cgb_flag,
        );
        if header.cartridge_type != 0x00 {
            log::warn!(
                "GB cartridge: type 0x{:02X} needs a bank controller; running ROM-only",
                header.cartridge_type
            );
        }
        self.bus.load_rom(rom);
        let header = self.cartridge.insert(header);
        Ok(&*header)
    }

    #[inline]
    pub fn cartridge(&self) -> Option<&CartridgeHeader> {
        self.cartridge.as_ref()
    }

    /// One scheduler step; returns the cycles that elapsed.
    ///
    /// 1. A pending EI becomes effective.
    /// 2. The CPU executes one instruction, or idles for a few cycles while
    ///    halted.
    /// 3. The timer and video controller advance by those cycles; a halted
    ///    CPU wakes if IF changed.
    /// 4. A pending enabled interrupt is serviced when IME is set.
    pub fn step(&mut self) -> Result<u32, GbError> {
        self.cpu.apply_pending_ime();

        let cycles = if self.cpu.halted {
            HALT_TICK_CYCLES
        } else {
            self.cpu.step(&mut self.bus)?
        };
        self.advance_peripherals(cycles);
        if self.cpu.halted {
            self.cpu.poll_halt_wake(&mut self.bus);
        }

        let serviced = self.cpu.service_interrupt(&mut self.bus);
        if serviced > 0 {
            self.advance_peripherals(serviced);
        }
        Ok(cycles + serviced)
    }

    fn advance_peripherals(&mut self, cycles: u32) {
        self.bus.tick_timer(cycles);
        self.ppu.step(&mut self.bus, cycles);
    }

    /// Run one frame's worth of cycles and return the latest frame (RGBA,
    /// 160x144).
    ///
    /// Steps until the configured cycle budget is reached. The overshoot of
    /// the last instruction is not carried into the next frame.
    pub fn step_frame(&mut self) -> Result<&[u8], GbError> {
        let budget = self.config.cycles_per_frame();
        let mut elapsed = 0u32;
        while elapsed < budget {
            elapsed += self.step()?;
        }
        Ok(self.ppu.frame())
    }

    /// Most recently composed frame.
    #[inline]
    pub fn frame(&self) -> &[u8] {
        self.ppu.frame()
    }

    /// Copy the latest frame into a host buffer of at least `FRAME_BYTES`.
    pub fn video_frame(&self, buffer: &mut [u8]) {
        let frame = self.ppu.frame();
        let len = frame.len().min(buffer.len());
        buffer[..len].copy_from_slice(&frame[..len]);
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.ppu.frames()
    }

    #[inline]
    pub fn ppu_mode(&self) -> PpuMode {
        self.ppu.mode()
    }

    #[inline]
    pub fn scanline(&self) -> u8 {
        self.ppu.line()
    }

    /// Bytes sent through the serial port so far.
    #[inline]
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    #[inline]
    pub fn boot_rom_mapped(&self) -> bool {
        self.bus.boot_rom_mapped()
    }

    /// CPU-visible read, with the same side effects as a CPU access.
    pub fn read8(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    /// CPU-visible write, with the same side effects as a CPU access.
    pub fn write8(&mut self, addr: u16, value: u8) {
        self.bus.write8(addr, value)
    }

    /// Update joypad state from a host key event.
    ///
    /// - Z => A, X => B
    /// - A or Space => Select, S or Enter => Start
    /// - Arrow keys => D-pad
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Right => self.bus.joypad_set_dpad_bit(0, pressed),
            Key::Left => self.bus.joypad_set_dpad_bit(1, pressed),
            Key::Up => self.bus.joypad_set_dpad_bit(2, pressed),
            Key::Down => self.bus.joypad_set_dpad_bit(3, pressed),
            Key::Z => self.bus.joypad_set_button_bit(0, pressed),
            Key::X => self.bus.joypad_set_button_bit(1, pressed),
            Key::A | Key::Space => self.bus.joypad_set_button_bit(2, pressed),
            Key::S | Key::Enter => self.bus.joypad_set_button_bit(3, pressed),
            _ => {}
        }
    }
}
