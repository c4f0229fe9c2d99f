//! LCD controller.
//!
//! A four-mode state machine advanced by CPU cycles. Mode, scanline and the
//! LY==LYC coincidence are mirrored into STAT/LY so the CPU sees them, and a
//! full frame is composed once per frame on entry to VBlank.

mod regs;
mod render;
mod tile;

use dotboy_common::Color;

pub use regs::{Lcdc, Stat};

use super::{io, GameBoyBus};
use crate::cpu::InterruptFlags;
use crate::FRAME_BYTES;

/// RGBA shades for color indices 0..=3, lightest first.
pub const PALETTE: [Color; 4] = [
    Color::new_rgb(205, 255, 205),
    Color::new_rgb(120, 170, 120),
    Color::new_rgb(35, 85, 35),
    Color::new_rgb(0, 0, 0),
];

/// Last visible scanline.
const LAST_VISIBLE_LINE: u8 = 143;
/// Last scanline of VBlank; the next one wraps to 0.
const LAST_LINE: u8 = 153;
/// STAT value while the display is off.
const STAT_LCD_OFF: u8 = 0x80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    VramRead = 3,
}

impl PpuMode {
    /// Cycles spent in the mode before it ends. In VBlank this is per line.
    pub const fn cycles(self) -> u32 {
        match self {
            PpuMode::OamScan => 80,
            PpuMode::VramRead => 172,
            PpuMode::HBlank => 204,
            PpuMode::VBlank => 456,
        }
    }
}

pub(crate) struct Ppu {
    mode: PpuMode,
    mode_clock: u32,
    line: u8,
    lcd_on: bool,
    frame: Vec<u8>,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub(crate) fn new() -> Self {
        let mut ppu = Self {
            mode: PpuMode::OamScan,
            mode_clock: 0,
            line: 0,
            lcd_on: true,
            frame: vec![0; FRAME_BYTES],
            frames: 0,
        };
        ppu.blank_frame();
        ppu
    }

    #[inline]
    pub(crate) fn mode(&self) -> PpuMode {
        self.mode
    }

    #[inline]
    pub(crate) fn line(&self) -> u8 {
        self.line
    }

    /// Most recently composed frame (RGBA, 160x144).
    #[inline]
    pub(crate) fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Frames composed since power-on.
    #[inline]
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    fn blank_frame(&mut self) {
        let shade = PALETTE[0].to_bytes();
        for px in self.frame.chunks_exact_mut(shade.len()) {
            px.copy_from_slice(&shade);
        }
    }

    /// Advance by `cycles` CPU cycles.
    ///
    /// At most one mode transition happens per call, and the mode counter
    /// restarts from zero on every transition.
    pub(crate) fn step(&mut self, bus: &mut GameBoyBus, cycles: u32) {
        let lcdc = Lcdc::from_bits_retain(bus.io(io::LCDC));
        if !lcdc.contains(Lcdc::LCD_ENABLE) {
            self.disable(bus);
            return;
        }
        if !self.lcd_on {
            log::debug!("GB PPU: LCD enabled");
            self.lcd_on = true;
        }

        self.mode_clock += cycles;
        let threshold = self.mode.cycles();
        if self.mode_clock >= threshold {
            self.mode_clock = 0;
            self.advance(bus);
        }
        self.update_stat(bus);
    }

    fn disable(&mut self, bus: &mut GameBoyBus) {
        if self.lcd_on {
            log::debug!("GB PPU: LCD disabled at LY={}", self.line);
            self.lcd_on = false;
            self.blank_frame();
        }
        self.mode = PpuMode::OamScan;
        self.mode_clock = 0;
        self.line = 0;
        bus.set_io(io::LY, 0);
        bus.set_io(io::STAT, STAT_LCD_OFF);
    }

    /// End the current mode and enter the next one.
    fn advance(&mut self, bus: &mut GameBoyBus) {
        match self.mode {
            PpuMode::OamScan => self.enter(bus, PpuMode::VramRead),
            PpuMode::VramRead => self.enter(bus, PpuMode::HBlank),
            PpuMode::HBlank => {
                self.line += 1;
                let next = if self.line > LAST_VISIBLE_LINE {
                    PpuMode::VBlank
                } else {
                    PpuMode::OamScan
                };
                self.enter(bus, next);
            }
            PpuMode::VBlank => {
                if self.line == LAST_LINE {
                    self.line = 0;
                    self.enter(bus, PpuMode::OamScan);
                } else {
                    self.line += 1;
                }
            }
        }
        bus.set_io(io::LY, self.line);
    }

    fn enter(&mut self, bus: &mut GameBoyBus, mode: PpuMode) {
        self.mode = mode;
        let stat = Stat::from_bits_retain(bus.io(io::STAT));
        let stat_source = match mode {
            PpuMode::OamScan => Stat::OAM_INT,
            PpuMode::HBlank => Stat::HBLANK_INT,
            PpuMode::VBlank => Stat::VBLANK_INT,
            PpuMode::VramRead => Stat::empty(),
        };
        if !stat_source.is_empty() && stat.contains(stat_source) {
            bus.request_interrupt(InterruptFlags::LCD_STAT);
        }

        if mode == PpuMode::VBlank {
            bus.request_interrupt(InterruptFlags::VBLANK);
            render::compose_frame(&bus.memory, &mut self.frame);
            self.frames += 1;
            log::trace!("GB PPU: VBlank, frame {}", self.frames);
        }
    }

    /// Mirror the mode into STAT and compare LY with LYC. Every step that
    /// finds them equal requests the LCD-status interrupt when enabled.
    fn update_stat(&self, bus: &mut GameBoyBus) {
        let mut stat = Stat::from_bits_retain(bus.io(io::STAT));
        stat.remove(Stat::MODE);
        stat.insert(Stat::from_bits_retain(self.mode as u8) | Stat::UNUSED);

        let coincidence = bus.io(io::LY) == bus.io(io::LYC);
        stat.set(Stat::COINCIDENCE, coincidence);
        if coincidence && stat.contains(Stat::LYC_INT) {
            bus.request_interrupt(InterruptFlags::LCD_STAT);
        }

        bus.set_io(io::STAT, stat.bits());
    }
}
