use anyhow::Context;
use dotboy_common::app::App;
use dotboy_common::key::Key;

use crate::machine::io;
use crate::{GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Host-facing wrapper for the Game Boy machine.
///
/// Implements the shared `App` trait so a host can drive the emulator one
/// frame per `update`.
#[derive(Default)]
pub struct GameBoyApp {
    should_exit: bool,
    pub gb: GameBoy,
    frame_counter: u64,
    last_pc: u16,
    pc_stagnant_frames: u32,
    last_lcdc: u8,
}

impl GameBoyApp {
    pub fn with_config(config: GameBoyConfig) -> Self {
        Self {
            gb: GameBoy::with_config(config),
            ..Self::default()
        }
    }

    #[inline]
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    fn log_state(&mut self) {
        let regs = self.gb.cpu.regs;
        let lcdc = self.gb.read8(io::LCDC);
        if lcdc != self.last_lcdc {
            log::debug!("GB LCDC changed: 0x{:02X} -> 0x{:02X}", self.last_lcdc, lcdc);
            self.last_lcdc = lcdc;
        }

        if self.frame_counter == 1 || self.frame_counter % 60 == 0 {
            let if_reg = self.gb.read8(io::IF);
            let ie_reg = self.gb.read8(io::IE);
            let stat = self.gb.read8(io::STAT);
            log::info!(
                "GB: frame={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} IF=0x{:02X} IE=0x{:02X} LCDC=0x{:02X} STAT=0x{:02X} LY={} mode={:?}",
                self.frame_counter,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                self.gb.cpu.ime,
                self.gb.cpu.halted,
                if_reg,
                ie_reg,
                lcdc,
                stat,
                self.gb.scanline(),
                self.gb.ppu_mode(),
            );
        }

        if regs.pc == self.last_pc {
            self.pc_stagnant_frames = self.pc_stagnant_frames.saturating_add(1);
        } else {
            self.pc_stagnant_frames = 0;
            self.last_pc = regs.pc;
        }
        if self.pc_stagnant_frames == 600 {
            log::warn!(
                "GB: PC unchanged for ~600 frames at 0x{:04X} (halted={})",
                regs.pc,
                self.gb.cpu.halted,
            );
        }
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        log::info!("Game Boy init");
        self.last_pc = self.gb.cpu.regs.pc;
        self.last_lcdc = self.gb.read8(io::LCDC);
    }

    fn update(&mut self, screen: &mut [u8]) -> anyhow::Result<()> {
        let pc = self.gb.cpu.regs.pc;
        self.gb
            .step_frame()
            .with_context(|| format!("frame {} (started at PC=0x{:04X})", self.frame_counter + 1, pc))?;
        self.gb.video_frame(screen);
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.log_state();
        Ok(())
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        log::debug!("GB key event: {:?} pressed={}", key, is_pressed);
        if key == Key::Escape && is_pressed {
            self.should_exit = true;
            return;
        }
        self.gb.handle_key(key, is_pressed);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit after {} frames", self.frame_counter);
        self.should_exit = true;
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn title(&self) -> String {
        match self.gb.cartridge() {
            Some(header) if !header.title.is_empty() => format!("dotboy - {}", header.title),
            _ => "dotboy".to_string(),
        }
    }
}
