use std::path::PathBuf;

use anyhow::{Context, Result};
use dotboy_common::app::App;
use dotboy_gb::{GameBoyApp, GameBoyConfig};
use typed_builder::TypedBuilder;

/// What `run` should do with a ROM.
#[derive(Debug, TypedBuilder)]
pub struct RunInfo {
    /// Frames to emulate before stopping.
    #[builder(default = 60)]
    pub frames: u32,
    /// Where to write the last frame as raw RGBA, if anywhere.
    #[builder(default)]
    pub output: Option<PathBuf>,
    #[builder(default)]
    pub boot_rom: Option<Vec<u8>>,
}

/// Run `rom_data` headlessly and return the last frame (RGBA, 160x144).
pub fn run(info: RunInfo, rom_data: &[u8]) -> Result<Vec<u8>> {
    let config = match info.boot_rom {
        Some(boot) => GameBoyConfig::builder().boot_rom(boot).build(),
        None => GameBoyConfig::default(),
    };
    let mut app = GameBoyApp::with_config(config);
    app.gb
        .load_rom(rom_data)
        .context("failed to load cartridge")?;
    log::info!("Running '{}' for {} frames", app.title(), info.frames);

    let mut screen = vec![0u8; app.frame_len()];
    app.init();
    for _ in 0..info.frames {
        if app.should_exit() {
            break;
        }
        app.update(&mut screen)?;
    }
    app.exit();

    if let Some(path) = &info.output {
        std::fs::write(path, &screen)
            .with_context(|| format!("failed to write frame to {}", path.display()))?;
        log::info!(
            "Wrote {}x{} RGBA frame to {}",
            app.width(),
            app.height(),
            path.display()
        );
    }

    let serial = app.gb.serial_output();
    if !serial.is_empty() {
        log::info!("Serial output: {:?}", String::from_utf8_lossy(serial));
    }
    Ok(screen)
}
