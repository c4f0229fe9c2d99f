use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotboy::RunInfo;

const BOOT_ROM_ENV: &str = "DOTBOY_BOOT_ROM";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        bail!("usage: dotboy <rom.gb> [frames] [out.rgba]");
    };
    let frames = match args.next() {
        Some(n) => n
            .parse::<u32>()
            .with_context(|| format!("invalid frame count '{}'", n))?,
        None => 60,
    };
    let output = args.next().map(PathBuf::from);

    log::info!("Playing ROM path: '{}'", rom_path);
    let rom = std::fs::read(&rom_path).with_context(|| format!("failed to read ROM '{}'", rom_path))?;

    let boot_rom = match std::env::var_os(BOOT_ROM_ENV) {
        Some(path) => {
            let data = std::fs::read(&path)
                .with_context(|| format!("failed to read boot ROM {:?}", path))?;
            log::info!("Using boot ROM {:?}", path);
            Some(data)
        }
        None => None,
    };

    let info = RunInfo::builder()
        .frames(frames)
        .output(output)
        .boot_rom(boot_rom)
        .build();
    dotboy::run(info, &rom)?;
    Ok(())
}
