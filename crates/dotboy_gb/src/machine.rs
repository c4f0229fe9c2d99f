mod bus;
mod cartridge;
mod config;
mod gameboy;
pub mod io;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::CartridgeHeader;
pub use config::GameBoyConfig;
pub use gameboy::GameBoy;
pub use ppu::{Lcdc, PpuMode, Stat, PALETTE};

/// CPU clock of the DMG in cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// Frames emulated per second of machine time.
pub const FRAME_RATE_HZ: u32 = 60;
/// Cycle budget of one `step_frame` call at the default clock and rate.
pub const CYCLES_PER_FRAME: u32 = CPU_CLOCK_HZ / FRAME_RATE_HZ;

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

#[cfg(test)]
mod tests;
