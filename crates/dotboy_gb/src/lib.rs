pub mod app;
pub mod cpu;
mod error;
pub mod machine;

pub use app::GameBoyApp;
pub use error::GbError;
pub use machine::{CartridgeHeader, GameBoy, GameBoyConfig};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Bytes per pixel in frame buffers produced by the core (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;
/// Size of one RGBA frame.
pub const FRAME_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL;
