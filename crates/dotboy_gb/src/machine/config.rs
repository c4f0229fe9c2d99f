use typed_builder::TypedBuilder;

use super::{CPU_CLOCK_HZ, FRAME_RATE_HZ};

/// Machine configuration.
///
/// ```
/// use dotboy_gb::GameBoyConfig;
///
/// let config = GameBoyConfig::builder().frame_rate(30).build();
/// assert_eq!(config.cycles_per_frame(), 4_194_304 / 30);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default = CPU_CLOCK_HZ)]
    pub clock_hz: u32,
    #[builder(default = FRAME_RATE_HZ)]
    pub frame_rate: u32,
    /// 256-byte boot ROM mapped at 0x0000 until 0xFF50 is written. Without
    /// one the machine starts in the post-boot state.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GameBoyConfig {
    /// Cycles run by one `step_frame`. Fractional cycles are dropped.
    pub fn cycles_per_frame(&self) -> u32 {
        self.clock_hz / self.frame_rate.max(1)
    }
}
