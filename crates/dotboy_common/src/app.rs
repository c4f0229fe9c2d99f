use crate::key::Key;

/// A machine that a host drives one frame at a time.
///
/// `update` fills `screen` with `width() * height()` RGBA pixels.
pub trait App {
    fn init(&mut self);
    fn update(&mut self, screen: &mut [u8]) -> anyhow::Result<()>;
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn title(&self) -> String;

    /// Size in bytes of the RGBA buffer `update` expects.
    fn frame_len(&self) -> usize {
        self.width() as usize * self.height() as usize * 4
    }
}
