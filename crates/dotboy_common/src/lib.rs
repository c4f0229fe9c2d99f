pub mod app;
pub mod key;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Byte layout used by RGBA frame buffers (`r, g, b, a`).
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn rgb_constructor_is_opaque() {
        let c = Color::new_rgb(1, 2, 3);
        assert_eq!(c.rgba(), (1, 2, 3, 0xff));
        assert_eq!(c.to_bytes(), [1, 2, 3, 0xff]);
    }
}
