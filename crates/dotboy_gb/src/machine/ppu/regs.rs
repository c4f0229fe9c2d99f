use bitflags::bitflags;

bitflags! {
    /// LCD control (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        /// Background and window drawn; color 0 everywhere when clear.
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        /// 8x16 sprites.
        const OBJ_TALL = 0x04;
        /// Background map at 0x9C00 instead of 0x9800.
        const BG_MAP_HIGH = 0x08;
        /// Unsigned tile data at 0x8000 instead of signed around 0x9000.
        const TILE_DATA_UNSIGNED = 0x10;
        const WINDOW_ENABLE = 0x20;
        /// Window map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP_HIGH = 0x40;
        const LCD_ENABLE = 0x80;
    }
}

bitflags! {
    /// LCD status (0xFF41).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Stat: u8 {
        const MODE = 0x03;
        const COINCIDENCE = 0x04;
        const HBLANK_INT = 0x08;
        const VBLANK_INT = 0x10;
        const OAM_INT = 0x20;
        const LYC_INT = 0x40;
        const UNUSED = 0x80;
    }
}

bitflags! {
    /// Sprite attribute byte. Palette and priority bits are not applied.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpriteAttrs: u8 {
        const X_FLIP = 0x20;
        const Y_FLIP = 0x40;
    }
}
