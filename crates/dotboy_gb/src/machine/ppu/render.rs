//! Whole-frame composition from VRAM, OAM and the video registers.

use super::regs::{Lcdc, SpriteAttrs};
use super::tile::{tile_addr, Tile, TILE_BYTES};
use super::PALETTE;
use crate::machine::io;
use crate::{BYTES_PER_PIXEL, SCREEN_HEIGHT, SCREEN_WIDTH};

const MAP_TILES: usize = 32;
/// Side of the background and window images.
const MAP_PIXELS: usize = MAP_TILES * 8;
const MAP_LOW: usize = 0x9800;
const MAP_HIGH: usize = 0x9C00;
const OAM_START: usize = 0xFE00;
const OAM_ENTRIES: usize = 40;
const WINDOW_X_OFFSET: isize = 7;

/// One OAM entry with screen-relative coordinates.
#[derive(Clone, Copy, Debug)]
struct Sprite {
    y: isize,
    x: isize,
    tile: u8,
    attrs: SpriteAttrs,
}

impl Sprite {
    fn from_oam(entry: &[u8]) -> Sprite {
        Sprite {
            y: entry[0] as isize - 16,
            x: entry[1] as isize - 8,
            tile: entry[2],
            attrs: SpriteAttrs::from_bits_retain(entry[3]),
        }
    }
}

#[inline]
fn reg(memory: &[u8], addr: u16) -> u8 {
    memory[addr as usize]
}

fn decode_tile(memory: &[u8], addr: usize) -> Tile {
    Tile::decode(&memory[addr..addr + TILE_BYTES])
}

/// Render a 32x32 tile map into a 256x256 image of color indices.
fn tile_map_image(memory: &[u8], map_base: usize, unsigned: bool) -> Vec<u8> {
    let mut image = vec![0u8; MAP_PIXELS * MAP_PIXELS];
    for ty in 0..MAP_TILES {
        for tx in 0..MAP_TILES {
            let index = memory[map_base + ty * MAP_TILES + tx];
            let tile = decode_tile(memory, tile_addr(index, unsigned));
            for py in 0..8 {
                let row = (ty * 8 + py) * MAP_PIXELS + tx * 8;
                for px in 0..8 {
                    image[row + px] = tile.pixel(px, py);
                }
            }
        }
    }
    image
}

/// Compose the visible frame into `frame` as RGBA.
///
/// Background through the SCX/SCY viewport (wrapping at 256), then the
/// window at (WX-7, WY), then the 40 sprites in table order with color 0
/// transparent.
pub(super) fn compose_frame(memory: &[u8], frame: &mut [u8]) {
    let lcdc = Lcdc::from_bits_retain(reg(memory, io::LCDC));
    let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT];

    if lcdc.contains(Lcdc::BG_ENABLE) {
        let unsigned = lcdc.contains(Lcdc::TILE_DATA_UNSIGNED);
        draw_background(memory, lcdc, unsigned, &mut screen);
        if lcdc.contains(Lcdc::WINDOW_ENABLE) {
            draw_window(memory, lcdc, unsigned, &mut screen);
        }
    }
    if lcdc.contains(Lcdc::OBJ_ENABLE) {
        draw_sprites(memory, lcdc.contains(Lcdc::OBJ_TALL), &mut screen);
    }

    for (px, &index) in frame
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(screen.iter())
    {
        px.copy_from_slice(&PALETTE[index as usize].to_bytes());
    }
}

fn draw_background(memory: &[u8], lcdc: Lcdc, unsigned: bool, screen: &mut [u8]) {
    let map = if lcdc.contains(Lcdc::BG_MAP_HIGH) {
        MAP_HIGH
    } else {
        MAP_LOW
    };
    let image = tile_map_image(memory, map, unsigned);
    let scx = reg(memory, io::SCX) as usize;
    let scy = reg(memory, io::SCY) as usize;

    for y in 0..SCREEN_HEIGHT {
        let src_row = ((y + scy) % MAP_PIXELS) * MAP_PIXELS;
        for x in 0..SCREEN_WIDTH {
            screen[y * SCREEN_WIDTH + x] = image[src_row + (x + scx) % MAP_PIXELS];
        }
    }
}

fn draw_window(memory: &[u8], lcdc: Lcdc, unsigned: bool, screen: &mut [u8]) {
    let map = if lcdc.contains(Lcdc::WINDOW_MAP_HIGH) {
        MAP_HIGH
    } else {
        MAP_LOW
    };
    let wx = reg(memory, io::WX) as isize - WINDOW_X_OFFSET;
    let wy = reg(memory, io::WY) as isize;
    if wx >= SCREEN_WIDTH as isize || wy >= SCREEN_HEIGHT as isize {
        return;
    }
    let image = tile_map_image(memory, map, unsigned);

    for y in wy.max(0) as usize..SCREEN_HEIGHT {
        let src_row = (y as isize - wy) as usize * MAP_PIXELS;
        for x in wx.max(0) as usize..SCREEN_WIDTH {
            let src_x = (x as isize - wx) as usize;
            screen[y * SCREEN_WIDTH + x] = image[src_row + src_x];
        }
    }
}

fn draw_sprites(memory: &[u8], tall: bool, screen: &mut [u8]) {
    let height = if tall { 16 } else { 8 };
    let oam = &memory[OAM_START..OAM_START + OAM_ENTRIES * 4];

    for entry in oam.chunks_exact(4) {
        let sprite = Sprite::from_oam(entry);
        if sprite.y <= -(height as isize)
            || sprite.y >= SCREEN_HEIGHT as isize
            || sprite.x <= -8
            || sprite.x >= SCREEN_WIDTH as isize
        {
            continue;
        }

        // 8x16 sprites ignore the low bit of the tile index.
        let first = if tall { sprite.tile & 0xFE } else { sprite.tile };
        let tiles = [
            decode_tile(memory, tile_addr(first, true)),
            decode_tile(memory, tile_addr(first.wrapping_add(1), true)),
        ];
        let x_flip = sprite.attrs.contains(SpriteAttrs::X_FLIP);
        let y_flip = sprite.attrs.contains(SpriteAttrs::Y_FLIP);

        for row in 0..height {
            let sy = sprite.y + row as isize;
            if !(0..SCREEN_HEIGHT as isize).contains(&sy) {
                continue;
            }
            let src_row = if y_flip { height - 1 - row } else { row };
            let tile = &tiles[src_row / 8];

            for col in 0..8 {
                let sx = sprite.x + col as isize;
                if !(0..SCREEN_WIDTH as isize).contains(&sx) {
                    continue;
                }
                let src_col = if x_flip { 7 - col } else { col };
                let color = tile.pixel(src_col, src_row % 8);
                if color == 0 {
                    continue;
                }
                screen[sy as usize * SCREEN_WIDTH + sx as usize] = color;
            }
        }
    }
}
