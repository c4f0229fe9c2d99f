/// One 8x8 tile as 2-bit color indices.
///
/// Rows are stored as two bytes: the first holds bit 0 of each pixel, the
/// second bit 1, with the leftmost pixel in bit 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Tile {
    pixels: [[u8; 8]; 8],
}

pub(super) const TILE_BYTES: usize = 16;

impl Tile {
    pub(super) fn decode(bytes: &[u8]) -> Tile {
        let mut pixels = [[0u8; 8]; 8];
        for (y, row) in pixels.iter_mut().enumerate() {
            let low = bytes[y * 2];
            let high = bytes[y * 2 + 1];
            for (x, px) in row.iter_mut().enumerate() {
                let bit = 7 - x;
                *px = ((low >> bit) & 1) + ((high >> bit) & 1) * 2;
            }
        }
        Tile { pixels }
    }

    #[inline]
    pub(super) fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y][x]
    }
}

/// Address of tile `index`.
///
/// Unsigned mode counts up from 0x8000. Signed mode treats the index as
/// -128..=127 around 0x9000, so 0x80..=0xFF land at 0x8800..=0x8FF0.
pub(super) fn tile_addr(index: u8, unsigned: bool) -> usize {
    if unsigned {
        0x8000 + index as usize * TILE_BYTES
    } else {
        (0x9000 + index as i8 as isize * TILE_BYTES as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_byte_of_a_row_is_the_low_plane() {
        let mut bytes = [0u8; TILE_BYTES];
        bytes[0] = 0b1000_0001;
        bytes[1] = 0b1100_0000;
        let tile = Tile::decode(&bytes);
        assert_eq!(tile.pixel(0, 0), 3);
        assert_eq!(tile.pixel(1, 0), 2);
        assert_eq!(tile.pixel(7, 0), 1);
        assert_eq!(tile.pixel(3, 0), 0);
    }

    #[test]
    fn signed_addressing_wraps_around_0x9000() {
        assert_eq!(tile_addr(0x00, false), 0x9000);
        assert_eq!(tile_addr(0x7F, false), 0x97F0);
        assert_eq!(tile_addr(0x80, false), 0x8800);
        assert_eq!(tile_addr(0xFF, false), 0x8FF0);
        assert_eq!(tile_addr(0x80, true), 0x8800);
        assert_eq!(tile_addr(0x01, true), 0x8010);
    }
}
