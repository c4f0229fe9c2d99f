use crate::error::GbError;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0143;
const CGB_FLAG: usize = 0x0143;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
const HEADER_CHECKSUM: usize = 0x014D;
/// Images shorter than this cannot hold a complete header.
pub(crate) const HEADER_END: usize = 0x0150;

/// Fields read from the cartridge header at 0x0134..0x0150.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    /// Title with trailing NULs removed.
    pub title: String,
    pub cgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size: u8,
    pub ram_size: u8,
    pub header_checksum: u8,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, GbError> {
        if rom.len() < HEADER_END {
            return Err(GbError::MalformedCartridge {
                len: rom.len(),
                needed: HEADER_END,
            });
        }

        let raw_title = &rom[TITLE_START..TITLE_END];
        let trimmed = match raw_title.iter().rposition(|&b| b != 0) {
            Some(last) => &raw_title[..=last],
            None => &[],
        };
        let title = String::from_utf8_lossy(trimmed).into_owned();

        let header = Self {
            title,
            cgb_flag: rom[CGB_FLAG],
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size: rom[ROM_SIZE],
            ram_size: rom[RAM_SIZE],
            header_checksum: rom[HEADER_CHECKSUM],
        };

        let computed = computed_header_checksum(rom);
        if computed != header.header_checksum {
            log::warn!(
                "GB cartridge: header checksum mismatch (stored 0x{:02X}, computed 0x{:02X})",
                header.header_checksum,
                computed
            );
        }
        Ok(header)
    }

    /// ROM size in bytes implied by the size code (32 KiB << code).
    pub fn rom_bytes(&self) -> Option<usize> {
        (self.rom_size <= 8).then(|| 0x8000usize << self.rom_size)
    }
}

/// Checksum over 0x0134..=0x014C as computed by the boot ROM.
fn computed_header_checksum(rom: &[u8]) -> u8 {
    rom[TITLE_START..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_image_is_malformed() {
        let err = CartridgeHeader::parse(&[0u8; 0x100]).unwrap_err();
        assert_eq!(
            err,
            GbError::MalformedCartridge {
                len: 0x100,
                needed: HEADER_END
            }
        );
    }

    #[test]
    fn checksum_matches_boot_rom_formula() {
        let mut rom = vec![0u8; HEADER_END];
        rom[TITLE_START..TITLE_START + 4].copy_from_slice(b"TEST");
        // 0x0134..=0x014C sums: 'T'+'E'+'S'+'T' = 0x140, plus 25 * 1.
        let expected = 0u8.wrapping_sub(0x40).wrapping_sub(25);
        assert_eq!(computed_header_checksum(&rom), expected);
    }

    #[test]
    fn rom_size_code_maps_to_bytes() {
        let mut rom = vec![0u8; HEADER_END];
        rom[ROM_SIZE] = 0x02;
        let header = CartridgeHeader::parse(&rom).unwrap();
        assert_eq!(header.rom_bytes(), Some(128 * 1024));
    }
}
