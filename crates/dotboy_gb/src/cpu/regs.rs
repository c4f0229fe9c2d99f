use bitflags::bitflags;

/// Registers for the Game Boy CPU (LR35902).
///
/// 8-bit registers are stored individually; the 16-bit pairs are computed
/// views over them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

bitflags! {
    /// Flag bits in the F register. Bits 0-3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const Z = 0b1000_0000;
        const N = 0b0100_0000;
        const H = 0b0010_0000;
        const C = 0b0001_0000;
    }
}

impl Flags {
    /// Z set exactly when `value` is zero.
    #[inline]
    pub(crate) fn zero(value: u8) -> Flags {
        if value == 0 {
            Flags::Z
        } else {
            Flags::empty()
        }
    }
}

impl Registers {
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.f)
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.f = flags.bits();
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }
}
