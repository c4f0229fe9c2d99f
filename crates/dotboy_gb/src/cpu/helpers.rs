use super::instructions::{Cond, Indirect, R16, R8, StackR16};
use super::regs::Flags;
use super::{Bus, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn read_r8<B: Bus>(&mut self, bus: &mut B, r: R8) -> u8 {
        match r {
            R8::B => self.regs.b,
            R8::C => self.regs.c,
            R8::D => self.regs.d,
            R8::E => self.regs.e,
            R8::H => self.regs.h,
            R8::L => self.regs.l,
            R8::HlInd => bus.read8(self.regs.hl()),
            R8::A => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_r8<B: Bus>(&mut self, bus: &mut B, r: R8, value: u8) {
        match r {
            R8::B => self.regs.b = value,
            R8::C => self.regs.c = value,
            R8::D => self.regs.d = value,
            R8::E => self.regs.e = value,
            R8::H => self.regs.h = value,
            R8::L => self.regs.l = value,
            R8::HlInd => bus.write8(self.regs.hl(), value),
            R8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn read_r16(&self, rr: R16) -> u16 {
        match rr {
            R16::BC => self.regs.bc(),
            R16::DE => self.regs.de(),
            R16::HL => self.regs.hl(),
            R16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_r16(&mut self, rr: R16, value: u16) {
        match rr {
            R16::BC => self.regs.set_bc(value),
            R16::DE => self.regs.set_de(value),
            R16::HL => self.regs.set_hl(value),
            R16::SP => self.regs.sp = value,
        }
    }

    /// Address named by an indirect operand. `(HL+)`/`(HL-)` step HL after
    /// yielding it.
    pub(super) fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Option<Cond>) -> bool {
        let flags = self.regs.flags();
        match cond {
            None => true,
            Some(Cond::NZ) => !flags.contains(Flags::Z),
            Some(Cond::Z) => flags.contains(Flags::Z),
            Some(Cond::NC) => !flags.contains(Flags::C),
            Some(Cond::C) => flags.contains(Flags::C),
        }
    }

    /// Pre-decrement SP by one and store a byte.
    #[inline]
    pub(super) fn push8<B: Bus>(&mut self, bus: &mut B, value: u8) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, value);
    }

    /// Load a byte at SP and post-increment SP by one.
    #[inline]
    pub(super) fn pop8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        value
    }

    /// High byte first, so that memory[SP] holds the low byte afterwards.
    pub(super) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.push8(bus, hi);
        self.push8(bus, lo);
    }

    pub(super) fn pop16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pop8(bus);
        let hi = self.pop8(bus);
        u16::from_le_bytes([lo, hi])
    }

    pub(super) fn read_stack_pair(&self, rr: StackR16) -> u16 {
        match rr {
            StackR16::BC => self.regs.bc(),
            StackR16::DE => self.regs.de(),
            StackR16::HL => self.regs.hl(),
            StackR16::AF => self.regs.af(),
        }
    }

    pub(super) fn write_stack_pair(&mut self, rr: StackR16, value: u16) {
        match rr {
            StackR16::BC => self.regs.set_bc(value),
            StackR16::DE => self.regs.set_de(value),
            StackR16::HL => self.regs.set_hl(value),
            StackR16::AF => self.regs.set_af(value),
        }
    }
}
