use bitflags::bitflags;

use super::{Bus, Cpu};

/// Interrupt request register.
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register.
pub const IE_ADDR: u16 = 0xFFFF;
/// Cost of dispatching to an interrupt vector.
pub const INTERRUPT_CYCLES: u32 = 20;

bitflags! {
    /// Bits shared by IF and IE.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Interrupt sources in service priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << self.index())
    }

    /// 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        0x40 + 8 * self.index() as u16
    }

    /// Highest-priority source present in `flags`.
    pub fn highest(flags: InterruptFlags) -> Option<Interrupt> {
        Self::ALL.into_iter().find(|i| flags.contains(i.flag()))
    }
}

impl Cpu {
    /// Requested and enabled interrupt of highest priority, ignoring IME.
    pub fn pending_interrupt<B: Bus>(&self, bus: &mut B) -> Option<Interrupt> {
        let requested = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        let enabled = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        Interrupt::highest(requested & enabled)
    }

    /// Dispatch the highest-priority pending interrupt if IME is set.
    ///
    /// Clears the request bit and IME (dropping an EI still waiting to take
    /// effect), pushes PC and jumps to the vector.
    /// Returns the cycles spent, or 0 if nothing was serviced.
    pub fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime {
            return 0;
        }
        let Some(interrupt) = self.pending_interrupt(bus) else {
            return 0;
        };

        let requested = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, requested & !interrupt.flag().bits());
        self.ime = false;
        self.ime_pending = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push16(bus, pc);
        self.regs.pc = interrupt.vector();

        log::debug!(
            "GB CPU interrupt: {:?} idx={} vector=0x{:04X} from PC=0x{:04X} SP=0x{:04X}",
            interrupt,
            interrupt.index(),
            interrupt.vector(),
            pc,
            self.regs.sp,
        );
        INTERRUPT_CYCLES
    }
}
