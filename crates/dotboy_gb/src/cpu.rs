mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
pub mod instructions;
mod interrupts;
mod regs;

pub use bus::Bus;
pub use instructions::{Instruction, Op};
pub use interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR, INTERRUPT_CYCLES};
pub use regs::{Flags, Registers};

use crate::error::GbError;

/// Game Boy CPU core.
///
/// Instructions are fetched through a static descriptor table (see
/// [`instructions`]) and executed one at a time by [`Cpu::step`]. The frame
/// scheduler in `machine` decides when to step, when to idle while halted,
/// and when to service interrupts.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Master interrupt enable.
    pub ime: bool,
    pub halted: bool,
    /// Set by EI; becomes `ime` at the start of the next step.
    ime_pending: bool,
    /// IF value latched when HALT executed.
    halt_if: u8,
}

impl Cpu {
    /// Look up the descriptor for the instruction at PC.
    ///
    /// The CB prefix is resolved here: the returned descriptor is the
    /// extended one, with the sub-opcode counted as its operand byte.
    pub fn decode<B: Bus>(&self, bus: &mut B) -> Result<&'static Instruction, GbError> {
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        if opcode == instructions::PREFIX_CB {
            let sub = bus.read8(pc.wrapping_add(1));
            return Ok(instructions::cb_instruction(sub));
        }
        instructions::instruction(opcode).ok_or_else(|| {
            log::error!(
                "GB CPU: unimplemented opcode 0x{:02X} at PC=0x{:04X} (SP=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X})",
                opcode,
                pc,
                self.regs.sp,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
            );
            GbError::UnimplementedOpcode { opcode, pc }
        })
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// Returns the cycles consumed: the descriptor's base cost plus any
    /// extra cost of a taken conditional branch.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, GbError> {
        let instr = self.decode(bus)?;
        if log::log_enabled!(log::Level::Trace) {
            let prefix = if instr.prefixed { "CB " } else { "" };
            log::trace!(
                "GB CPU: 0x{:04X} [{}{:02X}] {}",
                self.regs.pc,
                prefix,
                instr.opcode,
                instr.mnemonic
            );
        }
        let extra = self.execute(bus, instr);
        Ok(instr.cycles + extra)
    }

    /// Promote a pending EI to an active master enable.
    #[inline]
    pub fn apply_pending_ime(&mut self) {
        if self.ime_pending {
            self.ime_pending = false;
            self.ime = true;
        }
    }

    #[inline]
    pub fn ime_pending(&self) -> bool {
        self.ime_pending
    }

    /// Leave HALT once the interrupt request register differs from the value
    /// seen when HALT executed.
    pub fn poll_halt_wake<B: Bus>(&mut self, bus: &mut B) -> bool {
        if self.halted && bus.read8(IF_ADDR) != self.halt_if {
            self.halted = false;
            log::trace!("GB CPU: woke from HALT at PC=0x{:04X}", self.regs.pc);
        }
        !self.halted
    }
}
