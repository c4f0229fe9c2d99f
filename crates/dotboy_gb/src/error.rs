use thiserror::Error;

/// Fatal conditions raised by the emulation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GbError {
    /// The CPU fetched an opcode with no registered behavior.
    #[error("unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },
    /// The cartridge image is too short to hold its header.
    #[error("malformed cartridge: image is {len} bytes, header needs {needed}")]
    MalformedCartridge { len: usize, needed: usize },
}
