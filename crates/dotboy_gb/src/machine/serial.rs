/// Serial port reduced to SB/SC capture.
///
/// Starting a transfer with the internal clock (SC bits 7 and 0) appends SB
/// to `output` and completes immediately. Test ROMs print through this.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(super) fn write_sc(&mut self, value: u8) {
        self.sc = value;
        if (self.sc & 0x81) == 0x81 {
            log::debug!(
                "GB serial: 0x{:02X} {:?}",
                self.sb,
                char::from(self.sb)
            );
            self.output.push(self.sb);
            self.sc &= !0x80;
        }
    }

    #[inline]
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }
}
