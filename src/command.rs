/// Instruction set of the 25xx serial EEPROMs
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Set the write enable latch
    WriteEnable = 0x06,
    /// Write data to memory, starting at the selected address
    Write = 0x02,
    /// Read data from memory, starting at the selected address
    Read = 0x03,
}

/// Byte shifted out while clocking data in from the device
pub const DUMMY: u8 = 0xFF;

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}
