//! Moves bytes and addresses on and off the wire.
//!
//! The command layer only ever talks to a [`Transport`], so the way bits are shifted is
//! picked when the driver is built:
//! * [`BitBang`] toggles clock and data GPIOs in software
//! * [`Controller`] drives a hardware shift register through its ready flags and data registers
//! * [`SpiBusTransport`] delegates to any [`embedded_hal::spi::SpiBus`]
//!
//! Chip select is not part of the transport, every method assumes the caller already
//! pulled it low.

mod bitbang;
mod controller;
mod spi;

pub use bitbang::BitBang;
pub use controller::{Controller, ShiftRegister, DEFAULT_POLL_BUDGET};
pub use spi::SpiBusTransport;

use crate::error::Error;

/// Byte level access to the serial lines of the EEPROM
pub trait Transport {
    /// Error of the underlying bus peripheral
    type Error;

    /// Put the lines in their idle state. Called once from [`crate::blocking::Eeprom::init`]
    fn init(&mut self) -> Result<(), Error<Self::Error>> {
        Ok(())
    }

    /// Shift one byte out, most significant bit first
    fn send_byte(&mut self, value: u8) -> Result<(), Error<Self::Error>>;

    /// Shift a 16 bit value out as two bytes, high byte first
    fn send_word(&mut self, value: u16) -> Result<(), Error<Self::Error>> {
        let [high, low] = value.to_be_bytes();
        self.send_byte(high)?;
        self.send_byte(low)
    }

    /// Shift one byte in, most significant bit first
    fn receive_byte(&mut self) -> Result<u8, Error<Self::Error>>;

    /// Shift a run of bytes out back to back
    fn send_bytes(&mut self, data: &[u8]) -> Result<(), Error<Self::Error>> {
        data.iter().try_for_each(|&b| self.send_byte(b))
    }

    /// Fill `buff` with bytes shifted in back to back
    fn receive_bytes(&mut self, buff: &mut [u8]) -> Result<(), Error<Self::Error>> {
        for b in buff.iter_mut() {
            *b = self.receive_byte()?;
        }
        Ok(())
    }

    /// Block until every queued bit is on the wire
    fn flush(&mut self) -> Result<(), Error<Self::Error>> {
        Ok(())
    }
}
