use core::convert::Infallible;

use bit::BitIndex;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use super::Transport;
use crate::error::Error;

/// Software SPI in mode 0 over three GPIOs.
///
/// Data out is set while the clock is low, the device latches it on the rising edge.
/// Data in is sampled while the clock is high.
pub struct BitBang<SCK, MOSI, MISO> {
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
}

impl<SCK, MOSI, MISO> BitBang<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    /// The pins must already be configured, `sck` and `mosi` as outputs and `miso` as input
    pub fn new(sck: SCK, mosi: MOSI, miso: MISO) -> Self {
        Self { sck, mosi, miso }
    }

    /// Give back the pins
    pub fn release(self) -> (SCK, MOSI, MISO) {
        (self.sck, self.mosi, self.miso)
    }

    fn clock_high(&mut self) -> Result<(), Error<Infallible>> {
        self.sck.set_high().map_err(Error::pin)
    }

    fn clock_low(&mut self) -> Result<(), Error<Infallible>> {
        self.sck.set_low().map_err(Error::pin)
    }
}

impl<SCK, MOSI, MISO> Transport for BitBang<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Error<Infallible>> {
        self.clock_low()
    }

    fn send_byte(&mut self, value: u8) -> Result<(), Error<Infallible>> {
        for pos in (0..8).rev() {
            self.mosi
                .set_state(PinState::from(value.bit(pos)))
                .map_err(Error::pin)?;
            self.clock_high()?;
            self.clock_low()?;
        }
        Ok(())
    }

    fn receive_byte(&mut self) -> Result<u8, Error<Infallible>> {
        let mut value = 0u8;
        for pos in (0..8).rev() {
            self.clock_high()?;
            let level = self.miso.is_high().map_err(Error::pin)?;
            value.set_bit(pos, level);
            self.clock_low()?;
        }
        Ok(value)
    }
}
