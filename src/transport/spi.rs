use embedded_hal::spi::SpiBus;

use super::Transport;
use crate::{command::DUMMY, error::Error};

/// Transport over a HAL provided SPI bus. The bus must be configured for mode 0 and
/// a clock the EEPROM accepts.
pub struct SpiBusTransport<B> {
    bus: B,
}

impl<B: SpiBus> SpiBusTransport<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: SpiBus> Transport for SpiBusTransport<B> {
    type Error = B::Error;

    fn send_byte(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.bus.write(&[value]).map_err(Error::Bus)
    }

    fn receive_byte(&mut self) -> Result<u8, Error<B::Error>> {
        let mut buff = [DUMMY];
        self.bus.transfer_in_place(&mut buff).map_err(Error::Bus)?;
        Ok(buff[0])
    }

    fn send_bytes(&mut self, data: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus.write(data).map_err(Error::Bus)
    }

    fn receive_bytes(&mut self, buff: &mut [u8]) -> Result<(), Error<B::Error>> {
        buff.fill(DUMMY);
        self.bus.transfer_in_place(buff).map_err(Error::Bus)
    }

    fn flush(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.flush().map_err(Error::Bus)
    }
}
