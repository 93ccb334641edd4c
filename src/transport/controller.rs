use super::Transport;
use crate::{command::DUMMY, error::Error};

/// Default number of times a ready flag is checked before giving up
pub const DEFAULT_POLL_BUDGET: u32 = 10_000;

/// Register interface of a hardware serial controller (USCI, USART in SPI mode, ...).
///
/// Writing the transmit register starts a full duplex exchange, the received byte shows
/// up in the receive register once the exchange is done.
pub trait ShiftRegister {
    type Error;

    /// The transmit buffer can take a new byte
    fn tx_ready(&mut self) -> Result<bool, Self::Error>;

    /// Load the transmit buffer
    fn write_tx(&mut self, value: u8) -> Result<(), Self::Error>;

    /// A received byte is waiting in the receive buffer
    fn rx_ready(&mut self) -> Result<bool, Self::Error>;

    /// Take the byte out of the receive buffer
    fn read_rx(&mut self) -> Result<u8, Self::Error>;
}

/// Transport backed by a hardware shift register, with bounded polling on the ready flags
pub struct Controller<R> {
    regs: R,
    poll_budget: u32,
    // A byte from an exchange that timed out on the receive flag may still land
    late_rx: bool,
}

impl<R: ShiftRegister> Controller<R> {
    pub fn new(regs: R) -> Self {
        Self::with_poll_budget(regs, DEFAULT_POLL_BUDGET)
    }

    /// Each ready flag is checked at most `polls` times before [`Error::DeviceTimeout`]
    pub fn with_poll_budget(regs: R, polls: u32) -> Self {
        Self {
            regs,
            poll_budget: polls,
            late_rx: false,
        }
    }

    /// Give back the registers
    pub fn release(self) -> R {
        self.regs
    }

    fn wait(&mut self, flag: fn(&mut R) -> Result<bool, R::Error>) -> Result<(), Error<R::Error>> {
        for _ in 0..self.poll_budget {
            if flag(&mut self.regs).map_err(Error::Bus)? {
                return Ok(());
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("Ready flag still clear after {=u32} polls", self.poll_budget);
        Err(Error::DeviceTimeout)
    }

    /// Discard the byte of an exchange that timed out. Chip select does not clear the
    /// receive buffer, so without this every later byte would be read one exchange late.
    fn resync(&mut self) -> Result<(), Error<R::Error>> {
        if self.late_rx {
            self.wait(R::rx_ready)?;
            self.regs.read_rx().map_err(Error::Bus)?;
            self.late_rx = false;
            #[cfg(feature = "defmt")]
            defmt::debug!("Discarded late byte from a timed out exchange");
        }
        Ok(())
    }

    // The receive buffer is drained on every exchange so a later read never sees a stale byte
    fn exchange(&mut self, value: u8) -> Result<u8, Error<R::Error>> {
        self.resync()?;
        self.wait(R::tx_ready)?;
        self.regs.write_tx(value).map_err(Error::Bus)?;
        if let Err(err) = self.wait(R::rx_ready) {
            self.late_rx = true;
            return Err(err);
        }
        self.regs.read_rx().map_err(Error::Bus)
    }
}

impl<R: ShiftRegister> Transport for Controller<R> {
    type Error = R::Error;

    fn send_byte(&mut self, value: u8) -> Result<(), Error<R::Error>> {
        self.exchange(value).map(|_| ())
    }

    fn receive_byte(&mut self) -> Result<u8, Error<R::Error>> {
        self.exchange(DUMMY)
    }
}
