#![cfg_attr(not(test), no_std)]
//! This is a platform agnostic library for the Microchip 25xx SPI serial EEPROM series using [embedded-hal](https://github.com/rust-embedded/embedded-hal).
//!
//! Chips with 16 bit addressing are supported:
//! * [25LC080/25LC160](https://ww1.microchip.com/downloads/en/DeviceDoc/21807E.pdf)
//! * [25LC320A](https://ww1.microchip.com/downloads/en/DeviceDoc/20001831E.pdf)
//! * [25LC640A](https://ww1.microchip.com/downloads/en/DeviceDoc/21830F.pdf)
//! * [25LC128](https://ww1.microchip.com/downloads/en/DeviceDoc/21831e.pdf)
//! * [25LC256](https://ww1.microchip.com/downloads/en/DeviceDoc/20005715A.pdf)
//! * [25LC512](https://ww1.microchip.com/downloads/en/DeviceDoc/22065C.pdf)
//!
//! The bits can be moved by toggling GPIOs ([`transport::BitBang`]), by a hardware shift
//! register polled through its flags ([`transport::Controller`]) or by any
//! [`embedded_hal::spi::SpiBus`] ([`transport::SpiBusTransport`]). Chip select is always a
//! separate [`embedded_hal::digital::OutputPin`] owned by the driver.

pub mod blocking;
pub mod clock;
mod command;
pub mod error;
pub mod shared;
pub mod transport;


use crate::error::Error;

/// Longest run of bytes a single array read or write carries
pub const MAX_ARRAY_LEN: usize = 255;

/// Default write-cycle time in microseconds (T_WC of the 25LC320A)
pub const WRITE_CYCLE_US: u32 = 5_000;

pub(crate) fn check_range<E>(capacity: u32, offset: u32, length: usize) -> Result<(), Error<E>> {
    let length = u32::try_from(length).map_err(|_| Error::InvalidAddress)?;
    if length > capacity || offset > capacity - length {
        return Err(Error::InvalidAddress);
    }
    Ok(())
}

pub(crate) fn check_length<E>(length: usize) -> Result<(), Error<E>> {
    if length > MAX_ARRAY_LEN {
        return Err(Error::InvalidLength);
    }
    Ok(())
}
