use core::fmt;

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// All possible errors emitted by the driver
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BusError> {
    /// Error reported by the underlying bus peripheral
    Bus(BusError),

    /// A GPIO (chip select or a bit-banged line) could not be driven or sampled
    Pin(PinErrorKind),

    /// Address out of the device range
    InvalidAddress,

    /// Transfer longer than a single array operation can carry
    InvalidLength,

    /// A ready flag did not set within the poll budget
    DeviceTimeout,
}

impl<BusError> Error<BusError> {
    pub(crate) fn pin<P: embedded_hal::digital::Error>(err: P) -> Self {
        Error::Pin(err.kind())
    }
}

impl<BusError: fmt::Debug> fmt::Display for Error<BusError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Pin(kind) => write!(f, "pin error: {:?}", kind),
            Error::InvalidAddress => write!(f, "address outside the device range"),
            Error::InvalidLength => write!(f, "transfer length exceeds the array limit"),
            Error::DeviceTimeout => write!(f, "device did not become ready in time"),
        }
    }
}
