use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    check_length, check_range,
    clock::{ClockTier, NoClock, SystemClock},
    command::Command,
    error::Error,
    transport::Transport,
    MAX_ARRAY_LEN, WRITE_CYCLE_US,
};

/// Type alias for the 25LC080, 1kB with 16 byte pages
pub type Eeprom25LC080<T, CS, D, CLK = NoClock> = Eeprom<0x0400, 16, T, CS, D, CLK>;

/// Type alias for the 25LC160, 2kB with 16 byte pages
pub type Eeprom25LC160<T, CS, D, CLK = NoClock> = Eeprom<0x0800, 16, T, CS, D, CLK>;

/// Type alias for the 25LC320A, 4kB with 32 byte pages
pub type Eeprom25LC320A<T, CS, D, CLK = NoClock> = Eeprom<0x1000, 32, T, CS, D, CLK>;

/// Type alias for the 25LC640A, 8kB with 32 byte pages
pub type Eeprom25LC640<T, CS, D, CLK = NoClock> = Eeprom<0x2000, 32, T, CS, D, CLK>;

/// Type alias for the 25LC128, 16kB with 64 byte pages
pub type Eeprom25LC128<T, CS, D, CLK = NoClock> = Eeprom<0x4000, 64, T, CS, D, CLK>;

/// Type alias for the 25LC256, 32kB with 64 byte pages
pub type Eeprom25LC256<T, CS, D, CLK = NoClock> = Eeprom<0x8000, 64, T, CS, D, CLK>;

/// Type alias for the 25LC512, 64kB with 128 byte pages
pub type Eeprom25LC512<T, CS, D, CLK = NoClock> = Eeprom<0x1_0000, 128, T, CS, D, CLK>;

/// The generic 25xx driver.
///
/// `CAPACITY` is the size of the array in bytes and `PAGE` the size of the write page
/// buffer. Every operation brackets its own chip select, so the bus is free between
/// calls.
pub struct Eeprom<const CAPACITY: u32, const PAGE: u32, T, CS, D, CLK = NoClock> {
    transport: T,
    cs: CS,
    delay: D,
    clock: CLK,
    write_cycle_us: u32,
}

impl<const CAPACITY: u32, const PAGE: u32, T, CS, D> Eeprom<CAPACITY, PAGE, T, CS, D, NoClock>
where
    T: Transport,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a new instance without clock throttling. Nothing is sent until [`Self::init`]
    pub fn new(transport: T, cs: CS, delay: D) -> Self {
        Self::with_clock(transport, cs, delay, NoClock)
    }
}

impl<const CAPACITY: u32, const PAGE: u32, T, CS, D, CLK> Eeprom<CAPACITY, PAGE, T, CS, D, CLK>
where
    T: Transport,
    CS: OutputPin,
    D: DelayNs,
    CLK: SystemClock,
{
    const GEOMETRY: () = assert!(
        CAPACITY <= 0x1_0000 && PAGE > 0 && PAGE as usize <= MAX_ARRAY_LEN,
        "the address must fit 16 bits and a page must fit one array write"
    );

    /// Create a new instance that slows the system clock down around array transfers
    pub fn with_clock(transport: T, cs: CS, delay: D, clock: CLK) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::GEOMETRY;
        Self {
            transport,
            cs,
            delay,
            clock,
            write_cycle_us: WRITE_CYCLE_US,
        }
    }

    /// Override the wait after each write, for parts or supply voltages with a different T_WC
    pub fn set_write_cycle_time(&mut self, us: u32) {
        self.write_cycle_us = us;
    }

    pub fn write_cycle_time(&self) -> u32 {
        self.write_cycle_us
    }

    /// Destroy the driver and give back its resources
    pub fn release(self) -> (T, CS, D, CLK) {
        (self.transport, self.cs, self.delay, self.clock)
    }

    /// Idle the lines, release chip select and prime the write enable latch.
    /// Must be called once before anything else, calling it again is harmless.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.init()?;
        self.cs.set_high().map_err(Error::pin)?;
        self.write_enable()
    }

    /// Run `f` with chip select held low. Chip select is released even if `f` fails
    fn transaction<R>(
        &mut self,
        f: impl FnOnce(&mut T) -> Result<R, Error<T::Error>>,
    ) -> Result<R, Error<T::Error>> {
        self.cs.set_low().map_err(Error::pin)?;
        let res = f(&mut self.transport);
        let res = match res {
            Ok(val) => self.transport.flush().map(|()| val),
            err => err,
        };
        let released = self.cs.set_high().map_err(Error::pin);

        let val = res?;
        released?;
        Ok(val)
    }

    fn throttled<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.clock.set_tier(ClockTier::Low);
        let res = f(self);
        self.clock.set_tier(ClockTier::High);
        res
    }

    fn read_base(&mut self, address: u16, buff: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.transaction(|bus| {
            bus.send_byte(Command::Read.into())?;
            bus.send_word(address)?;
            bus.receive_bytes(buff)
        })
    }

    // The latch clears itself after every write, so each write gets its own enable bracket
    fn write_base(&mut self, address: u16, buff: &[u8]) -> Result<(), Error<T::Error>> {
        self.write_enable()?;
        self.transaction(|bus| {
            bus.send_byte(Command::Write.into())?;
            bus.send_word(address)?;
            bus.send_bytes(buff)
        })?;
        self.delay.delay_us(self.write_cycle_us);
        Ok(())
    }

    /// Set the write enable latch. Writes already do this, it is only needed to prime the device
    pub fn write_enable(&mut self) -> Result<(), Error<T::Error>> {
        self.transaction(|bus| bus.send_byte(Command::WriteEnable.into()))
    }

    /// Read the byte stored at `address`
    pub fn read_byte(&mut self, address: u16) -> Result<u8, Error<T::Error>> {
        check_range(CAPACITY, address.into(), 1)?;
        self.transaction(|bus| {
            bus.send_byte(Command::Read.into())?;
            bus.send_word(address)?;
            bus.receive_byte()
        })
    }

    /// Write one byte at `address` and wait for the write cycle to complete
    pub fn write_byte(&mut self, address: u16, data: u8) -> Result<(), Error<T::Error>> {
        check_range(CAPACITY, address.into(), 1)?;
        self.write_base(address, &[data])
    }

    /// Read a big endian 16 bit value from `address` and `address + 1`
    pub fn read_word(&mut self, address: u16) -> Result<u16, Error<T::Error>> {
        check_range(CAPACITY, address.into(), 2)?;
        let high = self.read_byte(address)?;
        let low = self.read_byte(address + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    /// Write a 16 bit value big endian, high byte at `address`
    pub fn write_word(&mut self, address: u16, data: u16) -> Result<(), Error<T::Error>> {
        check_range(CAPACITY, address.into(), 2)?;
        let [high, low] = data.to_be_bytes();
        self.write_byte(address, high)?;
        self.write_byte(address + 1, low)
    }

    /// Fill `buff` from consecutive addresses in a single read command.
    /// At most [`MAX_ARRAY_LEN`] bytes.
    pub fn read_array(&mut self, address: u16, buff: &mut [u8]) -> Result<(), Error<T::Error>> {
        check_length(buff.len())?;
        check_range(CAPACITY, address.into(), buff.len())?;
        if buff.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Read {=usize} bytes from {=u16}", buff.len(), address);
        self.throttled(|eeprom| eeprom.read_base(address, buff))
    }

    /// Write `data` to consecutive addresses in a single write command.
    /// At most [`MAX_ARRAY_LEN`] bytes.
    ///
    /// The device wraps around inside its page buffer, so a run crossing a `PAGE` boundary
    /// lands at the start of the page. [`embedded_storage::Storage::write`] splits on page
    /// boundaries.
    pub fn write_array(&mut self, address: u16, data: &[u8]) -> Result<(), Error<T::Error>> {
        check_length(data.len())?;
        check_range(CAPACITY, address.into(), data.len())?;
        if data.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Write {=usize} bytes to {=u16}", data.len(), address);
        self.throttled(|eeprom| eeprom.write_base(address, data))
    }

    /// Set every byte of the device to `0x00`, one write cycle per address
    pub fn erase_all(&mut self) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Erasing {=u32} bytes", CAPACITY);
        for address in 0..CAPACITY {
            self.write_byte(address as u16, 0x00)?;
        }
        Ok(())
    }
}

/// Implementation of the `Storage` traits of the `embedded_storage` crate.
mod es {
    use super::*;
    use embedded_storage::{ReadStorage, Storage};

    impl<const CAPACITY: u32, const PAGE: u32, T, CS, D, CLK> ReadStorage
        for Eeprom<CAPACITY, PAGE, T, CS, D, CLK>
    where
        T: Transport,
        CS: OutputPin,
        D: DelayNs,
        CLK: SystemClock,
    {
        type Error = Error<T::Error>;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            check_range(CAPACITY, offset, bytes.len())?;
            let mut cursor = offset;
            for chunk in bytes.chunks_mut(MAX_ARRAY_LEN) {
                self.read_array(cursor as u16, chunk)?;
                cursor += chunk.len() as u32;
            }
            Ok(())
        }

        fn capacity(&self) -> usize {
            CAPACITY as usize
        }
    }

    impl<const CAPACITY: u32, const PAGE: u32, T, CS, D, CLK> Storage
        for Eeprom<CAPACITY, PAGE, T, CS, D, CLK>
    where
        T: Transport,
        CS: OutputPin,
        D: DelayNs,
        CLK: SystemClock,
    {
        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            check_range(CAPACITY, offset, bytes.len())?;
            let mut cursor = offset;
            let mut bytes = bytes;
            while !bytes.is_empty() {
                // Never cross a page, the device would wrap to the page start
                let page_remain = (PAGE - cursor % PAGE) as usize;
                let (now, later) = bytes.split_at(page_remain.min(bytes.len()));
                self.write_array(cursor as u16, now)?;
                cursor += now.len() as u32;
                bytes = later;
            }
            Ok(())
        }
    }
}
