//! Hook into the system clock module, used to slow the shared bus down around array transfers.

/// Speed tier requested from the system clock. The actual frequencies are owned by the
/// implementor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTier {
    /// A speed the EEPROM accepts on its serial clock input
    Low,
    /// The normal operating speed of the rest of the system
    High,
}

/// System clock speed control
pub trait SystemClock {
    /// Switch the system clock to the given tier
    fn set_tier(&mut self, tier: ClockTier);
}

/// No clock throttling, for targets where the bus already runs within the EEPROM limits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClock;

impl SystemClock for NoClock {
    fn set_tier(&mut self, _tier: ClockTier) {}
}
