//! Access to one EEPROM from several execution contexts (main loop and interrupt handlers).
//!
//! Each driver call brackets chip select itself, but nothing stops an interrupt from
//! starting another command in the middle of a bracket. [`SharedEeprom`] runs every
//! access inside a critical section.

use core::cell::RefCell;

use critical_section::Mutex;

/// A driver behind a critical section mutex, suitable for a `static`
pub struct SharedEeprom<E> {
    inner: Mutex<RefCell<E>>,
}

impl<E> SharedEeprom<E> {
    pub const fn new(eeprom: E) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(eeprom)),
        }
    }

    /// Run `f` with exclusive access to the driver. Keep `f` short, interrupts are masked
    /// for its whole duration, write cycles included.
    ///
    /// # Panics
    /// If called again from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        critical_section::with(|cs| {
            let mut eeprom = self.inner.borrow_ref_mut(cs);
            f(&mut *eeprom)
        })
    }

    pub fn into_inner(self) -> E {
        self.inner.into_inner().into_inner()
    }
}
