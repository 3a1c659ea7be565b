//! Driver-agnostic load cell surface.

use crate::device::Hx711;
use crate::error::Error;
use crate::interface::Hx711Interface;

/// Operations shared by load cell front ends.
pub trait LoadCell {
    /// Error produced by a failed read.
    type Error;

    /// Read the value from the load cell.
    fn read(&mut self) -> core::result::Result<i32, Self::Error>;

    /// Zero the load cell offset by averaging `num_samples` readings.
    fn tare(&mut self, num_samples: u32) -> core::result::Result<(), Self::Error>;

    /// Get the load cell offset.
    fn offset(&self) -> i32;

    /// Set the load cell offset.
    fn set_offset(&mut self, offset: i32);
}

impl<IFACE> LoadCell for Hx711<IFACE>
where
    IFACE: Hx711Interface,
{
    type Error = Error<IFACE::Error>;

    fn read(&mut self) -> core::result::Result<i32, Self::Error> {
        Hx711::read(self)
    }

    fn tare(&mut self, num_samples: u32) -> core::result::Result<(), Self::Error> {
        Hx711::tare(self, num_samples)
    }

    fn offset(&self) -> i32 {
        Hx711::offset(self)
    }

    fn set_offset(&mut self, offset: i32) {
        Hx711::set_offset(self, offset)
    }
}
