//! Bus interface abstraction for the HX711 driver.

pub mod spi;

use crate::config::BusSettings;

/// Abstraction over the low-level bus access required by the driver.
pub trait Hx711Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Applies clock frequency, mode and word size.
    fn configure(&mut self, settings: &BusSettings) -> core::result::Result<(), Self::Error>;

    /// Clocks `write` out while filling `read` with the bytes received.
    ///
    /// Both slices have the same length.
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Releases the bus. Called at most once by the driver.
    fn close(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Source of bus handles addressed by name, e.g. `"SPI0.0"`.
pub trait BusManager {
    /// Interface type handed out for an opened bus.
    type Interface: Hx711Interface;

    /// Opens the named bus.
    fn open(
        &mut self,
        bus_name: &str,
    ) -> core::result::Result<Self::Interface, <Self::Interface as Hx711Interface>::Error>;
}
