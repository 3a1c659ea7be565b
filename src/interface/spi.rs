//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::SpiDevice;

use super::Hx711Interface;
use crate::config::BusSettings;

/// SPI-based interface implementation for the HX711 driver.
///
/// `embedded-hal` devices get their clock, mode and word size from the HAL
/// when they are created, so [`Hx711Interface::configure`] only records the
/// requested settings. The HAL bus must be set up to match them.
pub struct SpiInterface<SPI> {
    spi: SPI,
    settings: Option<BusSettings>,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self {
            spi,
            settings: None,
        }
    }

    /// Settings recorded by the last `configure` call.
    pub fn settings(&self) -> Option<&BusSettings> {
        self.settings.as_ref()
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Hx711Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn configure(&mut self, settings: &BusSettings) -> core::result::Result<(), Self::Error> {
        self.settings = Some(*settings);
        Ok(())
    }

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if write.is_empty() {
            return Ok(());
        }

        self.spi.transfer(read, write)
    }

    fn close(&mut self) -> core::result::Result<(), Self::Error> {
        self.settings = None;
        Ok(())
    }
}
