//! High-level HX711 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::{BusManager, Hx711Interface};
use crate::log::{debug, log_warn, trace};
use crate::params::Gain;
use crate::protocol::{DATA_BYTES, WAVEFORM_LEN, decode_response, sign_extend};
use embedded_hal::spi::SpiDevice;

/// High-level synchronous driver for the HX711 load cell ADC.
///
/// The bus handle is owned from construction until [`close`](Self::close),
/// [`release`](Self::release) or drop, and stays open across reads.
pub struct Hx711<IFACE: Hx711Interface> {
    interface: Option<IFACE>,
    config: Config,
    offset: i32,
    last_reading: i32,
}

impl<IFACE, CommE> Hx711<IFACE>
where
    IFACE: Hx711Interface<Error = CommE>,
{
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Opens `bus_name` through `manager` and configures it with the default
    /// bus settings and the requested gain.
    pub fn open<M>(manager: &mut M, bus_name: &str, gain: Gain) -> Result<Self, CommE>
    where
        M: BusManager<Interface = IFACE>,
    {
        let interface = manager.open(bus_name)?;
        debug!("hx711: opened bus {=str}", bus_name);
        Self::new(interface, Config::new().gain(gain).build())
    }

    /// Configures `interface` and wraps it in a driver.
    ///
    /// If validation or configuration fails the interface is closed before
    /// the original error is returned. A failing close at that point is
    /// logged and dropped.
    pub fn new(mut interface: IFACE, config: Config) -> Result<Self, CommE> {
        if let Err(err) = Self::prepare(&mut interface, &config) {
            if interface.close().is_err() {
                log_warn!("hx711: close failed while unwinding construction");
            }
            return Err(err);
        }

        Ok(Self {
            interface: Some(interface),
            config,
            offset: 0,
            last_reading: 0,
        })
    }

    /// Gives the interface back without closing it.
    ///
    /// Returns `None` when the handle was already closed.
    pub fn release(mut self) -> Option<IFACE> {
        self.interface.take()
    }

    /// Provides mutable access to the underlying interface while it is open.
    pub fn interface_mut(&mut self) -> Option<&mut IFACE> {
        self.interface.as_mut()
    }

    /// Whether the bus handle is still held.
    pub fn is_open(&self) -> bool {
        self.interface.is_some()
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases the bus handle. Calling it again is a no-op.
    ///
    /// The handle is discarded even when the bus reports an error.
    pub fn close(&mut self) -> Result<(), CommE> {
        if let Some(mut interface) = self.interface.take() {
            interface.close()?;
            debug!("hx711: bus closed");
        }
        Ok(())
    }

    // ==================================================================
    // == Gain & Offset ==================================================
    // ==================================================================
    /// Selects the gain and channel for subsequent reads.
    pub fn set_gain(&mut self, gain: Gain) {
        self.config.gain = gain;
    }

    /// Current gain and channel selection.
    pub fn gain(&self) -> Gain {
        self.config.gain
    }

    /// Overrides the stored zero offset.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    /// Stored zero offset. Not applied by [`read`](Self::read).
    pub fn offset(&self) -> i32 {
        self.offset
    }

    // ==================================================================
    // == Data Acquisition ===============================================
    // ==================================================================
    /// Clocks out one conversion and returns the unsigned 24-bit code.
    pub fn read_raw(&mut self) -> Result<u32, CommE> {
        let interface = self.interface.as_mut().ok_or(Error::Closed)?;

        let waveform = self.config.gain.waveform();
        let mut response = [0u8; WAVEFORM_LEN];
        interface.transfer(waveform, &mut response)?;

        let mut data = [0u8; DATA_BYTES];
        data.copy_from_slice(&response[..DATA_BYTES]);
        let raw = decode_response(&data);
        trace!("hx711: raw {=u32:#x}", raw);
        Ok(raw)
    }

    /// Clocks out one conversion as a signed value.
    pub fn read(&mut self) -> Result<i32, CommE> {
        let value = sign_extend(self.read_raw()?);
        self.last_reading = value;
        Ok(value)
    }

    /// Reads once and subtracts the stored offset.
    pub fn read_tared(&mut self) -> Result<i32, CommE> {
        Ok(self.read()?.saturating_sub(self.offset))
    }

    /// Last value returned by [`read`](Self::read), zero before the first read.
    pub fn last_reading(&self) -> i32 {
        self.last_reading
    }

    /// Averages `times` consecutive reads, truncating toward zero.
    pub fn read_average(&mut self, times: u32) -> Result<i32, CommE> {
        if times == 0 {
            return Err(Error::NoSamples);
        }

        let mut sum: i64 = 0;
        for _ in 0..times {
            sum += i64::from(self.read()?);
        }

        let average = (sum / i64::from(times)) as i32;
        trace!("hx711: average of {=u32} reads = {=i32}", times, average);
        Ok(average)
    }

    /// Zeroes the scale by storing the average of `times` reads as the offset.
    pub fn tare(&mut self, times: u32) -> Result<(), CommE> {
        self.offset = self.read_average(times)?;
        Ok(())
    }

    // ==================================================================
    // == Readiness & Power ==============================================
    // ==================================================================
    /// Always `true`.
    ///
    /// The chip signals a finished conversion by pulling DOUT low, but over
    /// SPI that line is only visible during a transfer.
    pub fn is_ready(&self) -> bool {
        true
    }

    /// Does nothing.
    ///
    /// Power-down needs PD_SCK held high for more than 60 µs, which an
    /// SPI-emulated clock cannot do between transfers.
    pub fn power_down(&mut self) {}

    /// Does nothing; see [`power_down`](Self::power_down).
    pub fn power_up(&mut self) {}

    // ==================================================================
    // == Internal Helpers ===============================================
    // ==================================================================
    fn prepare(interface: &mut IFACE, config: &Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        interface.configure(&config.bus)?;
        debug!(
            "hx711: bus configured at {=u32} Hz, {=u8} bits per word",
            config.bus.frequency_hz,
            config.bus.bits_per_word
        );
        Ok(())
    }
}

impl<SPI> Hx711<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Result<Self, SPI::Error> {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device if it was still open.
    pub fn release_spi(self) -> Option<SPI> {
        self.release().map(SpiInterface::release)
    }
}

impl<IFACE: Hx711Interface> Drop for Hx711<IFACE> {
    fn drop(&mut self) {
        if let Some(mut interface) = self.interface.take() {
            if interface.close().is_err() {
                log_warn!("hx711: close failed on drop");
            }
        }
    }
}
