//! Error handling primitives for the HX711 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus (open, configure, transfer or close).
    Interface(E),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The bus handle has already been released.
    Closed,
    /// An average was requested over zero samples.
    NoSamples,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
