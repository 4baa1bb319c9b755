//! Error definition for the crate

#[cfg(feature = "defmt")]
use defmt::{write, Format, Formatter};

/// Errors returned while polling a touch screen.
///
/// Only bus failures are errors. An absent touch panel or a panel that is not
/// being touched is reported through [`crate::detect::TouchKind::None`] and
/// [`crate::touch::PointerState::Released`] instead.
#[derive(Debug)]
pub enum Error<I2cError, SpiError> {
    /// I2C error talking to the capacitive controller
    I2c(I2cError),
    /// SPI error talking to the resistive controller
    Spi(SpiError),
}

#[cfg(feature = "defmt")]
impl<I2cError, SpiError> Format for Error<I2cError, SpiError> {
    fn format(&self, fmt: Formatter) {
        match self {
            Error::I2c(_) => write!(fmt, "I2C error"),
            Error::Spi(_) => write!(fmt, "SPI error"),
        }
    }
}
