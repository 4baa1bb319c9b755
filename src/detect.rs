//! Detection of the touch panel fitted to the board.
//!
//! The board variants only differ in the touch controller and in which line
//! drives the backlight. Detection has to run once, before either touch bus is
//! set up, because the two controllers share pins.

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_hal::{digital::InputPin, i2c::I2c};

use crate::{board, cst820};

/// The touch technology fitted to the board.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// No touch panel.
    None,
    /// CST820 capacitive touch panel on I2C.
    Capacitive,
    /// XPT2046 resistive touch panel on SPI.
    Resistive,
}

impl TouchKind {
    /// Whether a touch panel is fitted at all.
    pub fn is_present(self) -> bool {
        self != TouchKind::None
    }

    /// GPIO driving the backlight on this board variant.
    pub fn backlight_pin(self) -> u8 {
        match self {
            TouchKind::Capacitive => board::BACKLIGHT_CAPACITIVE,
            TouchKind::Resistive | TouchKind::None => board::BACKLIGHT_RESISTIVE,
        }
    }
}

/// Detects which touch panel is fitted.
///
/// `i2c` must be set up on the capacitive controller's pins
/// ([`board::I2C_SDA`], [`board::I2C_SCL`]). If the CST820 acknowledges its
/// address the panel is capacitive. Otherwise `pen_irq` is read. It must be
/// the XPT2046 PENIRQ line ([`board::XPT2046_IRQ`]) configured as an input
/// pulled low, so it only reads high when an XPT2046 is there to pull it up.
///
/// Release both before setting up the touch bus for the detected kind.
pub fn detect<I2C, Irq>(i2c: &mut I2C, pen_irq: &mut Irq) -> Result<TouchKind, Irq::Error>
where
    I2C: I2c,
    Irq: InputPin,
{
    let kind = if cst820::probe(i2c, board::CST820_ADDRESS) {
        TouchKind::Capacitive
    } else if pen_irq.is_high()? {
        TouchKind::Resistive
    } else {
        TouchKind::None
    };

    #[cfg(feature = "defmt")]
    {
        match kind {
            TouchKind::Capacitive => defmt::info!("Capacitive touch detected"),
            TouchKind::Resistive => defmt::info!("Resistive touch detected"),
            TouchKind::None => defmt::info!("No touch screen detected"),
        }
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::{
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    fn nack() -> I2cTransaction {
        I2cTransaction::write(0x15, vec![])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
    }

    #[test]
    fn capacitive_wins_without_reading_the_irq() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write(0x15, vec![])]);
        let mut irq = PinMock::new(&[]);

        assert_eq!(detect(&mut i2c, &mut irq).unwrap(), TouchKind::Capacitive);

        i2c.done();
        irq.done();
    }

    #[test]
    fn pulled_up_irq_is_resistive() {
        let mut i2c = I2cMock::new(&[nack()]);
        let mut irq = PinMock::new(&[PinTransaction::get(PinState::High)]);

        assert_eq!(detect(&mut i2c, &mut irq).unwrap(), TouchKind::Resistive);

        i2c.done();
        irq.done();
    }

    #[test]
    fn nothing_answers() {
        let mut i2c = I2cMock::new(&[nack()]);
        let mut irq = PinMock::new(&[PinTransaction::get(PinState::Low)]);

        let kind = detect(&mut i2c, &mut irq).unwrap();
        assert_eq!(kind, TouchKind::None);
        assert!(!kind.is_present());

        i2c.done();
        irq.done();
    }

    #[test]
    fn backlight_follows_the_variant() {
        assert_eq!(TouchKind::Capacitive.backlight_pin(), 27);
        assert_eq!(TouchKind::Resistive.backlight_pin(), 21);
        assert_eq!(TouchKind::None.backlight_pin(), 21);
    }
}
