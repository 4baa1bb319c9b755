//! The CST820 capacitive touch panel driver.
//!
//! The CST820 does its own filtering and scaling and reports the touch location
//! directly in display pixels for the panel in its native orientation. Only the
//! first touch point is read.

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_graphics::geometry::Point;
use embedded_hal::i2c::I2c;

use crate::board::CST820_ADDRESS;

/// First register of the touch report: finger count, then X and Y of the first
/// touch point as 12-bit big-endian values.
const CST820_RD_TOUCH_REPORT: u8 = 0x02;
const TOUCH_REPORT_LEN: usize = 5;

/// The CST820 driver.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub struct Cst820<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Cst820<I2C>
where
    I2C: I2c,
{
    /// Creates a driver for a CST820 at the board's default address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, CST820_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Checks whether anything acknowledges the controller's address.
    ///
    /// This is a zero-length write. Any bus error, including a missing
    /// acknowledge, is taken to mean that no controller is fitted.
    pub fn probe(&mut self) -> bool {
        probe(&mut self.i2c, self.address)
    }

    /// Reads the first touch point.
    ///
    /// Returns `Ok(None)` when the panel is not being touched. The controller
    /// reports that through a finger count of 0, and reads back 0xFF when it
    /// is still asleep.
    pub fn read_touch(&mut self) -> Result<Option<Point>, I2C::Error> {
        let mut report = [0u8; TOUCH_REPORT_LEN];
        self.i2c
            .write_read(self.address, &[CST820_RD_TOUCH_REPORT], &mut report)?;

        if report[0] == 0x00 || report[0] == 0xFF {
            return Ok(None);
        }

        let x = (u16::from(report[1] & 0x0F) << 8) | u16::from(report[2]);
        let y = (u16::from(report[3] & 0x0F) << 8) | u16::from(report[4]);

        Ok(Some(Point::new(x.into(), y.into())))
    }

    /// Releases the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Zero-length write to `address`, true when it was acknowledged.
pub(crate) fn probe<I2C: I2c>(i2c: &mut I2C, address: u8) -> bool {
    i2c.write(address, &[]).is_ok()
}
