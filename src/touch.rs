//! The touch screen as a pointer device.
//!
//! [`TouchScreen`] owns whichever touch controller was detected and turns each
//! poll into a [`PointerEvent`] in display coordinates:
//!
//! - capacitive: the CST820 report is used as is,
//! - resistive: the three XPT2046 samples per axis are filtered, mapped to
//!   pixels and swapped into the capacitive panel's axes,
//!
//! and for both the point is then corrected for the display rotation.

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_graphics::geometry::Point;
use embedded_hal::{i2c::I2c, spi::SpiDevice};

use crate::{
    calibration::CalibrationData,
    cst820::Cst820,
    detect::TouchKind,
    error::Error,
    filter::filter_triplet,
    rotation::{correct_rotation, DisplayState},
    xpt2046::{RawSample, Xpt2046},
};

/// Whether the pointer is down.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    Pressed,
    Released,
}

/// The result of one poll.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Touch location in display pixels. For [`PointerState::Released`] this
    /// is the location of the last press.
    pub point: Point,
    pub state: PointerState,
}

impl PointerEvent {
    pub const fn pressed(point: Point) -> Self {
        Self {
            point,
            state: PointerState::Pressed,
        }
    }

    pub const fn released(point: Point) -> Self {
        Self {
            point,
            state: PointerState::Released,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == PointerState::Pressed
    }
}

/// The touch controller fitted to the board.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub enum TouchController<I2C, SPI> {
    Capacitive(Cst820<I2C>),
    Resistive(Xpt2046<SPI>),
}

/// Filters and calibrates a resistive sample into a display point.
pub fn resistive_point(sample: &RawSample, calibration: &CalibrationData) -> Point {
    let raw = Point::new(filter_triplet(sample.x), filter_triplet(sample.y));

    #[cfg(feature = "defmt")]
    defmt::debug!("filtered: x={} y={} pressure={}", raw.x, raw.y, sample.pressure);

    calibration.apply(raw)
}

/// A touch screen session.
///
/// There is exactly one session per detected touch panel and none when no
/// panel was found, so nothing is ever polled on a board without touch.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub struct TouchScreen<I2C, SPI> {
    controller: TouchController<I2C, SPI>,
    /// Calibration data for the resistive panel.
    calibration: CalibrationData,
    /// Location of the last press, reported again on release.
    last_point: Point,
}

impl<I2C, SPI> TouchScreen<I2C, SPI>
where
    I2C: I2c,
    SPI: SpiDevice<u8>,
{
    /// Creates the session for the detected `kind`.
    ///
    /// Only the bus matching `kind` is set up: `i2c` is called for a
    /// capacitive panel, `spi` for a resistive one. Returns `None` for
    /// [`TouchKind::None`]. The resistive panel uses the builtin calibration.
    pub fn new(
        kind: TouchKind,
        i2c: impl FnOnce() -> I2C,
        spi: impl FnOnce() -> SPI,
    ) -> Option<Self> {
        match kind {
            TouchKind::Capacitive => Some(Self::capacitive(Cst820::new(i2c()))),
            TouchKind::Resistive => Some(Self::resistive(
                Xpt2046::new(spi()),
                &CalibrationData::default(),
            )),
            TouchKind::None => None,
        }
    }

    pub fn capacitive(driver: Cst820<I2C>) -> Self {
        Self {
            controller: TouchController::Capacitive(driver),
            calibration: CalibrationData::default(),
            last_point: Point::zero(),
        }
    }

    pub fn resistive(driver: Xpt2046<SPI>, calibration_data: &CalibrationData) -> Self {
        Self {
            controller: TouchController::Resistive(driver),
            calibration: *calibration_data,
            last_point: Point::zero(),
        }
    }

    /// Sets the calibration data used for the resistive panel.
    pub fn set_calibration_data(&mut self, calibration_data: &CalibrationData) {
        self.calibration = *calibration_data;
    }

    pub fn kind(&self) -> TouchKind {
        match self.controller {
            TouchController::Capacitive(_) => TouchKind::Capacitive,
            TouchController::Resistive(_) => TouchKind::Resistive,
        }
    }

    /// Pressure measured by the last poll of a resistive panel.
    pub fn pressure(&self) -> Option<i32> {
        match &self.controller {
            TouchController::Capacitive(_) => None,
            TouchController::Resistive(driver) => Some(driver.pressure()),
        }
    }

    /// Reads the touch panel once.
    ///
    /// The rotation and panel size are taken from `display` on every call. The
    /// bus is only used for the duration of the call.
    pub fn poll<D>(&mut self, display: &D) -> Result<PointerEvent, Error<I2C::Error, SPI::Error>>
    where
        D: DisplayState + ?Sized,
    {
        let point = match &mut self.controller {
            TouchController::Capacitive(driver) => driver.read_touch().map_err(Error::I2c)?,
            TouchController::Resistive(driver) => driver
                .read_sample()
                .map_err(Error::Spi)?
                .map(|sample| resistive_point(&sample, &self.calibration)),
        };

        let Some(point) = point else {
            return Ok(PointerEvent::released(self.last_point));
        };

        let point = correct_rotation(point, display.rotation(), display.native_size());
        self.last_point = point;

        #[cfg(feature = "defmt")]
        defmt::trace!("pressed: {}", point);

        Ok(PointerEvent::pressed(point))
    }

    /// Releases the touch controller.
    pub fn release(self) -> TouchController<I2C, SPI> {
        self.controller
    }
}
