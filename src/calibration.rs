//! Mapping of raw XPT2046 measurements to display pixels.
//!
//! The resistive panel reports each axis as a 13-bit measurement that never
//! spans the full range: the edges of the panel sit somewhere around 200 and
//! the far edges somewhere around 3700. Each axis is mapped on its own from its
//! measured range to the pixel range of the panel and clamped, so touches on
//! the bezel land on the outermost pixel instead of outside the display.
//!
//! The capacitive controller already reports pixels and does not use any of
//! this.

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_graphics::geometry::Point;

/// Proportionally maps `value` from the range `from` onto the range `to`.
///
/// This is plain integer interpolation, truncating toward zero, and it
/// extrapolates for values outside of `from`. Either range may be descending.
/// A degenerate `from` range maps everything onto `to.0`.
pub fn linear_map(value: i32, from: (i32, i32), to: (i32, i32)) -> i32 {
    let (from_lo, from_hi) = (i64::from(from.0), i64::from(from.1));
    let (to_lo, to_hi) = (i64::from(to.0), i64::from(to.1));

    if from_lo == from_hi {
        return to.0;
    }

    let mapped = (i64::from(value) - from_lo) * (to_hi - to_lo) / (from_hi - from_lo) + to_lo;
    mapped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Maps one raw measurement axis onto one pixel axis.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    /// Raw measurement at the first edge of the panel.
    pub raw_start: i32,
    /// Raw measurement at the opposite edge of the panel.
    pub raw_end: i32,
    /// Pixel coordinate of the first edge.
    pub pixel_start: i32,
    /// Pixel coordinate of the opposite edge.
    pub pixel_end: i32,
}

impl AxisMapping {
    pub const fn new(raw_start: i32, raw_end: i32, pixel_start: i32, pixel_end: i32) -> Self {
        Self {
            raw_start,
            raw_end,
            pixel_start,
            pixel_end,
        }
    }

    /// Maps a raw measurement to a pixel coordinate within the pixel range.
    pub fn map(&self, raw: i32) -> i32 {
        let pixel = linear_map(
            raw,
            (self.raw_start, self.raw_end),
            (self.pixel_start, self.pixel_end),
        );
        pixel.clamp(
            self.pixel_start.min(self.pixel_end),
            self.pixel_start.max(self.pixel_end),
        )
    }
}

/// Calibration data for transforming raw touch measurements into display
/// pixel positions.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationData {
    /// Mapping of the raw x measurement.
    pub x: AxisMapping,
    /// Mapping of the raw y measurement.
    pub y: AxisMapping,
    /// Swap the mapped coordinates afterwards.
    ///
    /// The resistive panel is mounted rotated by 90 degrees relative to the
    /// display and to the capacitive panel. Swapping brings both panel types
    /// into the same coordinate space.
    pub swap_xy: bool,
}

impl CalibrationData {
    /// Transforms a filtered raw measurement into a display point.
    pub fn apply(&self, raw: Point) -> Point {
        let x = self.x.map(raw.x);
        let y = self.y.map(raw.y);

        #[cfg(feature = "defmt")]
        defmt::trace!("calibrated: x={} y={} swap={}", x, y, self.swap_xy);

        if self.swap_xy {
            Point::new(y, x)
        } else {
            Point::new(x, y)
        }
    }
}

impl Default for CalibrationData {
    fn default() -> Self {
        builtin_calibration_data()
    }
}

/// Returns the "builtin" calibration values.
///
/// The values match the resistive panels fitted to the 240x320 boards. The raw
/// x axis runs along the long side of the panel and the raw y axis along the
/// short side, reversed, which is why the result is swapped:
///
/// - raw x 200..3750 maps to 0..319, then becomes the display y,
/// - raw y 200..3700 maps to 239..0, then becomes the display x.
pub const fn builtin_calibration_data() -> CalibrationData {
    CalibrationData {
        x: AxisMapping::new(200, 3750, 0, 319),
        y: AxisMapping::new(200, 3700, 239, 0),
        swap_xy: true,
    }
}
