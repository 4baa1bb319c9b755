//! The Xpt2046 touch panel driver.
//!
//! The driver is for the XPT2046 Resistive Touch Screen Controller connected
//! using SPI.
//!
//! Essentially, the XPT2046 is an ADC (analog to digital converter) that can
//! be commanded to measure the voltage across the resistive layers of the touch
//! panel. The driver measures the touch pressure (the Z1-Position and
//! Z2-Position measurements) and, when the panel is pressed hard enough, three
//! pairs of X/Y position measurements that are later filtered down to one
//! point.
//!
//! Information on the operation of the XPT2046 Touch Screen Controller can be
//! found in the XPT2046 data sheet
//! (<https://www.snapeda.com/parts/XPT2046/Xptek/datasheet/>).

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_hal::spi::SpiDevice;

use crate::board::PRESSURE_THRESHOLD;

// The XPT2046 is clocked in 16-bit words here. Each word carries a Control
// Byte in its low byte while the high byte is zero. The measurement started by
// a Control Byte is clocked out during the following word: one busy clock after
// the Control Byte, then 12 bits MSB first, so it arrives left-shifted by 3
// bits in the 16-bit word and the low 3 bits are dropped. Because of this
// pipelining, the first word of every exchange returns nothing useful and every
// exchange ends with a word that only collects the last measurement.

/// Convenience enums and functions for working with the XPT2046 Control Byte.
///
/// The XPT2046 Control Byte consists of one start bit (S), three channel select
/// bits (A2-A0), one 12-bit/8-bit ADC conversion select bit (MODE), one
/// single-ended/differential select bit (SER/DFR), one internal/external
/// voltage reference select bit (PD1) and one PENIRQ enable/disable bit (PD0).
/// In a Control Byte, A2-A0, MODE and SER/DFR apply to the current measurement
/// wheres PD1 and PD0 apply after the current measurement is complete.
pub(crate) mod control_byte {
    /// Selects the channel to be measured by the measurement.
    #[derive(Debug, Clone, Copy)]
    pub enum ChannelSelect {
        /// Make the X-Position measurement of the touch panel.
        XPosition = 0b101,
        /// Make the Y-Position measurement of the touch panel.
        YPosition = 0b001,
        /// Make the Z1-Position measurement of the touch panel.
        ///
        /// Z1 and Z2 together give a crude estimate of the pressure applied to
        /// the panel.
        Z1Position = 0b011,
        /// Make the Z2-Position measurement of the touch panel.
        Z2Position = 0b100,
    }

    /// Selects the ADC precision for the measurement.
    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    pub enum ADCModeSelect {
        Bits12 = 0b0,
        Bits8 = 0b1,
    }

    /// Selects whether the measurement uses a single-ended or a differential
    /// reference. Position measurements are more accurate differential.
    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    pub enum SerDfrSelect {
        Dfr = 0b0,
        Ser = 0b1,
    }

    /// Power-down mode after the current measurement (PD1 and PD0).
    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    pub enum PowerDown {
        /// Power down between conversions with PENIRQ enabled. This is the
        /// low-power state the controller is left in between polls.
        PenIrqEnabled = 0b00,
        /// Reference off, ADC on, PENIRQ disabled. Used while converting
        /// back-to-back so the pen interrupt does not disturb measurements.
        AdcOn = 0b01,
        ReferenceOn = 0b10,
        AlwaysOn = 0b11,
    }

    /// Builds a XPT2046 Control Byte.
    pub const fn build_control_byte(
        channel: ChannelSelect,
        adc_mode: ADCModeSelect,
        ser_dfr: SerDfrSelect,
        power_down: PowerDown,
    ) -> u8 {
        (0b1 << 7)
            | ((channel as u8) << 4)
            | ((adc_mode as u8) << 3)
            | ((ser_dfr as u8) << 2)
            | (power_down as u8)
    }

    /// 12-bit differential position measurement of `channel`, followed by
    /// `power_down`.
    pub const fn position(channel: ChannelSelect, power_down: PowerDown) -> u8 {
        build_control_byte(channel, ADCModeSelect::Bits12, SerDfrSelect::Dfr, power_down)
    }

    pub const Z1: u8 = position(ChannelSelect::Z1Position, PowerDown::AdcOn);
    pub const Z2: u8 = position(ChannelSelect::Z2Position, PowerDown::AdcOn);
    pub const X: u8 = position(ChannelSelect::XPosition, PowerDown::AdcOn);
    pub const Y: u8 = position(ChannelSelect::YPosition, PowerDown::AdcOn);
    pub const X_POWER_DOWN: u8 = position(ChannelSelect::XPosition, PowerDown::PenIrqEnabled);
}

use control_byte::{X, X_POWER_DOWN, Y, Z1, Z2};

/// Offset added to Z1 - Z2 so that a light touch still yields a positive
/// pressure value.
const PRESSURE_OFFSET: i32 = 4095;

// Z1 is sent as a bare byte, Z2 and Y as words, so the two received words are
// Z1 and Z2. The trailing Y only switches the controller over to position
// measurements.
const PRESSURE_TX_BUF: [u8; 5] = [Z1, 0, Z2, 0, Y];

// Y,X,Y,X,Y,X with the last X powering the controller down again. The first
// word clocks in nothing but the noisy tail of the previous exchange and is
// thrown away. The following six words are y-channel, x-channel, and so on.
const CAPTURE_TX_BUF: [u8; 14] = [0, Y, 0, X, 0, Y, 0, X, 0, Y, 0, X_POWER_DOWN, 0, 0];

// Leaves the controller powered down with PENIRQ enabled.
const POWER_DOWN_TX_BUF: [u8; 4] = [0, X_POWER_DOWN, 0, 0];

/// Takes the 13 significant bits out of a received word.
fn word(rx_buf: &[u8], index: usize) -> u16 {
    u16::from_be_bytes([rx_buf[index], rx_buf[index + 1]]) >> 3
}

/// One poll worth of raw measurements while the panel is pressed.
///
/// `x` holds the three measurements of the raw x axis, `y` the three of the raw
/// y axis, in the order they were taken. In the sensor's own orientation the x
/// axis is measured on the XPT2046 Y-Position channel and the y axis on its
/// X-Position channel.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub pressure: i32,
    pub x: [u16; 3],
    pub y: [u16; 3],
}

/// The Xpt2046 driver.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub struct Xpt2046<Spi> {
    /// The SPI device interface
    spi: Spi,
    /// Minimum pressure that counts as a touch
    pressure_threshold: i32,
    /// Pressure measured by the last call to [`Xpt2046::read_sample()`]
    pressure: i32,
}

impl<Spi> Xpt2046<Spi>
where
    Spi: SpiDevice<u8>,
{
    /// Creates a driver using the board's pressure threshold.
    ///
    /// The SPI device should be configured for mode 0, MSB first, at
    /// [`crate::board::TOUCH_SPI_FREQUENCY_HZ`].
    pub fn new(spi: Spi) -> Self {
        Self {
            spi,
            pressure_threshold: PRESSURE_THRESHOLD,
            pressure: 0,
        }
    }

    /// Sets the minimum pressure that counts as a touch.
    pub fn with_pressure_threshold(mut self, pressure_threshold: i32) -> Self {
        self.pressure_threshold = pressure_threshold;
        self
    }

    /// Returns the pressure measured by the last call to
    /// [`Xpt2046::read_sample()`].
    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    /// Returns the pressure, computed as `Z1 + 4095 - Z2`.
    ///
    /// Z1 rises and Z2 falls as the touch resistance drops, so the value grows
    /// with pressure. An untouched panel reads close to zero.
    pub fn measure_pressure(&mut self) -> Result<i32, Spi::Error> {
        let mut rx_buf = [0; PRESSURE_TX_BUF.len()];
        self.spi.transfer(&mut rx_buf, &PRESSURE_TX_BUF)?;

        let z1 = i32::from(word(&rx_buf, 1));
        let z2 = i32::from(word(&rx_buf, 3));
        self.pressure = z1 + PRESSURE_OFFSET - z2;

        #[cfg(feature = "defmt")]
        defmt::trace!("z1={} z2={} pressure={}", z1, z2, self.pressure);

        Ok(self.pressure)
    }

    /// Makes a complete touch measurement.
    ///
    /// Returns `Ok(None)` when the pressure is below the threshold. The
    /// controller is left powered down with PENIRQ enabled either way.
    pub fn read_sample(&mut self) -> Result<Option<RawSample>, Spi::Error> {
        let pressure = self.measure_pressure()?;

        if pressure < self.pressure_threshold {
            let mut rx_buf = [0; POWER_DOWN_TX_BUF.len()];
            self.spi.transfer(&mut rx_buf, &POWER_DOWN_TX_BUF)?;
            return Ok(None);
        }

        let mut rx_buf = [0; CAPTURE_TX_BUF.len()];
        self.spi.transfer(&mut rx_buf, &CAPTURE_TX_BUF)?;

        let sample = RawSample {
            pressure,
            x: [word(&rx_buf, 2), word(&rx_buf, 6), word(&rx_buf, 10)],
            y: [word(&rx_buf, 4), word(&rx_buf, 8), word(&rx_buf, 12)],
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("raw sample: {}", sample);

        Ok(Some(sample))
    }

    /// Releases the SPI device.
    pub fn release(self) -> Spi {
        self.spi
    }
}
