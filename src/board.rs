//! Pin map and fixed parameters of the ESP32 "Cheap Yellow Display" boards.
//!
//! The boards come in two touch variants that share one PCB layout. The
//! capacitive variant routes a CST820 controller to an I2C bus on GPIO 32/33,
//! while the resistive variant routes an XPT2046 controller to a dedicated SPI
//! bus on GPIO 25/32/33/39. Because the pins overlap, the touch bus must only be
//! configured after [`crate::detect::detect`] has decided which variant is
//! populated.

use embedded_graphics::geometry::Size;

/// Width of the panel in its native (portrait, USB down) orientation.
pub const PANEL_WIDTH: u32 = 240;
/// Height of the panel in its native (portrait, USB down) orientation.
pub const PANEL_HEIGHT: u32 = 320;
/// Size of the panel in its native orientation.
pub const PANEL_SIZE: Size = Size::new(PANEL_WIDTH, PANEL_HEIGHT);

/// I2C data line of the capacitive touch controller.
pub const I2C_SDA: u8 = 33;
/// I2C clock line of the capacitive touch controller.
pub const I2C_SCL: u8 = 32;
/// Reset line of the capacitive touch controller.
pub const CST820_RESET: u8 = 25;
/// Interrupt line of the capacitive touch controller.
pub const CST820_INT: u8 = 21;
/// 7-bit I2C address of the CST820.
pub const CST820_ADDRESS: u8 = 0x15;

/// PENIRQ line of the resistive touch controller.
///
/// GPIO 36 is input only and has no internal pull resistors on the ESP32, so
/// the XPT2046's own pull-up is what makes the line idle high.
pub const XPT2046_IRQ: u8 = 36;
/// SPI MOSI line of the resistive touch controller.
pub const XPT2046_MOSI: u8 = 32;
/// SPI MISO line of the resistive touch controller.
pub const XPT2046_MISO: u8 = 39;
/// SPI clock line of the resistive touch controller.
pub const XPT2046_CLK: u8 = 25;
/// SPI chip select line of the resistive touch controller.
pub const XPT2046_CS: u8 = 33;
/// SPI clock rate for the XPT2046. The bus runs in mode 0, MSB first.
pub const TOUCH_SPI_FREQUENCY_HZ: u32 = 2_000_000;

/// Minimum XPT2046 pressure reading that counts as a touch.
pub const PRESSURE_THRESHOLD: i32 = 300;

/// Backlight line on boards with a capacitive touch panel.
pub const BACKLIGHT_CAPACITIVE: u8 = 27;
/// Backlight line on boards with a resistive or no touch panel.
pub const BACKLIGHT_RESISTIVE: u8 = 21;
