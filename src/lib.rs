#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    unused_variables,
    unreachable_code,
    unused_comparisons,
    unused_must_use
)]
#![cfg_attr(not(test), no_std)]

//! A platform agnostic Rust driver for the touch panels of the ESP32 "Cheap
//! Yellow Display" boards, based on the
//! [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits.
//!
//! The boards are built with either a CST820 capacitive touch panel on I2C, an
//! XPT2046 resistive touch panel on SPI, or no touch panel at all. The crate
//! detects which one is fitted and turns it into a single pointer device that
//! reports display pixel coordinates, whatever the panel type:
//!
//! 1. [`detect::detect`] probes the board once at startup.
//! 2. [`touch::TouchScreen::new`] sets up the bus of the detected panel. No
//!    session is created when there is no panel.
//! 3. [`touch::TouchScreen::poll`] is called whenever the graphics stack wants
//!    to know where the pointer is. It returns a [`touch::PointerEvent`].
//!
//! Resistive samples go through [`filter`] and [`calibration`] on the way,
//! and all points are corrected for the display rotation in [`rotation`].
//!
//! With the `embassy` feature, [`embassy::run`] polls from an async task. With
//! the `defmt` feature, the crate logs through `defmt` and its types implement
//! `defmt::Format`.

pub mod board;
pub mod calibration;
pub mod cst820;
pub mod detect;
#[cfg(feature = "embassy")]
pub mod embassy;
pub mod error;
pub mod filter;
pub mod rotation;
pub mod touch;
pub mod xpt2046;

/// Re-exported from
/// [embedded_graphics](https://docs.rs/embedded-graphics/latest/embedded_graphics/index.html)
/// for convenience.
pub use embedded_graphics::geometry::{Point, Size};

pub use crate::{
    calibration::CalibrationData,
    detect::{detect, TouchKind},
    error::Error,
    rotation::{DisplayState, PanelState, Rotation},
    touch::{PointerEvent, PointerState, TouchScreen},
};
