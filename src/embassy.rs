//! Polling the touch screen from an async task.
//!
//! The graphics stack polls its input devices at its refresh rate. [`run`]
//! does the same on its own: it polls the [`TouchScreen`] once per period and
//! publishes every change on a [`Signal`], from where the UI task picks up the
//! latest state.

use core::convert::Infallible;
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embedded_hal::{i2c::I2c, spi::SpiDevice};
use embedded_hal_async::delay::DelayNs;

use crate::{
    error::Error,
    rotation::DisplayState,
    touch::{PointerEvent, TouchScreen},
};

/// Default poll period, the refresh period of the graphics stack.
pub const POLL_PERIOD_MS: u32 = 30;

/// Polls `touch` every `poll_period_ms` and signals changed events.
///
/// Only returns when a bus error occurs.
pub async fn run<I2C, SPI, D, M, DELAY>(
    touch: &mut TouchScreen<I2C, SPI>,
    display: &D,
    events: &Signal<M, PointerEvent>,
    delay: &mut DELAY,
    poll_period_ms: u32,
) -> Result<Infallible, Error<I2C::Error, SPI::Error>>
where
    I2C: I2c,
    SPI: SpiDevice<u8>,
    D: DisplayState + ?Sized,
    M: RawMutex,
    DELAY: DelayNs,
{
    let mut last_event = None;
    loop {
        let event = touch.poll(display)?;
        if last_event != Some(event) {
            events.signal(event);
            last_event = Some(event);
        }
        delay.delay_ms(poll_period_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detect::TouchKind, rotation::PanelState, touch::TouchController};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_graphics::geometry::Point;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::{
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
        spi::Mock as SpiMock,
    };

    /// Takes whatever was signalled before each delay.
    struct Recorder<'a> {
        events: &'a Signal<NoopRawMutex, PointerEvent>,
        seen: Vec<Option<PointerEvent>>,
        periods: Vec<u32>,
    }

    impl DelayNs for Recorder<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.periods.push(ms);
            self.seen.push(self.events.try_take());
        }
    }

    fn report(bytes: [u8; 5]) -> I2cTransaction {
        I2cTransaction::write_read(0x15, vec![0x02], bytes.to_vec())
    }

    #[test]
    fn signals_changes_until_a_bus_error() {
        let expectations = [
            report([0x01, 0x00, 0x14, 0x00, 0x28]),
            report([0x01, 0x00, 0x14, 0x00, 0x28]),
            report([0x00, 0x00, 0x00, 0x00, 0x00]),
            report([0; 5]).with_error(ErrorKind::Bus),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut touch =
            TouchScreen::<_, SpiMock<u8>>::new(TouchKind::Capacitive, || i2c, || unreachable!())
                .unwrap();
        let events = Signal::new();
        let mut recorder = Recorder {
            events: &events,
            seen: Vec::new(),
            periods: Vec::new(),
        };

        let result = block_on(run(
            &mut touch,
            &PanelState::default(),
            &events,
            &mut recorder,
            POLL_PERIOD_MS,
        ));

        assert!(matches!(result, Err(Error::I2c(ErrorKind::Bus))));
        let point = Point::new(20, 40);
        assert_eq!(
            recorder.seen,
            [
                Some(PointerEvent::pressed(point)),
                None,
                Some(PointerEvent::released(point)),
            ]
        );
        assert_eq!(recorder.periods, [30, 30, 30]);

        match touch.release() {
            TouchController::Capacitive(driver) => driver.release().done(),
            TouchController::Resistive(_) => unreachable!(),
        }
    }
}
