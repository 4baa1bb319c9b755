//! Display rotation as seen by the touch driver.

#[cfg(feature = "defmt")]
use defmt::Format;
use embedded_graphics::geometry::{Point, Size};

use crate::board;

/// Rotation of the display relative to its native portrait orientation.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Portrait, USB connector at the bottom.
    pub const USB_DOWN: Rotation = Rotation::Deg0;
    /// Landscape, USB connector on the right.
    pub const USB_RIGHT: Rotation = Rotation::Deg90;
    /// Portrait, USB connector at the top.
    pub const USB_UP: Rotation = Rotation::Deg180;
    /// Landscape, USB connector on the left.
    pub const USB_LEFT: Rotation = Rotation::Deg270;

    /// Whether the display is used in a landscape orientation.
    pub fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// State of the display stack that the touch driver reads on every poll.
pub trait DisplayState {
    /// Current rotation of the display.
    fn rotation(&self) -> Rotation;

    /// Size of the panel in its native orientation, regardless of rotation.
    fn native_size(&self) -> Size;
}

/// A plain [`DisplayState`] for display stacks that do not track it themselves.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub rotation: Rotation,
    pub size: Size,
}

impl PanelState {
    /// The board's 240x320 panel at the given rotation.
    pub const fn new(rotation: Rotation) -> Self {
        Self {
            rotation,
            size: board::PANEL_SIZE,
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(Rotation::default())
    }
}

impl DisplayState for PanelState {
    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn native_size(&self) -> Size {
        self.size
    }
}

impl<D: DisplayState + ?Sized> DisplayState for &D {
    fn rotation(&self) -> Rotation {
        (**self).rotation()
    }

    fn native_size(&self) -> Size {
        (**self).native_size()
    }
}

/// Corrects a touch point for the rotation of the display.
///
/// The graphics stack rotates touch input together with the display, but in
/// the landscape rotations it ends up with both axes inverted. Mirroring the
/// point within the native panel size cancels that out. Portrait rotations are
/// passed through.
pub fn correct_rotation(point: Point, rotation: Rotation, native_size: Size) -> Point {
    if rotation.is_landscape() {
        // Panel sizes are far below i32::MAX.
        let width = native_size.width as i32;
        let height = native_size.height as i32;
        Point::new(width - point.x, height - point.y)
    } else {
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = board::PANEL_SIZE;

    #[test]
    fn portrait_passes_through() {
        let p = Point::new(17, 300);
        assert_eq!(correct_rotation(p, Rotation::Deg0, SIZE), p);
        assert_eq!(correct_rotation(p, Rotation::Deg180, SIZE), p);
    }

    #[test]
    fn landscape_mirrors_both_axes() {
        let p = Point::new(17, 300);
        assert_eq!(correct_rotation(p, Rotation::Deg90, SIZE), Point::new(223, 20));
        assert_eq!(correct_rotation(p, Rotation::Deg270, SIZE), Point::new(223, 20));
        assert_eq!(
            correct_rotation(Point::zero(), Rotation::Deg90, SIZE),
            Point::new(240, 320)
        );
    }

    #[test]
    fn landscape_mirror_is_an_involution() {
        for x in (1..240).step_by(13) {
            for y in (1..320).step_by(17) {
                let p = Point::new(x, y);
                for rotation in [Rotation::Deg90, Rotation::Deg270] {
                    let once = correct_rotation(p, rotation, SIZE);
                    assert_eq!(correct_rotation(once, rotation, SIZE), p);
                }
            }
        }
    }

    #[test]
    fn usb_aliases() {
        assert_eq!(Rotation::USB_DOWN, Rotation::Deg0);
        assert_eq!(Rotation::USB_RIGHT, Rotation::Deg90);
        assert_eq!(Rotation::USB_UP, Rotation::Deg180);
        assert_eq!(Rotation::USB_LEFT, Rotation::Deg270);
        assert!(Rotation::USB_LEFT.is_landscape());
        assert!(!Rotation::USB_UP.is_landscape());
    }

    #[test]
    fn panel_state_reports_the_native_size() {
        let state = PanelState::new(Rotation::Deg270);
        assert_eq!(state.rotation(), Rotation::Deg270);
        assert_eq!(state.native_size(), Size::new(240, 320));
        assert_eq!(PanelState::default().rotation(), Rotation::Deg0);
    }
}
