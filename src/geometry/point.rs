//! Cell coordinate on the screen

use crossterm::event::MouseEvent;

/// A cell coordinate on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    /// Create a new point
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Position of a pointer event
    pub fn of_mouse(event: &MouseEvent) -> Self {
        Self::new(event.column, event.row)
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}
