//! Layout direction

/// Axis along which a [`Layout`](super::Layout) places its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Top to bottom
    #[default]
    Vertical,
}

impl Direction {
    /// Length of `area` along this axis
    pub fn main_len(&self, width: u16, height: u16) -> u16 {
        match self {
            Direction::Horizontal => width,
            Direction::Vertical => height,
        }
    }
}
