//! Screen size in cells

/// Width and height of a surface, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check if the size covers no cells
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }
}
