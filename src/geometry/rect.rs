//! Rectangular region of the screen

use super::{Point, Size};

/// A rectangular region of the screen, the geometry every primitive carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin covering a whole surface
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Empty rectangle
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Number of cells covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge x coordinate (exclusive)
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y coordinate (exclusive)
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a cell lies inside this rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink by `margin` cells on every side
    pub fn inner(&self, margin: u16) -> Self {
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(margin.saturating_mul(2)),
            height: self.height.saturating_sub(margin.saturating_mul(2)),
        }
    }

    /// Intersection of two rectangles (empty when they do not overlap)
    pub fn intersect(&self, other: &Rect) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x >= right || y >= bottom {
            Self::empty()
        } else {
            Self::new(x, y, right - x, bottom - y)
        }
    }

    /// Iterate over all cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (u16, u16)> {
        let (x_start, x_end) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x_start..x_end).map(move |x| (x, y)))
    }
}

impl From<(u16, u16, u16, u16)> for Rect {
    fn from((x, y, width, height): (u16, u16, u16, u16)) -> Self {
        Self::new(x, y, width, height)
    }
}
