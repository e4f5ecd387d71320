//! Row-major grid of cells

use super::Cell;
use crate::geometry::{Rect, Size};

/// A grid of cells covering a whole screen
///
/// Screens keep two of these: the frame being composed and the frame last
/// flushed, so only changed cells reach the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    size: Size,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![Cell::empty(); Rect::from_size(size).area() as usize],
        }
    }

    /// Dimensions of the grid
    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), or None outside the grid
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Replace the cell at (x, y); writes outside the grid are dropped
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill the part of `area` that lies on the grid
    pub fn fill(&mut self, area: Rect, cell: &Cell) {
        let clipped = Rect::from_size(self.size).intersect(&area);
        for (x, y) in clipped.positions() {
            self.set(x, y, cell.clone());
        }
    }

    /// Reset every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Resize to `size`, keeping the cells of the overlapping region
    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        let mut resized = Buffer::new(size);
        let overlap = Rect::from_size(self.size).intersect(&Rect::from_size(size));
        for (x, y) in overlap.positions() {
            if let Some(cell) = self.get(x, y) {
                resized.set(x, y, cell.clone());
            }
        }
        *self = resized;
    }

    /// Iterate over all cells with their positions
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.size.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u16, (i / width) as u16, cell))
    }

    /// Cells of `self` that differ from `previous`
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.iter()
            .filter(move |(x, y, cell)| previous.get(*x, *y) != Some(*cell))
    }

    /// One row of glyphs as a string, mostly for assertions
    pub fn row_text(&self, y: u16) -> String {
        (0..self.size.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.symbol.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};

    #[test]
    fn test_buffer_get_set() {
        let mut buf = Buffer::new(Size::new(10, 5));
        buf.set(5, 2, Cell::styled('X', Style::new().fg(Color::Red)));

        let cell = buf.get(5, 2).unwrap();
        assert_eq!(cell.symbol, "X");
        assert_eq!(cell.fg, Color::Red);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buf = Buffer::new(Size::new(10, 5));
        assert!(buf.get(9, 4).is_some());
        assert!(buf.get(10, 0).is_none());
        assert!(buf.get(0, 5).is_none());

        // Silently dropped
        buf.set(10, 0, Cell::styled('X', Style::new()));
        assert_eq!(buf, Buffer::new(Size::new(10, 5)));
    }

    #[test]
    fn test_buffer_fill_clips() {
        let mut buf = Buffer::new(Size::new(5, 5));
        buf.fill(Rect::new(3, 3, 10, 10), &Cell::styled('#', Style::new()));

        assert_eq!(buf.get(2, 2).unwrap().symbol, " ");
        assert_eq!(buf.get(3, 3).unwrap().symbol, "#");
        assert_eq!(buf.get(4, 4).unwrap().symbol, "#");
    }

    #[test]
    fn test_buffer_diff() {
        let mut prev = Buffer::new(Size::new(5, 5));
        let mut next = Buffer::new(Size::new(5, 5));

        prev.set(1, 1, Cell::styled('A', Style::new()));
        next.set(1, 1, Cell::styled('B', Style::new()));
        next.set(2, 2, Cell::styled('C', Style::new()));

        let diffs: Vec<_> = next.diff(&prev).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(diffs, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_buffer_resize_keeps_overlap() {
        let mut buf = Buffer::new(Size::new(4, 2));
        buf.set(1, 1, Cell::styled('K', Style::new()));
        buf.set(3, 0, Cell::styled('L', Style::new()));

        buf.resize(Size::new(2, 3));
        assert_eq!(buf.size(), Size::new(2, 3));
        assert_eq!(buf.get(1, 1).unwrap().symbol, "K");
        assert_eq!(buf.row_text(2), "  ");
    }

    #[test]
    fn test_buffer_clear() {
        let mut buf = Buffer::new(Size::new(3, 1));
        buf.set(2, 0, Cell::styled('X', Style::new()));
        buf.clear();
        assert_eq!(buf.row_text(0), "   ");
    }
}
