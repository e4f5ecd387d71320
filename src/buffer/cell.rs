//! A single screen cell: glyph plus style

use crate::style::{Color, Modifier, Style};

/// A single screen cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The glyph displayed (a grapheme, usually one char)
    pub symbol: String,
    pub fg: Color,
    pub bg: Color,
    pub modifier: Modifier,
}

impl Cell {
    /// A blank cell in the terminal's default colors
    pub fn empty() -> Self {
        Self::styled(' ', Style::new())
    }

    /// A cell holding `ch` drawn in `style`
    pub fn styled(ch: char, style: Style) -> Self {
        Self {
            symbol: ch.to_string(),
            fg: style.fg,
            bg: style.bg,
            modifier: style.modifier,
        }
    }

    /// The first char of the glyph (space for an empty symbol)
    pub fn ch(&self) -> char {
        self.symbol.chars().next().unwrap_or(' ')
    }

    /// The cell's style
    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifier: self.modifier,
        }
    }

    /// Reset the cell to empty
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}
