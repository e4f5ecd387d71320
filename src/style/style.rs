//! Cell style: foreground, background and attributes

use super::{Color, Modifier};

/// The style of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub modifier: Modifier,
}

impl Style {
    /// Terminal default colors, no attributes
    pub const fn new() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            modifier: Modifier::NONE,
        }
    }

    /// Set foreground color
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Set background color
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Add bold
    pub const fn bold(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::BOLD);
        self
    }

    /// Add underline
    pub const fn underlined(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::UNDERLINED);
        self
    }

    /// Same style with foreground and background exchanged
    pub const fn inverted(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
            modifier: self.modifier,
        }
    }
}
