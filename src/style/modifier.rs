//! Text attributes (bold, underline, reverse video)

use crossterm::style::Attribute;
use std::ops::{BitOr, BitOrAssign};

/// Text attributes as a bitfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifier(u8);

impl Modifier {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);
    pub const ITALIC: Self = Self(1 << 2);
    pub const UNDERLINED: Self = Self(1 << 3);
    /// Swap foreground and background
    pub const REVERSED: Self = Self(1 << 4);

    const TABLE: [(Modifier, Attribute); 5] = [
        (Self::BOLD, Attribute::Bold),
        (Self::DIM, Attribute::Dim),
        (Self::ITALIC, Attribute::Italic),
        (Self::UNDERLINED, Attribute::Underlined),
        (Self::REVERSED, Attribute::Reverse),
    ];

    /// Create an empty modifier set
    pub const fn empty() -> Self {
        Self::NONE
    }

    /// Check if no modifiers are set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check if every modifier in `other` is set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two modifier sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Crossterm attributes to emit for this set
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        Self::TABLE
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, attr)| *attr)
    }
}

impl BitOr for Modifier {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for Modifier {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_union() {
        let mut m = Modifier::BOLD;
        m |= Modifier::REVERSED;
        assert!(m.contains(Modifier::BOLD));
        assert!(m.contains(Modifier::REVERSED));
        assert!(!m.contains(Modifier::ITALIC));
        assert!(Modifier::empty().is_empty());
    }

    #[test]
    fn test_modifier_attributes() {
        let attrs: Vec<_> = (Modifier::BOLD | Modifier::UNDERLINED).attributes().collect();
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Underlined]);
    }
}
