//! Size constraints for layout

/// How much of the main axis a single slot receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Exactly this many cells (clamped to what is left)
    Fixed(u16),
    /// Share of the full length (0-100)
    Percentage(u16),
    /// Share of the space left over, proportional to the weight
    Fill(u16),
}

impl Constraint {
    /// Weight of a `Fill` slot, 0 for every other constraint
    pub fn fill_weight(&self) -> u16 {
        match self {
            Self::Fill(w) => *w,
            _ => 0,
        }
    }

    /// Size of a non-flexible slot, or None for `Fill`
    ///
    /// `total` is the full length being split and `remaining` what the
    /// previous slots left unclaimed.
    pub fn resolve(&self, total: u16, remaining: u16) -> Option<u16> {
        match self {
            Self::Fixed(n) => Some((*n).min(remaining)),
            Self::Percentage(p) => {
                let size = (total as u32 * (*p).min(100) as u32 / 100) as u16;
                Some(size.min(remaining))
            }
            Self::Fill(_) => None,
        }
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Fill(1)
    }
}
