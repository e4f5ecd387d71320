//! Constraint-based splitter

use super::{Constraint, Direction};
use crate::geometry::Rect;

/// Splits a rectangle into one slot per constraint
#[derive(Debug, Clone, Default)]
pub struct Layout {
    direction: Direction,
    constraints: Vec<Constraint>,
    spacing: u16,
}

impl Layout {
    /// Slots placed left to right
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Slots placed top to bottom
    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            constraints: Vec::new(),
            spacing: 0,
        }
    }

    /// Set the constraints
    pub fn constraints<I: IntoIterator<Item = Constraint>>(mut self, constraints: I) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Cells left empty between consecutive slots
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Split `area` into one rectangle per constraint
    ///
    /// Fixed and percentage slots are resolved first, in order; the space
    /// they leave is shared by the `Fill` slots by weight, and the rounding
    /// remainder goes to the last of them. Slots that do not fit come back
    /// empty rather than overflowing the area.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        if self.constraints.is_empty() {
            return Vec::new();
        }

        let total = self.direction.main_len(area.width, area.height);
        let gaps = self.constraints.len().saturating_sub(1) as u16;
        let available = total.saturating_sub(self.spacing.saturating_mul(gaps));

        let mut sizes = vec![0u16; self.constraints.len()];
        let mut remaining = available;
        let mut total_weight = 0u32;
        for (size, constraint) in sizes.iter_mut().zip(&self.constraints) {
            match constraint.resolve(available, remaining) {
                Some(n) => {
                    *size = n;
                    remaining -= n;
                }
                None => total_weight += constraint.fill_weight() as u32,
            }
        }

        if total_weight > 0 {
            let mut handed_out = 0u16;
            let mut last_fill = None;
            for (i, constraint) in self.constraints.iter().enumerate() {
                let weight = constraint.fill_weight() as u32;
                if matches!(constraint, Constraint::Fill(_)) {
                    sizes[i] = (remaining as u32 * weight / total_weight) as u16;
                    handed_out += sizes[i];
                    last_fill = Some(i);
                }
            }
            if let Some(i) = last_fill {
                sizes[i] += remaining - handed_out;
            }
        }

        let mut offset = 0u16;
        sizes
            .into_iter()
            .map(|size| {
                let rect = match self.direction {
                    Direction::Horizontal => {
                        Rect::new(area.x.saturating_add(offset), area.y, size, area.height)
                    }
                    Direction::Vertical => {
                        Rect::new(area.x, area.y.saturating_add(offset), area.width, size)
                    }
                };
                offset = offset.saturating_add(size).saturating_add(self.spacing);
                rect
            })
            .collect()
    }
}
