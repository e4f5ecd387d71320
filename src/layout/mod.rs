//! Splitting a rectangle into rows or columns

mod constraint;
mod direction;
mod split;

pub use constraint::Constraint;
pub use direction::Direction;
pub use split::Layout;
