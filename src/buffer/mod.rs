//! Cell grid backing a screen

mod buffer;
mod cell;

pub use buffer::Buffer;
pub use cell::Cell;
