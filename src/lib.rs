//! cellview: a terminal UI runtime built on crossterm
//!
//! The crate is organised around three pieces:
//! - [`Application`], the controller that owns the blocking event loop,
//!   focus routing and the draw pipeline
//! - [`Primitive`], the capability set every drawable, focusable node
//!   implements (geometry, draw, focus lifecycle, input handlers)
//! - [`Screen`], the cell surface and input source the controller drives
//!
//! Widgets ([`widget`]) compose the shared [`Block`] base and plug into the
//! controller purely through the `Primitive` contract.

pub mod app;
pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod primitive;
pub mod screen;
pub mod style;
pub mod test_utils;
pub mod theme;
pub mod widget;

// Re-export commonly used types
pub use app::{AfterDraw, Application, BeforeDraw, InputCapture};
pub use buffer::{Buffer, Cell};
pub use config::{AppConfig, ScreenConfig};
pub use error::{Error, Result};
pub use event::{
    ctrl_c, press, release, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
pub use geometry::{Point, Rect, Size};
pub use layout::{Constraint, Direction, Layout};
pub use primitive::{
    focus_guard, same_primitive, Block, BorderType, Handler, Listener, Primitive, RequestFocus,
};
pub use screen::{crossterm_factory, CrosstermScreen, Screen, ScreenFactory};
pub use style::{print, string_width, truncate, Alignment, Color, Modifier, Style};
pub use theme::{Theme, ThemeSlot};
