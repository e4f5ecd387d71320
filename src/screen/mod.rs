//! The cell surface and input source the application drives

mod terminal;
mod raw_mode;

pub use terminal::CrosstermScreen;
pub use raw_mode::RawModeGuard;

use crate::buffer::Cell;
use crate::config::ScreenConfig;
use crate::event::Event;
use crate::geometry::Size;
use crate::style::Style;
use std::io;
use std::sync::Arc;

/// Backend contract consumed by the application
///
/// Every method takes `&self`: the application shares one screen between the
/// polling thread and whatever thread happens to call `draw`.
pub trait Screen: Send + Sync {
    /// Bring up the surface
    fn init(&self) -> io::Result<()>;

    /// Tear down the surface; later polls return `None`
    fn fini(&self);

    /// Block until the next event, or `None` once finalized
    fn poll_event(&self) -> Option<Event>;

    /// Erase the display buffer
    fn clear(&self);

    /// Flush the display buffer to the output
    fn show(&self);

    /// Current size in cells
    fn size(&self) -> Size;

    fn hide_cursor(&self);

    /// Show the cursor at (x, y) on the next flush
    fn show_cursor(&self, x: u16, y: u16);

    /// Write one cell; writes outside the surface are dropped
    fn set_content(&self, x: u16, y: u16, ch: char, style: Style);

    /// Read one cell, or `None` outside the surface
    fn get_content(&self, x: u16, y: u16) -> Option<Cell>;

    /// Hand the terminal back to the user (leave raw mode)
    fn suspend(&self) -> io::Result<()> {
        Ok(())
    }

    /// Take the terminal over again after [`Screen::suspend`]
    fn resume(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Builds a screen from the configuration stored in the application
pub type ScreenFactory = Box<dyn Fn(&ScreenConfig) -> io::Result<Arc<dyn Screen>> + Send + Sync>;

/// Factory producing a [`CrosstermScreen`] on the process terminal
pub fn crossterm_factory() -> ScreenFactory {
    Box::new(|config: &ScreenConfig| {
        let screen: Arc<dyn Screen> = Arc::new(CrosstermScreen::new(config.clone()));
        Ok(screen)
    })
}
