//! Screen backed by the process terminal through crossterm

use super::{RawModeGuard, Screen};
use crate::buffer::{Buffer, Cell};
use crate::config::ScreenConfig;
use crate::event::{translate, Event};
use crate::geometry::Size;
use crate::style::Style;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Frame state shared by drawing and flushing
struct Frame {
    /// Frame being composed
    back: Buffer,
    /// Frame last flushed; `None` forces a full repaint
    front: Option<Buffer>,
    cursor: Option<(u16, u16)>,
    guard: Option<RawModeGuard>,
}

/// Terminal screen with diff-based flushing
///
/// Cells are composed into an in-memory buffer; [`Screen::show`] writes only
/// the cells that changed since the previous flush.
pub struct CrosstermScreen {
    config: ScreenConfig,
    frame: Mutex<Frame>,
    /// Events translated but not yet handed out (a paste yields many)
    pending: Mutex<VecDeque<Event>>,
    running: AtomicBool,
    suspended: AtomicBool,
}

impl CrosstermScreen {
    /// Create an uninitialised screen; nothing touches the terminal until `init`
    pub fn new(config: ScreenConfig) -> Self {
        Self {
            config,
            frame: Mutex::new(Frame {
                back: Buffer::new(Size::default()),
                front: None,
                cursor: None,
                guard: None,
            }),
            pending: Mutex::new(VecDeque::new()),
            running: AtomicBool::new(false),
            suspended: AtomicBool::new(false),
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms.max(1))
    }

    fn resize(&self, width: u16, height: u16) {
        let mut frame = self.frame.lock();
        frame.back.resize(Size::new(width, height));
        frame.front = None;
    }

    /// Read one terminal event, queueing what it translates to
    ///
    /// Returns false when the terminal can no longer be read.
    fn read_terminal(&self) -> bool {
        match event::poll(self.poll_interval()) {
            Ok(false) => true,
            Ok(true) => match event::read() {
                Ok(raw) => {
                    let events = translate(raw);
                    for event in &events {
                        if let Event::Resize { width, height } = event {
                            self.resize(*width, *height);
                        }
                    }
                    self.pending.lock().extend(events);
                    true
                }
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    false
                }
            },
            Err(e) => {
                warn!("Failed to poll terminal: {}", e);
                false
            }
        }
    }

    fn flush(&self, frame: &mut Frame) -> io::Result<()> {
        let mut out = io::stdout();

        match &frame.front {
            Some(front) => {
                for (x, y, cell) in frame.back.diff(front) {
                    draw_cell(&mut out, x, y, cell)?;
                }
            }
            None => {
                queue!(out, ResetColor, Clear(ClearType::All))?;
                for (x, y, cell) in frame.back.iter() {
                    draw_cell(&mut out, x, y, cell)?;
                }
            }
        }

        match frame.cursor {
            Some((x, y)) => queue!(out, MoveTo(x, y), Show)?,
            None => queue!(out, Hide)?,
        }

        frame.front = Some(frame.back.clone());
        out.flush()
    }
}

fn draw_cell(out: &mut Stdout, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
    queue!(
        out,
        MoveTo(x, y),
        SetForegroundColor(cell.fg.into()),
        SetBackgroundColor(cell.bg.into())
    )?;
    for attr in cell.modifier.attributes() {
        queue!(out, SetAttribute(attr))?;
    }
    queue!(out, Print(&cell.symbol))?;
    if !cell.modifier.is_empty() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

impl Screen for CrosstermScreen {
    fn init(&self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let guard = RawModeGuard::enter(&self.config)?;

        let mut frame = self.frame.lock();
        frame.back = Buffer::new(Size::new(width, height));
        frame.front = None;
        frame.cursor = None;
        frame.guard = Some(guard);
        self.running.store(true, Ordering::SeqCst);
        debug!("Terminal screen initialised at {}x{}", width, height);
        Ok(())
    }

    fn fini(&self) {
        self.running.store(false, Ordering::SeqCst);
        // Dropping the guard restores the terminal
        let guard = self.frame.lock().guard.take();
        drop(guard);
        self.pending.lock().clear();
    }

    fn poll_event(&self) -> Option<Event> {
        loop {
            if !self.running.load(Ordering::SeqCst) {
                return None;
            }
            if let Some(event) = self.pending.lock().pop_front() {
                return Some(event);
            }
            if self.suspended.load(Ordering::SeqCst) {
                std::thread::sleep(self.poll_interval());
                continue;
            }
            if !self.read_terminal() {
                return None;
            }
        }
    }

    fn clear(&self) {
        let mut frame = self.frame.lock();
        frame.back.clear();
        frame.front = None;
    }

    fn show(&self) {
        let mut frame = self.frame.lock();
        if frame.guard.is_none() {
            return;
        }
        if let Err(e) = self.flush(&mut frame) {
            warn!("Failed to flush terminal: {}", e);
        }
    }

    fn size(&self) -> Size {
        self.frame.lock().back.size()
    }

    fn hide_cursor(&self) {
        self.frame.lock().cursor = None;
    }

    fn show_cursor(&self, x: u16, y: u16) {
        self.frame.lock().cursor = Some((x, y));
    }

    fn set_content(&self, x: u16, y: u16, ch: char, style: Style) {
        self.frame.lock().back.set(x, y, Cell::styled(ch, style));
    }

    fn get_content(&self, x: u16, y: u16) -> Option<Cell> {
        self.frame.lock().back.get(x, y).cloned()
    }

    fn suspend(&self) -> io::Result<()> {
        self.suspended.store(true, Ordering::SeqCst);
        let guard = self.frame.lock().guard.take();
        drop(guard);
        Ok(())
    }

    fn resume(&self) -> io::Result<()> {
        let guard = RawModeGuard::enter(&self.config)?;
        let (width, height) = terminal::size()?;
        {
            let mut frame = self.frame.lock();
            frame.guard = Some(guard);
            frame.back.resize(Size::new(width, height));
            frame.front = None;
        }
        self.suspended.store(false, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        if self.frame.get_mut().guard.is_some() {
            self.fini();
        }
    }
}
