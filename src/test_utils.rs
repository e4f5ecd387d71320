//! In-memory screen for tests
//!
//! [`ScriptedScreen`] replays a queue of events and records what the
//! application did to it, so the event loop can be driven without a
//! terminal.

use crate::buffer::{Buffer, Cell};
use crate::config::ScreenConfig;
use crate::event::Event;
use crate::geometry::Size;
use crate::screen::Screen;
use crate::style::Style;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A screen that replays scripted events
///
/// Polling returns the queued events in order and then the empty sentinel,
/// unless the screen is held open, in which case polling blocks until
/// another event is pushed or the screen is finalized.
pub struct ScriptedScreen {
    buffer: Mutex<Buffer>,
    cursor: Mutex<Option<(u16, u16)>>,
    events: Mutex<VecDeque<Event>>,
    arrived: Condvar,
    hold_open: bool,
    fail_init: bool,
    finished: AtomicBool,
    init_calls: AtomicUsize,
    fini_calls: AtomicUsize,
    show_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    suspend_calls: AtomicUsize,
    resume_calls: AtomicUsize,
}

impl ScriptedScreen {
    /// An empty script on a `width` x `height` surface
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Mutex::new(Buffer::new(Size::new(width, height))),
            cursor: Mutex::new(None),
            events: Mutex::new(VecDeque::new()),
            arrived: Condvar::new(),
            hold_open: false,
            fail_init: false,
            finished: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            fini_calls: AtomicUsize::new(0),
            show_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
            suspend_calls: AtomicUsize::new(0),
            resume_calls: AtomicUsize::new(0),
        }
    }

    /// A screen that replays `events` and then reports shutdown
    pub fn with_events(width: u16, height: u16, events: impl IntoIterator<Item = Event>) -> Self {
        let screen = Self::new(width, height);
        screen.events.lock().extend(events);
        screen
    }

    /// A screen whose polls block once the script is exhausted
    pub fn held_open(width: u16, height: u16) -> Self {
        Self {
            hold_open: true,
            ..Self::new(width, height)
        }
    }

    /// A screen whose `init` fails
    pub fn failing(width: u16, height: u16) -> Self {
        Self {
            fail_init: true,
            ..Self::new(width, height)
        }
    }

    /// Factory handing this screen to an application
    pub fn factory(
        self: &Arc<Self>,
    ) -> impl Fn(&ScreenConfig) -> io::Result<Arc<dyn Screen>> + Send + Sync + 'static {
        let screen = Arc::clone(self);
        move |_config: &ScreenConfig| {
            let screen: Arc<dyn Screen> = screen.clone();
            Ok(screen)
        }
    }

    /// Append an event to the script
    pub fn push_event(&self, event: Event) {
        self.events.lock().push_back(event);
        self.arrived.notify_all();
    }

    /// Copy of the composed cells
    pub fn snapshot(&self) -> Buffer {
        self.buffer.lock().clone()
    }

    /// One row of glyphs
    pub fn row_text(&self, y: u16) -> String {
        self.buffer.lock().row_text(y)
    }

    /// Where the cursor is shown, if it is
    pub fn cursor(&self) -> Option<(u16, u16)> {
        *self.cursor.lock()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn fini_calls(&self) -> usize {
        self.fini_calls.load(Ordering::SeqCst)
    }

    pub fn show_calls(&self) -> usize {
        self.show_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn suspend_calls(&self) -> usize {
        self.suspend_calls.load(Ordering::SeqCst)
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }
}

impl Screen for ScriptedScreen {
    fn init(&self) -> io::Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "scripted init failure"));
        }
        self.finished.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn fini(&self) {
        self.fini_calls.fetch_add(1, Ordering::SeqCst);
        self.finished.store(true, Ordering::SeqCst);
        // Take the queue lock so a poll between its check and its wait
        // cannot miss the wakeup
        let _events = self.events.lock();
        self.arrived.notify_all();
    }

    fn poll_event(&self) -> Option<Event> {
        let mut events = self.events.lock();
        loop {
            if self.finished.load(Ordering::SeqCst) {
                return None;
            }
            if let Some(event) = events.pop_front() {
                drop(events);
                if let Event::Resize { width, height } = event {
                    self.buffer.lock().resize(Size::new(width, height));
                }
                return Some(event);
            }
            if !self.hold_open {
                return None;
            }
            self.arrived.wait_for(&mut events, Duration::from_millis(20));
        }
    }

    fn clear(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.buffer.lock().clear();
    }

    fn show(&self) {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn size(&self) -> Size {
        self.buffer.lock().size()
    }

    fn hide_cursor(&self) {
        *self.cursor.lock() = None;
    }

    fn show_cursor(&self, x: u16, y: u16) {
        *self.cursor.lock() = Some((x, y));
    }

    fn set_content(&self, x: u16, y: u16, ch: char, style: Style) {
        self.buffer.lock().set(x, y, Cell::styled(ch, style));
    }

    fn get_content(&self, x: u16, y: u16) -> Option<Cell> {
        self.buffer.lock().get(x, y).cloned()
    }

    fn suspend(&self) -> io::Result<()> {
        self.suspend_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn resume(&self) -> io::Result<()> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
