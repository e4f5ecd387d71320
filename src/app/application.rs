//! The application controller

use super::guard::TeardownGuard;
use crate::config::ScreenConfig;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::geometry::Rect;
use crate::primitive::{same_primitive, Primitive};
use crate::screen::{crossterm_factory, Screen, ScreenFactory};
use parking_lot::{ReentrantMutex, RwLock};
use std::io;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Global hook that sees key and character events before the focused
/// primitive; returning `None` swallows the event
pub type InputCapture = Arc<dyn Fn(Event) -> Option<Event> + Send + Sync>;

/// Hook run before the root is drawn; returning `true` skips the root
pub type BeforeDraw = Arc<dyn Fn(&dyn Screen) -> bool + Send + Sync>;

/// Hook run after the root is drawn, before the flush
pub type AfterDraw = Arc<dyn Fn(&dyn Screen) + Send + Sync>;

/// Everything guarded by the application lock
#[derive(Default)]
pub(super) struct AppState {
    /// Present only between a successful `run` start and `stop`
    pub(super) screen: Option<Arc<dyn Screen>>,
    pub(super) focus: Option<Weak<dyn Primitive>>,
    pub(super) root: Option<Arc<dyn Primitive>>,
    pub(super) root_fullscreen: bool,
    pub(super) input_capture: Option<InputCapture>,
    pub(super) before_draw: Option<BeforeDraw>,
    pub(super) after_draw: Option<AfterDraw>,
    pub(super) suspended: bool,
}

/// Owns the event loop, the focus and the root primitive
///
/// All methods take `&self` and may be called from any thread, including
/// from handlers running on the loop thread. No handler, hook or focus
/// callback is ever invoked while the application lock is held, so any of
/// them may call back into the application.
pub struct Application {
    config: ScreenConfig,
    factory: ScreenFactory,
    pub(super) state: RwLock<AppState>,
    /// Serialises frames drawn from different threads; re-entrant so a
    /// draw hook may itself call `draw`
    pub(super) draw_lock: ReentrantMutex<()>,
    /// Serialises whole focus transitions (swap, blur, focus); re-entrant so
    /// a `focus` callback may pass focus on
    focus_lock: ReentrantMutex<()>,
}

impl Application {
    /// Create an application drawing on the process terminal
    pub fn new(config: ScreenConfig) -> Self {
        Self::with_screen_factory(config, crossterm_factory())
    }

    /// Create an application whose screen is built by `factory`
    ///
    /// The factory receives `config` verbatim each time `run` starts.
    pub fn with_screen_factory<F>(config: ScreenConfig, factory: F) -> Self
    where
        F: Fn(&ScreenConfig) -> io::Result<Arc<dyn Screen>> + Send + Sync + 'static,
    {
        Self {
            config,
            factory: Box::new(factory),
            state: RwLock::new(AppState::default()),
            draw_lock: ReentrantMutex::new(()),
            focus_lock: ReentrantMutex::new(()),
        }
    }

    /// The configuration handed to the screen factory
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Whether a screen is currently active
    pub fn is_running(&self) -> bool {
        self.state.read().screen.is_some()
    }

    /// Run the event loop until `stop` is called or the screen shuts down
    ///
    /// Blocks the calling thread. The screen is released on every way out of
    /// the loop, including a panic in a handler, which is then propagated.
    /// Fails with [`Error::AlreadyRunning`] while another `run` owns a screen.
    pub fn run(&self) -> Result<()> {
        let screen = (self.factory)(&self.config).map_err(Error::BackendInit)?;
        {
            let mut state = self.state.write();
            if state.screen.is_some() {
                return Err(Error::AlreadyRunning);
            }
            screen.init().map_err(Error::BackendInit)?;
            state.screen = Some(screen);
            state.suspended = false;
        }
        info!("Application started");

        let teardown = TeardownGuard::new(self);
        self.draw();

        loop {
            let Some(screen) = self.state.read().screen.clone() else {
                break;
            };

            match screen.poll_event() {
                Some(event) => {
                    trace!(?event, "Dispatching event");
                    self.dispatch(screen.as_ref(), event);
                }
                None if self.state.read().suspended => {
                    // The screen is handed to a suspend closure on another thread
                    std::thread::sleep(Duration::from_millis(self.config.poll_interval_ms.max(1)));
                }
                None => break,
            }
        }

        drop(teardown);
        info!("Application finished");
        Ok(())
    }

    /// Release the screen; the loop exits on its next poll
    ///
    /// Safe to call any number of times, and before `run`.
    pub fn stop(&self) {
        let screen = self.state.write().screen.take();
        if let Some(screen) = screen {
            info!("Stopping application");
            screen.fini();
        }
    }

    /// Replace the root primitive and give it focus
    ///
    /// With `fullscreen` the root is resized to the whole screen on every
    /// draw.
    pub fn set_root(&self, root: Arc<dyn Primitive>, fullscreen: bool) -> &Self {
        {
            let mut state = self.state.write();
            state.root = Some(root.clone());
            state.root_fullscreen = fullscreen;
            if let Some(screen) = &state.screen {
                screen.clear();
            }
        }
        debug!(fullscreen, "Root primitive replaced");
        self.set_focus(root)
    }

    /// Move focus to `primitive`
    ///
    /// The previous focus is blurred first; the new one's `focus` then runs
    /// with a callback that routes back here, so it may pass focus on.
    /// Concurrent calls run one whole transition at a time, so a `blur` or
    /// `focus` callback must not wait on another thread calling `set_focus`.
    pub fn set_focus(&self, primitive: Arc<dyn Primitive>) -> &Self {
        let _transition = self.focus_lock.lock();
        let previous = {
            let mut state = self.state.write();
            let previous = state
                .focus
                .replace(Arc::downgrade(&primitive))
                .and_then(|weak| weak.upgrade());
            if let Some(screen) = &state.screen {
                screen.hide_cursor();
            }
            previous
        };

        if let Some(previous) = previous {
            if !same_primitive(&previous, &primitive) {
                previous.blur();
            }
        }
        debug!("Focus changed");
        primitive.focus(&|next| {
            self.set_focus(next);
        });
        self
    }

    /// The focused primitive, if it is still alive
    pub fn get_focus(&self) -> Option<Arc<dyn Primitive>> {
        self.state.read().focus.as_ref().and_then(Weak::upgrade)
    }

    /// The root primitive
    pub fn get_root(&self) -> Option<Arc<dyn Primitive>> {
        self.state.read().root.clone()
    }

    pub fn set_input_capture<F>(&self, capture: F) -> &Self
    where
        F: Fn(Event) -> Option<Event> + Send + Sync + 'static,
    {
        self.state.write().input_capture = Some(Arc::new(capture));
        self
    }

    pub fn clear_input_capture(&self) -> &Self {
        self.state.write().input_capture = None;
        self
    }

    pub fn get_input_capture(&self) -> Option<InputCapture> {
        self.state.read().input_capture.clone()
    }

    /// Install the hook run before the root is drawn
    ///
    /// Draw hooks run while the draw lock is held, so a hook must not wait on
    /// another thread that calls `draw`.
    pub fn set_before_draw_func<F>(&self, hook: F) -> &Self
    where
        F: Fn(&dyn Screen) -> bool + Send + Sync + 'static,
    {
        self.state.write().before_draw = Some(Arc::new(hook));
        self
    }

    pub fn clear_before_draw_func(&self) -> &Self {
        self.state.write().before_draw = None;
        self
    }

    pub fn get_before_draw_func(&self) -> Option<BeforeDraw> {
        self.state.read().before_draw.clone()
    }

    /// Install the hook run after the root is drawn
    ///
    /// Runs under the draw lock like the before-draw hook.
    pub fn set_after_draw_func<F>(&self, hook: F) -> &Self
    where
        F: Fn(&dyn Screen) + Send + Sync + 'static,
    {
        self.state.write().after_draw = Some(Arc::new(hook));
        self
    }

    pub fn clear_after_draw_func(&self) -> &Self {
        self.state.write().after_draw = None;
        self
    }

    pub fn get_after_draw_func(&self) -> Option<AfterDraw> {
        self.state.read().after_draw.clone()
    }

    /// Resize `primitive` to cover the whole screen (no-op when not running)
    pub fn resize_to_full_screen(&self, primitive: &dyn Primitive) -> &Self {
        let size = self.state.read().screen.as_ref().map(|screen| screen.size());
        if let Some(size) = size {
            primitive.set_rect(Rect::from_size(size));
        }
        self
    }

    /// Hand the terminal back to the user while `f` runs
    ///
    /// Returns false without calling `f` when the application is not running
    /// or is already suspended. Afterwards the display is cleared and
    /// redrawn. A panic in `f` stops the application before propagating.
    pub fn suspend(&self, f: impl FnOnce()) -> bool {
        let screen = {
            let mut state = self.state.write();
            match (state.screen.clone(), state.suspended) {
                (Some(screen), false) => {
                    state.suspended = true;
                    screen
                }
                _ => return false,
            }
        };

        info!("Suspending application");
        if let Err(e) = screen.suspend() {
            warn!("Failed to suspend screen: {}", e);
            self.state.write().suspended = false;
            return false;
        }

        let teardown = TeardownGuard::new(self);
        f();
        teardown.disarm();

        if let Err(e) = screen.resume() {
            warn!("Failed to resume screen, stopping: {}", e);
            self.state.write().suspended = false;
            self.stop();
            return true;
        }
        self.state.write().suspended = false;
        info!("Application resumed");

        screen.clear();
        self.draw();
        true
    }
}
