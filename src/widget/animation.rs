//! Text-art animation played over the rest of the interface
//!
//! An animation file holds frames separated by a line containing only `---`.
//! It may start with a `delay: <ms>` header setting the time each frame
//! stays on screen:
//!
//! ```text
//! delay: 80
//!  o
//! ---
//!  O
//! ```
//!
//! Playback runs on its own thread, started by the first draw after a load.
//! The thread only touches the player's frame state and its listeners; the
//! redraw listener is where the application is asked to draw.

use crate::geometry::Rect;
use crate::primitive::{Block, Listener, Primitive, RequestFocus};
use crate::screen::Screen;
use crate::style::{print, Alignment, Color};
use crate::theme::Theme;
use parking_lot::{Mutex, RwLock};
use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Frame delay used when neither the file nor the caller sets one
pub const DEFAULT_DELAY: Duration = Duration::from_millis(60);

const FRAME_SEPARATOR: &str = "---";
const DELAY_HEADER: &str = "delay:";

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("failed to read animation: {0}")]
    Io(#[from] std::io::Error),

    #[error("animation contains no frames")]
    Empty,

    #[error("malformed animation at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Playing,
    Finished,
}

struct PlayerState {
    frames: Vec<Vec<String>>,
    frame: usize,
    delay: Duration,
    mask: Color,
    phase: Phase,
    /// Bumped on every start and rewind so a stale thread can tell it lost
    generation: u64,
}

struct Shared {
    state: RwLock<PlayerState>,
    redraw: Listener<dyn Fn() + Send + Sync>,
    finished: Listener<dyn Fn() + Send + Sync>,
}

impl Shared {
    /// Apply `f` to the state only if `generation` is still current
    fn update_if_current(&self, generation: u64, f: impl FnOnce(&mut PlayerState)) -> bool {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }
        f(&mut state);
        true
    }
}

/// Plays a sequence of text frames, then calls its finished listener
pub struct AnimationPlayer {
    block: Block,
    shared: Arc<Shared>,
    cancel: Mutex<Option<Sender<()>>>,
}

impl AnimationPlayer {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            shared: Arc::new(Shared {
                state: RwLock::new(PlayerState {
                    frames: Vec::new(),
                    frame: 0,
                    delay: DEFAULT_DELAY,
                    mask: theme.graphics,
                    phase: Phase::Idle,
                    generation: 0,
                }),
                redraw: Listener::new(),
                finished: Listener::new(),
            }),
            cancel: Mutex::new(None),
        }
    }

    /// The embedded block, for border, title and background
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Load frames from `path`, replacing any current animation
    pub fn load(&self, path: impl AsRef<Path>) -> Result<&Self, AnimationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.load_str(&text)?;
        debug!("Loaded animation from {}", path.display());
        Ok(self)
    }

    /// Load frames from text in the animation file format
    pub fn load_str(&self, text: &str) -> Result<&Self, AnimationError> {
        let (frames, delay) = parse(text)?;
        self.rewind();
        let mut state = self.shared.state.write();
        state.frames = frames;
        if let Some(delay) = delay {
            state.delay = delay;
        }
        drop(state);
        Ok(self)
    }

    pub fn frame_count(&self) -> usize {
        self.shared.state.read().frames.len()
    }

    /// Index of the frame currently shown
    pub fn current_frame(&self) -> usize {
        self.shared.state.read().frame
    }

    pub fn is_playing(&self) -> bool {
        self.shared.state.read().phase == Phase::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.shared.state.read().phase == Phase::Finished
    }

    /// Time each frame stays on screen; applies from the next playback
    pub fn set_delay(&self, delay: Duration) -> &Self {
        self.shared.state.write().delay = delay;
        self
    }

    /// Color the frames are drawn in
    pub fn set_mask(&self, color: Color) -> &Self {
        self.shared.state.write().mask = color;
        self
    }

    /// Called from the playback thread after every frame change
    pub fn set_redraw_func(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        self.shared.redraw.set(Arc::new(f));
        self
    }

    /// Called from the playback thread once the last frame has been shown
    pub fn set_finished_func(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        self.shared.finished.set(Arc::new(f));
        self
    }

    /// Cancel playback; the current frame stays on screen
    pub fn stop(&self) {
        if let Some(cancel) = self.cancel.lock().take() {
            let _ = cancel.send(());
            let mut state = self.shared.state.write();
            if state.phase == Phase::Playing {
                state.phase = Phase::Idle;
            }
            state.generation += 1;
        }
    }

    /// Back to the first frame; the next draw plays again
    pub fn rewind(&self) {
        self.stop();
        let mut state = self.shared.state.write();
        state.frame = 0;
        state.phase = Phase::Idle;
        state.generation += 1;
    }

    fn start(&self) {
        let (generation, delay, frames) = {
            let mut state = self.shared.state.write();
            if state.phase != Phase::Idle || state.frames.is_empty() {
                return;
            }
            state.phase = Phase::Playing;
            state.generation += 1;
            (state.generation, state.delay, state.frames.len())
        };

        let (tx, rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("cellview-animation".to_string())
            .spawn(move || play(shared, rx, generation, delay, frames));

        match spawned {
            Ok(_) => *self.cancel.lock() = Some(tx),
            Err(e) => {
                warn!("Failed to start animation thread: {}", e);
                self.shared.update_if_current(generation, |state| state.phase = Phase::Idle);
            }
        }
    }
}

/// Body of the playback thread
fn play(
    shared: Arc<Shared>,
    cancel: mpsc::Receiver<()>,
    generation: u64,
    delay: Duration,
    frames: usize,
) {
    debug!(frames, "Animation started");
    for next in 1..=frames {
        match cancel.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!("Animation cancelled");
                return;
            }
        }

        let current = if next < frames {
            shared.update_if_current(generation, |state| state.frame = next)
        } else {
            shared.update_if_current(generation, |state| state.phase = Phase::Finished)
        };
        if !current {
            return;
        }

        if next < frames {
            if let Some(redraw) = shared.redraw.get() {
                redraw();
            }
        }
    }

    debug!("Animation finished");
    if let Some(finished) = shared.finished.get() {
        finished();
    }
}

/// Split animation text into frames and the optional delay header
fn parse(text: &str) -> Result<(Vec<Vec<String>>, Option<Duration>), AnimationError> {
    let mut lines = text.lines().enumerate().peekable();

    let mut delay = None;
    if let Some((index, line)) = lines.peek().copied() {
        if let Some(value) = line.trim().strip_prefix(DELAY_HEADER) {
            let ms: u64 = value.trim().parse().map_err(|_| AnimationError::Malformed {
                line: index + 1,
                reason: format!("invalid delay '{}'", value.trim()),
            })?;
            if ms == 0 {
                return Err(AnimationError::Malformed {
                    line: index + 1,
                    reason: "delay must be greater than 0".to_string(),
                });
            }
            delay = Some(Duration::from_millis(ms));
            lines.next();
        }
    }

    let mut frames = Vec::new();
    let mut frame = Vec::new();
    for (_, line) in lines {
        if line.trim_end() == FRAME_SEPARATOR {
            if !frame.is_empty() {
                frames.push(std::mem::take(&mut frame));
            }
        } else {
            frame.push(line.to_string());
        }
    }
    if !frame.is_empty() {
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(AnimationError::Empty);
    }
    Ok((frames, delay))
}

impl Drop for AnimationPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Primitive for AnimationPlayer {
    /// Paint the current frame, starting playback if it has not started
    fn draw(&self, screen: &dyn Screen) {
        self.block.draw(screen);
        self.start();

        let inner = self.block.inner_rect();
        let state = self.shared.state.read();
        let Some(frame) = state.frames.get(state.frame) else {
            return;
        };
        for (row, line) in frame.iter().enumerate().take(inner.height as usize) {
            print(
                screen,
                line,
                inner.x,
                inner.y + row as u16,
                inner.width,
                Alignment::Left,
                state.mask,
            );
        }
    }

    fn rect(&self) -> Rect {
        self.block.rect()
    }

    fn set_rect(&self, rect: Rect) {
        self.block.set_rect(rect);
    }

    fn inner_rect(&self) -> Rect {
        self.block.inner_rect()
    }

    fn focus(&self, request_focus: RequestFocus<'_>) {
        self.block.focus(request_focus);
    }

    fn blur(&self) {
        self.block.blur();
    }

    fn has_focus(&self) -> bool {
        self.block.has_focus()
    }
}
