//! Event type and crossterm translation

use super::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use crossterm::event::Event as CrosstermEvent;

/// Input event routed by the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event (press, repeat or release)
    Key(KeyEvent),
    /// A single character of text input, such as a pasted rune
    Character(char),
    /// Pointer movement, button or scroll
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize {
        /// New width in columns
        width: u16,
        /// New height in rows
        height: u16,
    },
}

impl Event {
    /// Check if this is the quit combination (Ctrl+C), whatever its action
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c') | KeyCode::Char('C'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL)
        )
    }

    /// Check if this is a key release
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            })
        )
    }

    /// Check if this is a key or character event
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Event::Key(_) | Event::Character(_))
    }

    /// Get the key event if this is a key event
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Event::Key(key) => Some(key),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Event::Key(key)
    }
}

/// Translate one crossterm event into zero or more events
///
/// A bracketed paste becomes one `Character` per char, with line breaks
/// turned into Enter presses. Terminal focus changes carry no meaning for
/// primitives and are dropped.
pub fn translate(event: CrosstermEvent) -> Vec<Event> {
    match event {
        CrosstermEvent::Key(key) => vec![Event::Key(key)],
        CrosstermEvent::Mouse(mouse) => vec![Event::Mouse(mouse)],
        CrosstermEvent::Resize(width, height) => vec![Event::Resize { width, height }],
        CrosstermEvent::Paste(text) => text
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| match c {
                '\n' => Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                c => Event::Character(c),
            })
            .collect(),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => Vec::new(),
    }
}
