//! RAII guard for raw terminal mode

use crate::config::ScreenConfig;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use std::io::{self, stdout};

/// Raw mode plus the terminal features enabled with it
///
/// Dropping the guard undoes exactly the steps that succeeded, so a failure
/// halfway through [`RawModeGuard::enter`] still leaves a usable terminal.
#[derive(Debug, Default)]
pub struct RawModeGuard {
    raw: bool,
    alternate: bool,
    mouse: bool,
    paste: bool,
    key_releases: bool,
}

impl RawModeGuard {
    /// Enable raw mode, the alternate screen and the configured extras
    pub fn enter(config: &ScreenConfig) -> io::Result<Self> {
        let mut guard = Self::default();
        let mut out = stdout();

        enable_raw_mode()?;
        guard.raw = true;
        execute!(out, EnterAlternateScreen, Hide)?;
        guard.alternate = true;

        if config.mouse {
            execute!(out, EnableMouseCapture)?;
            guard.mouse = true;
        }
        if config.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
            guard.paste = true;
        }
        if config.report_key_releases {
            // Not every terminal understands the kitty protocol
            if execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok()
            {
                guard.key_releases = true;
            }
        }
        if let Some(title) = &config.title {
            execute!(out, SetTitle(title))?;
        }

        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best effort: the terminal may already be gone
        let mut out = stdout();
        if self.key_releases {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        if self.paste {
            let _ = execute!(out, DisableBracketedPaste);
        }
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        if self.alternate {
            let _ = execute!(out, LeaveAlternateScreen, Show);
        }
        if self.raw {
            let _ = disable_raw_mode();
        }
    }
}
