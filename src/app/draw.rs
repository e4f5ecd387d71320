//! Draw orchestration

use super::Application;
use crate::geometry::Rect;

impl Application {
    /// Draw the root onto the screen and flush it
    ///
    /// A no-op until both a screen and a root exist. The before-draw hook
    /// may take over the frame by returning true, in which case neither the
    /// root nor the after-draw hook runs. The screen is flushed exactly once
    /// whenever something was drawn.
    pub fn draw(&self) -> &Self {
        let _frame = self.draw_lock.lock();

        let (screen, root, fullscreen, before_draw, after_draw) = {
            let state = self.state.read();
            (
                state.screen.clone(),
                state.root.clone(),
                state.root_fullscreen,
                state.before_draw.clone(),
                state.after_draw.clone(),
            )
        };
        let (Some(screen), Some(root)) = (screen, root) else {
            return self;
        };

        if fullscreen {
            root.set_rect(Rect::from_size(screen.size()));
        }

        if let Some(before_draw) = before_draw {
            if before_draw(screen.as_ref()) {
                screen.show();
                return self;
            }
        }

        root.draw(screen.as_ref());
        if let Some(after_draw) = after_draw {
            after_draw(screen.as_ref());
        }
        screen.show();
        self
    }
}
