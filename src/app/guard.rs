//! Scoped teardown of the screen

use super::Application;
use tracing::error;

/// Stops the application when dropped, including during unwinding
///
/// `run` holds one for the whole loop; `suspend` holds one around the user
/// closure and disarms it on the normal path.
pub(super) struct TeardownGuard<'a> {
    app: &'a Application,
    armed: bool,
}

impl<'a> TeardownGuard<'a> {
    pub(super) fn new(app: &'a Application) -> Self {
        Self { app, armed: true }
    }

    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TeardownGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if std::thread::panicking() {
            error!("Panic inside the event loop, releasing the screen");
        }
        self.app.state.write().suspended = false;
        self.app.stop();
    }
}
