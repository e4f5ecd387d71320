//! Errors surfaced by the application controller

use thiserror::Error;

/// Failures of [`Application::run`](crate::Application::run)
///
/// Everything else the controller does is infallible; widget-local failures
/// have their own error types and never cross into the controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The screen could not be brought up; the event loop never started
    #[error("failed to initialise screen: {0}")]
    BackendInit(#[source] std::io::Error),

    /// `run` was called while another `run` still owns a screen
    #[error("application is already running")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, Error>;
