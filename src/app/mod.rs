//! Application controller: event loop, focus routing and draw pipeline

mod application;
mod dispatch;
mod draw;
mod guard;

pub use application::{AfterDraw, Application, BeforeDraw, InputCapture};
