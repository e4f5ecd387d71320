//! Event routing
//!
//! Pointer events go to the root, which hit-tests its own children. Key and
//! character events go to the primitive focused when the event arrived,
//! after the capture hook and the quit check. Key releases only take part in
//! the quit check.

use super::Application;
use crate::event::{Event, MouseEvent};
use crate::primitive::Primitive;
use crate::screen::Screen;
use std::sync::Arc;
use tracing::{debug, info, trace};

impl Application {
    pub(super) fn dispatch(&self, screen: &dyn Screen, event: Event) {
        match event {
            Event::Resize { width, height } => {
                debug!(width, height, "Screen resized");
                screen.clear();
                self.draw();
            }
            Event::Mouse(mouse) => self.route_mouse(&mouse),
            Event::Key(_) | Event::Character(_) => self.route_input(screen, event),
        }
    }

    fn route_mouse(&self, mouse: &MouseEvent) {
        let Some(root) = self.get_root() else {
            return;
        };
        let Some(handler) = root.mouse_handler() else {
            return;
        };
        handler(mouse, &|next: Arc<dyn Primitive>| {
            self.set_focus(next);
        });
        drop(handler);
        self.draw();
    }

    fn route_input(&self, screen: &dyn Screen, event: Event) {
        // A focus change made by the capture hook applies to the next event
        let focused = self.get_focus();

        if event.is_release() {
            if event.is_quit() {
                info!("Quit key released");
                self.stop();
            }
            return;
        }

        let capture = self.get_input_capture();
        let event = match capture {
            Some(capture) => match capture(event) {
                Some(event) => event,
                None => {
                    debug!("Input swallowed by capture hook");
                    return;
                }
            },
            None => event,
        };

        if event.is_quit() {
            info!("Quit key pressed");
            self.stop();
            return;
        }
        if event.is_release() {
            return;
        }
        if !event.is_keyboard() {
            // The capture hook substituted a different kind of event
            return self.dispatch(screen, event);
        }

        let Some(focused) = focused else {
            trace!("No focused primitive");
            return;
        };
        let request_focus = |next: Arc<dyn Primitive>| {
            self.set_focus(next);
        };

        let handled = match &event {
            Event::Key(key) => match focused.key_handler() {
                Some(handler) => {
                    handler(key, &request_focus);
                    true
                }
                None => false,
            },
            Event::Character(ch) => match focused.character_handler() {
                Some(handler) => {
                    handler(ch, &request_focus);
                    true
                }
                None => false,
            },
            _ => false,
        };

        if handled {
            self.draw();
        }
    }
}
