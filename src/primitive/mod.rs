//! The capability set every drawable, focusable node implements

mod block;
mod listener;

pub use block::{Block, BorderType};
pub use listener::Listener;

use crate::event::{KeyEvent, MouseEvent};
use crate::geometry::Rect;
use crate::screen::Screen;
use std::sync::Arc;

/// Callback through which a primitive asks the application to move focus
pub type RequestFocus<'a> = &'a dyn Fn(Arc<dyn Primitive>);

/// An input handler bound to the primitive that produced it
pub type Handler<'a, E> = Box<dyn Fn(&E, RequestFocus<'_>) + 'a>;

/// A node of the widget tree
///
/// Every method takes `&self`. Implementations keep their mutable state
/// behind their own locks and must not hold them while calling the
/// `request_focus` callback or any listener, since both may re-enter the
/// application and from there this primitive.
pub trait Primitive: Send + Sync {
    /// Paint onto `screen` within the current rect
    fn draw(&self, screen: &dyn Screen);

    fn rect(&self) -> Rect;

    fn set_rect(&self, rect: Rect);

    /// Interior left once border and title are reserved
    fn inner_rect(&self) -> Rect;

    /// Called when this primitive becomes the focus; may redirect focus
    /// through `request_focus`
    fn focus(&self, request_focus: RequestFocus<'_>);

    /// Called when this primitive loses focus
    fn blur(&self);

    fn has_focus(&self) -> bool;

    fn key_handler(&self) -> Option<Handler<'_, KeyEvent>> {
        None
    }

    fn mouse_handler(&self) -> Option<Handler<'_, MouseEvent>> {
        None
    }

    /// Handler for text input (pasted characters)
    fn character_handler(&self) -> Option<Handler<'_, char>> {
        None
    }
}

/// Wrap `raw` so it only runs while `owner` has focus
///
/// An event can be routed to a primitive that loses focus before its handler
/// runs; the guard turns the stale invocation into a no-op.
pub fn focus_guard<'a, P, E>(
    owner: &'a P,
    raw: impl Fn(&E, RequestFocus<'_>) + 'a,
) -> Handler<'a, E>
where
    P: Primitive + ?Sized,
    E: 'a,
{
    Box::new(move |event: &E, request_focus: &dyn Fn(Arc<dyn Primitive>)| {
        if owner.has_focus() {
            raw(event, request_focus);
        }
    })
}

/// Whether two handles refer to the same primitive
pub fn same_primitive(a: &Arc<dyn Primitive>, b: &Arc<dyn Primitive>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{press, KeyCode};
    use crate::theme::Theme;
    use parking_lot::Mutex;

    #[test]
    fn test_focus_guard_skips_unfocused_owner() {
        let block = Block::new(&Theme::default());
        let calls = Mutex::new(0);
        let handler = focus_guard(&block, |_: &KeyEvent, _| *calls.lock() += 1);

        handler(&press(KeyCode::Enter), &|_| {});
        assert_eq!(*calls.lock(), 0);

        block.focus(&|_| {});
        handler(&press(KeyCode::Enter), &|_| {});
        assert_eq!(*calls.lock(), 1);

        block.blur();
        handler(&press(KeyCode::Enter), &|_| {});
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn test_same_primitive() {
        let a: Arc<dyn Primitive> = Arc::new(Block::new(&Theme::default()));
        let b: Arc<dyn Primitive> = Arc::new(Block::new(&Theme::default()));
        assert!(same_primitive(&a, &a.clone()));
        assert!(!same_primitive(&a, &b));
    }
}
