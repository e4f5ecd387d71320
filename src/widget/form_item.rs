//! Capabilities shared by widgets that can sit in a form

use crate::event::KeyEvent;
use crate::primitive::Primitive;
use crate::style::Color;
use std::sync::Arc;

/// Listener told which key ended input (Enter, Tab, BackTab or Esc)
pub type DoneFunc = dyn Fn(KeyEvent) + Send + Sync;

/// A labelled input field
pub trait FormItem: Primitive {
    fn label(&self) -> String;

    /// Apply the look shared by all items of a form in one call
    fn set_form_attributes(
        &self,
        label: &str,
        label_color: Color,
        background: Color,
        field_text_color: Color,
        field_background: Color,
    );

    /// Width of the input area in cells, 0 when it extends to the edge
    fn field_width(&self) -> u16;

    /// Called when the user leaves the item with one of the done keys
    fn set_finished_func(&self, f: Arc<DoneFunc>);
}
