//! A box for a boolean value

use super::{DoneFunc, FormItem};
use crate::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::geometry::{Point, Rect};
use crate::primitive::{Block, Handler, Listener, Primitive, RequestFocus};
use crate::screen::Screen;
use crate::style::{print, Alignment, Color, Style};
use crate::theme::Theme;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct CheckboxState {
    checked: bool,
    label: String,
    label_color: Color,
    field_background: Color,
    field_text_color: Color,
}

/// A label followed by a one-cell field showing `X` when checked
pub struct Checkbox {
    block: Block,
    state: RwLock<CheckboxState>,
    changed: Listener<dyn Fn(bool) + Send + Sync>,
    done: Listener<DoneFunc>,
}

impl Checkbox {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            state: RwLock::new(CheckboxState {
                checked: false,
                label: String::new(),
                label_color: theme.secondary_text,
                field_background: theme.contrast_background,
                field_text_color: theme.primary_text,
            }),
            changed: Listener::new(),
            done: Listener::new(),
        }
    }

    /// The embedded block, for border, title and background
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Set the checked state without firing `changed`
    pub fn set_checked(&self, checked: bool) -> &Self {
        self.state.write().checked = checked;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.state.read().checked
    }

    pub fn set_label(&self, label: impl Into<String>) -> &Self {
        self.state.write().label = label.into();
        self
    }

    pub fn set_label_color(&self, color: Color) -> &Self {
        self.state.write().label_color = color;
        self
    }

    pub fn set_field_background_color(&self, color: Color) -> &Self {
        self.state.write().field_background = color;
        self
    }

    pub fn set_field_text_color(&self, color: Color) -> &Self {
        self.state.write().field_text_color = color;
        self
    }

    /// Called with the new state whenever the user toggles the box
    pub fn set_changed_func(&self, f: impl Fn(bool) + Send + Sync + 'static) -> &Self {
        self.changed.set(Arc::new(f));
        self
    }

    pub fn set_done_func(&self, f: impl Fn(KeyEvent) + Send + Sync + 'static) -> &Self {
        self.done.set(Arc::new(f));
        self
    }

    fn toggle(&self) {
        let checked = {
            let mut state = self.state.write();
            state.checked = !state.checked;
            state.checked
        };
        if let Some(changed) = self.changed.get() {
            changed(checked);
        }
    }

    /// Where the field cell was drawn for the current rect
    fn field_position(&self) -> Option<Point> {
        let inner = self.block.inner_rect();
        if inner.is_empty() {
            return None;
        }
        let label_width = crate::style::string_width(&self.state.read().label) as u16;
        let x = inner.x.saturating_add(label_width.min(inner.width));
        (x < inner.right()).then_some(Point::new(x, inner.y))
    }
}

impl Primitive for Checkbox {
    fn draw(&self, screen: &dyn Screen) {
        self.block.draw(screen);

        let inner = self.block.inner_rect();
        if inner.is_empty() {
            return;
        }
        let state = self.state.read().clone();

        let (_, drawn) = print(
            screen,
            &state.label,
            inner.x,
            inner.y,
            inner.width,
            Alignment::Left,
            state.label_color,
        );
        let x = inner.x + drawn;
        if x >= inner.right() {
            return;
        }

        let mut style = Style::new()
            .fg(state.field_text_color)
            .bg(state.field_background);
        if self.has_focus() {
            style = style.inverted();
        }
        let glyph = if state.checked { 'X' } else { ' ' };
        screen.set_content(x, inner.y, glyph, style);
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

    fn key_handler(&self) -> Option<Handler<'_, KeyEvent>> {
        Some(self.block.wrap_handler(|event: &KeyEvent, _| match event.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                if let Some(done) = self.done.get() {
                    done(*event);
                }
            }
            _ => {}
        }))
    }

    /// A left click on the field toggles the box
    fn mouse_handler(&self) -> Option<Handler<'_, MouseEvent>> {
        Some(self.block.wrap_handler(|event: &MouseEvent, _| {
            if event.kind == MouseEventKind::Down(MouseButton::Left)
                && self.field_position() == Some(Point::of_mouse(event))
            {
                self.toggle();
            }
        }))
    }
}

impl FormItem for Checkbox {
    fn label(&self) -> String {
        self.state.read().label.clone()
    }

    fn set_form_attributes(
        &self,
        label: &str,
        label_color: Color,
        background: Color,
        field_text_color: Color,
        field_background: Color,
    ) {
        {
            let mut state = self.state.write();
            state.label = label.to_string();
            state.label_color = label_color;
            state.field_text_color = field_text_color;
            state.field_background = field_background;
        }
        self.block.set_background_color(background);
    }

    fn field_width(&self) -> u16 {
        1
    }

    fn set_finished_func(&self, f: Arc<DoneFunc>) {
        self.done.set(f);
    }
}
