//! Single-line text entry

use super::{DoneFunc, FormItem};
use crate::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::geometry::Rect;
use crate::primitive::{Block, Handler, Listener, Primitive, RequestFocus};
use crate::screen::Screen;
use crate::style::{print, string_width, Alignment, Color, Style};
use crate::theme::Theme;
use parking_lot::RwLock;
use std::sync::Arc;

/// Decides whether the text as it would be after typing `ch` is allowed
pub type AcceptFunc = dyn Fn(&str, char) -> bool + Send + Sync;

/// Accept only text that parses as a (possibly signed) integer
pub fn accept_integer(text: &str, _ch: char) -> bool {
    text == "-" || text == "+" || text.parse::<i64>().is_ok()
}

/// Accept only text that parses as a floating point number
pub fn accept_float(text: &str, ch: char) -> bool {
    accept_integer(text, ch) || text == "." || text.parse::<f64>().is_ok()
}

/// Accept text of at most `max` characters
pub fn accept_max_length(max: usize) -> impl Fn(&str, char) -> bool + Send + Sync + 'static {
    move |text: &str, _ch: char| text.chars().count() <= max
}

#[derive(Clone)]
struct InputState {
    text: String,
    label: String,
    placeholder: String,
    label_color: Color,
    field_background: Color,
    field_text_color: Color,
    placeholder_color: Color,
    /// 0 extends the field to the right edge
    field_width: u16,
    mask: Option<char>,
    accept: Option<Arc<AcceptFunc>>,
}

/// A label followed by an editable line of text
///
/// Text is appended at the end and removed from the end; there is no cursor
/// movement inside the text.
pub struct InputField {
    block: Block,
    state: RwLock<InputState>,
    changed: Listener<dyn Fn(&str) + Send + Sync>,
    done: Listener<DoneFunc>,
}

impl InputField {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            state: RwLock::new(InputState {
                text: String::new(),
                label: String::new(),
                placeholder: String::new(),
                label_color: theme.secondary_text,
                field_background: theme.contrast_background,
                field_text_color: theme.primary_text,
                placeholder_color: theme.contrast_secondary_text,
                field_width: 0,
                mask: None,
                accept: None,
            }),
            changed: Listener::new(),
            done: Listener::new(),
        }
    }

    /// The embedded block, for border, title and background
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Replace the text; fires `changed`
    pub fn set_text(&self, text: impl Into<String>) -> &Self {
        let text = text.into();
        self.state.write().text = text.clone();
        if let Some(changed) = self.changed.get() {
            changed(&text);
        }
        self
    }

    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    pub fn set_label(&self, label: impl Into<String>) -> &Self {
        self.state.write().label = label.into();
        self
    }

    /// Text shown while the field is empty
    pub fn set_placeholder(&self, placeholder: impl Into<String>) -> &Self {
        self.state.write().placeholder = placeholder.into();
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

    pub fn set_placeholder_color(&self, color: Color) -> &Self {
        self.state.write().placeholder_color = color;
        self
    }

    /// Width of the input area; 0 extends it to the right edge
    pub fn set_field_width(&self, width: u16) -> &Self {
        self.state.write().field_width = width;
        self
    }

    /// Show every character as `mask` (for passwords)
    pub fn set_mask_character(&self, mask: Option<char>) -> &Self {
        self.state.write().mask = mask;
        self
    }

    pub fn set_acceptance_func(
        &self,
        accept: impl Fn(&str, char) -> bool + Send + Sync + 'static,
    ) -> &Self {
        self.state.write().accept = Some(Arc::new(accept));
        self
    }

    /// Called with the new text after every user edit and from `set_text`
    pub fn set_changed_func(&self, f: impl Fn(&str) + Send + Sync + 'static) -> &Self {
        self.changed.set(Arc::new(f));
        self
    }

    pub fn set_done_func(&self, f: impl Fn(KeyEvent) + Send + Sync + 'static) -> &Self {
        self.done.set(Arc::new(f));
        self
    }

    /// Append `ch` if the acceptance function allows it
    fn append(&self, ch: char) {
        let accept = self.state.read().accept.clone();
        let mut candidate = self.text();
        candidate.push(ch);
        if accept.is_some_and(|accept| !accept(&candidate, ch)) {
            return;
        }
        self.state.write().text = candidate;
    }

    /// Run one edit and fire `changed` if it altered the text
    fn edit(&self, f: impl FnOnce()) {
        let before = self.text();
        f();
        let after = self.text();
        if after != before {
            if let Some(changed) = self.changed.get() {
                changed(&after);
            }
        }
    }

    fn field_area(&self, inner: Rect, label: &str, field_width: u16) -> Rect {
        let label_width = (string_width(label) as u16).min(inner.width);
        let x = inner.x + label_width;
        let available = inner.right().saturating_sub(x);
        let width = match field_width {
            0 => available,
            w => w.min(available),
        };
        Rect::new(x, inner.y, width, 1)
    }
}

impl Primitive for InputField {
    fn draw(&self, screen: &dyn Screen) {
        self.block.draw(screen);

        let inner = self.block.inner_rect();
        if inner.is_empty() {
            return;
        }
        let state = self.state.read().clone();

        print(
            screen,
            &state.label,
            inner.x,
            inner.y,
            inner.width,
            Alignment::Left,
            state.label_color,
        );
        let field = self.field_area(inner, &state.label, state.field_width);
        if field.is_empty() {
            return;
        }

        let fill = Style::new().bg(state.field_background);
        for (x, y) in field.positions() {
            screen.set_content(x, y, ' ', fill);
        }

        if state.text.is_empty() && !state.placeholder.is_empty() {
            print(
                screen,
                &state.placeholder,
                field.x,
                field.y,
                field.width,
                Alignment::Left,
                state.placeholder_color,
            );
        }

        let shown = match state.mask {
            Some(mask) => std::iter::repeat(mask).take(state.text.chars().count()).collect(),
            None => state.text.clone(),
        };
        // One cell stays free for the cursor
        let room = field.width.saturating_sub(1);
        let text_width = string_width(&shown) as u16;
        let align = if text_width > room {
            Alignment::Right
        } else {
            Alignment::Left
        };
        print(
            screen,
            &shown,
            field.x,
            field.y,
            room,
            align,
            state.field_text_color,
        );

        if self.has_focus() {
            let cursor = field.x + text_width.min(room);
            screen.show_cursor(cursor.min(field.right().saturating_sub(1)), field.y);
        }
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
        Some(self.block.wrap_handler(|event: &KeyEvent, _| {
            match event.code {
                KeyCode::Char(ch)
                    if !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.edit(|| self.append(ch));
                }
                KeyCode::Backspace => self.edit(|| {
                    self.state.write().text.pop();
                }),
                KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                    if let Some(done) = self.done.get() {
                        done(*event);
                    }
                }
                _ => {}
            }
        }))
    }

    /// Pasted text arrives one character at a time
    fn character_handler(&self) -> Option<Handler<'_, char>> {
        Some(self.block.wrap_handler(|ch: &char, _| {
            if !ch.is_control() {
                self.edit(|| self.append(*ch));
            }
        }))
    }
}

impl FormItem for InputField {
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
        self.state.read().field_width
    }

    fn set_finished_func(&self, f: Arc<DoneFunc>) {
        self.done.set(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::press;
    use crate::test_utils::ScriptedScreen;
    use parking_lot::Mutex;

    fn focused_field(width: u16) -> InputField {
        let field = InputField::new(&Theme::default());
        field.set_rect(Rect::new(0, 0, width, 1));
        field.focus(&|_| {});
        field
    }

    fn type_keys(field: &InputField, keys: &[KeyCode]) {
        let handler = field.key_handler().unwrap();
        for key in keys {
            handler(&press(*key), &|_| {});
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let field = focused_field(20);
        let changes = Arc::new(Mutex::new(Vec::new()));
        let log = changes.clone();
        field.set_changed_func(move |text| log.lock().push(text.to_string()));

        type_keys(
            &field,
            &[
                KeyCode::Char('h'),
                KeyCode::Char('i'),
                KeyCode::Backspace,
                KeyCode::Left,
            ],
        );

        assert_eq!(field.text(), "h");
        assert_eq!(*changes.lock(), vec!["h", "hi", "h"]);
    }

    #[test]
    fn test_backspace_on_empty_does_not_fire_changed() {
        let field = focused_field(20);
        let fired = Arc::new(Mutex::new(0));
        let count = fired.clone();
        field.set_changed_func(move |_| *count.lock() += 1);

        type_keys(&field, &[KeyCode::Backspace]);
        assert_eq!(*fired.lock(), 0);
    }

    #[test]
    fn test_acceptance_func() {
        let field = focused_field(20);
        field.set_acceptance_func(accept_integer);
        type_keys(
            &field,
            &[KeyCode::Char('-'), KeyCode::Char('4'), KeyCode::Char('x'), KeyCode::Char('2')],
        );
        assert_eq!(field.text(), "-42");

        let field = focused_field(20);
        field.set_acceptance_func(accept_max_length(2));
        type_keys(&field, &[KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('c')]);
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn test_accept_float() {
        assert!(accept_float("3.5", '5'));
        assert!(accept_float(".", '.'));
        assert!(!accept_float("3.5.", '.'));
    }

    #[test]
    fn test_done_keys() {
        let field = focused_field(20);
        let keys = Arc::new(Mutex::new(Vec::new()));
        let log = keys.clone();
        field.set_done_func(move |key| log.lock().push(key.code));

        type_keys(&field, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Esc]);
        assert_eq!(*keys.lock(), vec![KeyCode::Enter, KeyCode::Tab, KeyCode::Esc]);
    }

    #[test]
    fn test_set_text_fires_changed() {
        let field = InputField::new(&Theme::default());
        let last = Arc::new(Mutex::new(String::new()));
        let log = last.clone();
        field.set_changed_func(move |text| *log.lock() = text.to_string());

        field.set_text("preset");
        assert_eq!(*last.lock(), "preset");
    }

    #[test]
    fn test_character_handler_appends() {
        let field = focused_field(20);
        let handler = field.character_handler().unwrap();
        for ch in "ok\t!".chars() {
            handler(&ch, &|_| {});
        }
        assert_eq!(field.text(), "ok!");
    }

    #[test]
    fn test_draw_label_placeholder_and_cursor() {
        let screen = ScriptedScreen::new(12, 1);
        let field = focused_field(12);
        field.set_label("Name: ").set_placeholder("you");
        field.draw(&screen);

        assert_eq!(screen.row_text(0), "Name: you   ");
        assert_eq!(screen.cursor(), Some((6, 0)));
        assert_eq!(
            screen.get_content(7, 0).unwrap().fg,
            Theme::default().contrast_secondary_text
        );
    }

    #[test]
    fn test_draw_overflow_shows_tail() {
        let screen = ScriptedScreen::new(6, 1);
        let field = focused_field(6);
        field.set_text("abcdefgh");
        field.draw(&screen);

        // Five cells of text, one for the cursor
        assert_eq!(screen.row_text(0), "defgh ");
        assert_eq!(screen.cursor(), Some((5, 0)));
    }

    #[test]
    fn test_draw_mask_and_fixed_width() {
        let screen = ScriptedScreen::new(10, 1);
        let field = focused_field(10);
        field.set_field_width(4).set_mask_character(Some('*'));
        field.set_text("pw");
        field.draw(&screen);

        assert_eq!(screen.row_text(0), "**        ");
        let theme = Theme::default();
        assert_eq!(screen.get_content(3, 0).unwrap().bg, theme.contrast_background);
        assert_eq!(screen.get_content(4, 0).unwrap().bg, theme.primitive_background);
    }
}
