//! Shared geometry, border and title state embedded by every widget

use super::{focus_guard, Handler, Primitive, RequestFocus};
use crate::geometry::Rect;
use crate::screen::Screen;
use crate::style::{print, Alignment, Color, Style};
use crate::theme::Theme;
use parking_lot::RwLock;

/// Border line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Single line border (─ │ ┌ ┐ └ ┘)
    #[default]
    Single,
    /// Double line border (═ ║ ╔ ╗ ╚ ╝)
    Double,
    /// Rounded corners (─ │ ╭ ╮ ╰ ╯)
    Rounded,
    /// Heavy/thick border (━ ┃ ┏ ┓ ┗ ┛)
    Heavy,
}

impl BorderType {
    /// Horizontal, vertical, then the corners clockwise from top-left
    fn glyphs(&self) -> [char; 6] {
        match self {
            BorderType::Single => ['─', '│', '┌', '┐', '┘', '└'],
            BorderType::Double => ['═', '║', '╔', '╗', '╝', '╚'],
            BorderType::Rounded => ['─', '│', '╭', '╮', '╯', '╰'],
            BorderType::Heavy => ['━', '┃', '┏', '┓', '┛', '┗'],
        }
    }
}

#[derive(Debug, Clone)]
struct BlockState {
    rect: Rect,
    border: bool,
    border_type: BorderType,
    title: String,
    title_alignment: Alignment,
    background: Color,
    border_color: Color,
    /// Border color while focused
    border_focused: Color,
    title_color: Color,
    has_focus: bool,
}

/// Rectangle with optional border and title
///
/// Widgets hold a `Block` and delegate geometry, focus flag and background
/// painting to it. A `Block` is also a usable primitive on its own.
#[derive(Debug)]
pub struct Block {
    state: RwLock<BlockState>,
}

impl Block {
    /// Create a borderless block colored from `theme`
    pub fn new(theme: &Theme) -> Self {
        Self {
            state: RwLock::new(BlockState {
                rect: Rect::empty(),
                border: false,
                border_type: BorderType::default(),
                title: String::new(),
                title_alignment: Alignment::Center,
                background: theme.primitive_background,
                border_color: theme.border,
                border_focused: theme.border,
                title_color: theme.title,
                has_focus: false,
            }),
        }
    }

    pub fn set_border(&self, border: bool) -> &Self {
        self.state.write().border = border;
        self
    }

    pub fn set_border_type(&self, border_type: BorderType) -> &Self {
        self.state.write().border_type = border_type;
        self
    }

    pub fn set_title(&self, title: impl Into<String>) -> &Self {
        self.state.write().title = title.into();
        self
    }

    pub fn set_title_alignment(&self, alignment: Alignment) -> &Self {
        self.state.write().title_alignment = alignment;
        self
    }

    pub fn set_background_color(&self, color: Color) -> &Self {
        self.state.write().background = color;
        self
    }

    pub fn set_border_color(&self, color: Color) -> &Self {
        self.state.write().border_color = color;
        self
    }

    /// Border color used while the block has focus
    pub fn set_border_focused_color(&self, color: Color) -> &Self {
        self.state.write().border_focused = color;
        self
    }

    pub fn set_title_color(&self, color: Color) -> &Self {
        self.state.write().title_color = color;
        self
    }

    pub fn background_color(&self) -> Color {
        self.state.read().background
    }

    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    pub fn has_border(&self) -> bool {
        self.state.read().border
    }

    /// Wrap a raw handler with the focus guard bound to this block
    pub fn wrap_handler<'a, E: 'a>(
        &'a self,
        raw: impl Fn(&E, RequestFocus<'_>) + 'a,
    ) -> Handler<'a, E> {
        focus_guard(self, raw)
    }

    fn draw_border(&self, screen: &dyn Screen, state: &BlockState) {
        let rect = state.rect;
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let color = if state.has_focus {
            state.border_focused
        } else {
            state.border_color
        };
        let style = Style::new().fg(color).bg(state.background);
        let [horizontal, vertical, top_left, top_right, bottom_right, bottom_left] =
            state.border_type.glyphs();
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        for x in rect.x + 1..right {
            screen.set_content(x, rect.y, horizontal, style);
            screen.set_content(x, bottom, horizontal, style);
        }
        for y in rect.y + 1..bottom {
            screen.set_content(rect.x, y, vertical, style);
            screen.set_content(right, y, vertical, style);
        }
        screen.set_content(rect.x, rect.y, top_left, style);
        screen.set_content(right, rect.y, top_right, style);
        screen.set_content(right, bottom, bottom_right, style);
        screen.set_content(rect.x, bottom, bottom_left, style);

        if !state.title.is_empty() && rect.width >= 4 {
            print(
                screen,
                &state.title,
                rect.x + 1,
                rect.y,
                rect.width - 2,
                state.title_alignment,
                state.title_color,
            );
        }
    }
}

impl Primitive for Block {
    /// Clear the rect with the background, then paint border and title
    fn draw(&self, screen: &dyn Screen) {
        let state = self.state.read().clone();
        let fill = Style::new().bg(state.background);
        for (x, y) in state.rect.positions() {
            screen.set_content(x, y, ' ', fill);
        }
        if state.border {
            self.draw_border(screen, &state);
        }
    }

    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        self.state.write().rect = rect;
    }

    fn inner_rect(&self) -> Rect {
        let state = self.state.read();
        if state.border {
            state.rect.inner(1)
        } else {
            state.rect
        }
    }

    fn focus(&self, _request_focus: RequestFocus<'_>) {
        self.state.write().has_focus = true;
    }

    fn blur(&self) {
        self.state.write().has_focus = false;
    }

    fn has_focus(&self) -> bool {
        self.state.read().has_focus
    }
}
