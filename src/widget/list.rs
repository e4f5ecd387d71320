//! A navigable list of items

use crate::event::{KeyCode, KeyEvent};
use crate::geometry::Rect;
use crate::primitive::{Block, Handler, Listener, Primitive, RequestFocus};
use crate::screen::Screen;
use crate::style::{print, Alignment, Color, Style};
use crate::theme::Theme;
use parking_lot::RwLock;
use std::sync::Arc;

/// Rows moved by PageUp and PageDown
const PAGE_STEP: isize = 5;

/// Callback receiving the index and the item it refers to
pub type ItemFunc = dyn Fn(usize, &ListItem) + Send + Sync;

/// One entry of a [`List`]
#[derive(Clone, Default)]
pub struct ListItem {
    pub main_text: String,
    /// Shown on the row below the main text when secondary text is enabled
    pub secondary_text: String,
    /// Typing this character selects the item
    pub shortcut: Option<char>,
    pub selected: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl ListItem {
    pub fn new(main_text: impl Into<String>) -> Self {
        Self {
            main_text: main_text.into(),
            ..Self::default()
        }
    }

    pub fn secondary_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = text.into();
        self
    }

    pub fn shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn on_selected(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.selected = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for ListItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListItem")
            .field("main_text", &self.main_text)
            .field("secondary_text", &self.secondary_text)
            .field("shortcut", &self.shortcut)
            .field("selected", &self.selected.is_some())
            .finish()
    }
}

#[derive(Clone)]
struct ListState {
    items: Vec<ListItem>,
    current: usize,
    show_secondary: bool,
    main_text_color: Color,
    secondary_text_color: Color,
    shortcut_color: Color,
    selected_text_color: Color,
    selected_background: Color,
}

/// What a key press asked the list to do
enum Action {
    Move(isize),
    Jump(usize),
    /// Make the item current, then select it
    Shortcut(usize),
    Select,
    Done,
}

pub struct List {
    block: Block,
    state: RwLock<ListState>,
    changed: Listener<ItemFunc>,
    selected: Listener<ItemFunc>,
    done: Listener<dyn Fn() + Send + Sync>,
}

impl List {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            state: RwLock::new(ListState {
                items: Vec::new(),
                current: 0,
                show_secondary: true,
                main_text_color: theme.primary_text,
                secondary_text_color: theme.tertiary_text,
                shortcut_color: theme.secondary_text,
                selected_text_color: theme.primitive_background,
                selected_background: theme.primary_text,
            }),
            changed: Listener::new(),
            selected: Listener::new(),
            done: Listener::new(),
        }
    }

    /// The embedded block, for border, title and background
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Append an item; adding the first item fires `changed`
    pub fn add_item(&self, item: ListItem) -> &Self {
        let first = {
            let mut state = self.state.write();
            state.items.push(item);
            state.items.len() == 1
        };
        if first {
            self.fire_changed();
        }
        self
    }

    /// Remove every item
    pub fn clear(&self) -> &Self {
        {
            let mut state = self.state.write();
            state.items.clear();
            state.current = 0;
        }
        self
    }

    pub fn item_count(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn item(&self, index: usize) -> Option<ListItem> {
        self.state.read().items.get(index).cloned()
    }

    /// Make `index` the current item and fire `changed`
    ///
    /// Indices past the end are clamped to the last item.
    pub fn set_current_item(&self, index: usize) -> &Self {
        {
            let mut state = self.state.write();
            state.current = index.min(state.items.len().saturating_sub(1));
        }
        self.fire_changed();
        self
    }

    pub fn current_item(&self) -> usize {
        self.state.read().current
    }

    pub fn show_secondary_text(&self, show: bool) -> &Self {
        self.state.write().show_secondary = show;
        self
    }

    pub fn set_main_text_color(&self, color: Color) -> &Self {
        self.state.write().main_text_color = color;
        self
    }

    pub fn set_secondary_text_color(&self, color: Color) -> &Self {
        self.state.write().secondary_text_color = color;
        self
    }

    pub fn set_shortcut_color(&self, color: Color) -> &Self {
        self.state.write().shortcut_color = color;
        self
    }

    pub fn set_selected_text_color(&self, color: Color) -> &Self {
        self.state.write().selected_text_color = color;
        self
    }

    pub fn set_selected_background_color(&self, color: Color) -> &Self {
        self.state.write().selected_background = color;
        self
    }

    /// Called when the current item changes
    pub fn set_changed_func(&self, f: impl Fn(usize, &ListItem) + Send + Sync + 'static) -> &Self {
        self.changed.set(Arc::new(f));
        self
    }

    /// Called when an item is selected with Enter, space or its shortcut
    pub fn set_selected_func(&self, f: impl Fn(usize, &ListItem) + Send + Sync + 'static) -> &Self {
        self.selected.set(Arc::new(f));
        self
    }

    /// Called when Esc is pressed
    pub fn set_done_func(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        self.done.set(Arc::new(f));
        self
    }

    fn current(&self) -> Option<(usize, ListItem)> {
        let state = self.state.read();
        state
            .items
            .get(state.current)
            .map(|item| (state.current, item.clone()))
    }

    fn fire_changed(&self) {
        let Some((index, item)) = self.current() else {
            return;
        };
        if let Some(changed) = self.changed.get() {
            changed(index, &item);
        }
    }

    fn fire_selected(&self) {
        let Some((index, item)) = self.current() else {
            return;
        };
        if let Some(selected) = &item.selected {
            selected();
        }
        if let Some(selected) = self.selected.get() {
            selected(index, &item);
        }
    }

    fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        let action = match event.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => Action::Move(1),
            KeyCode::Up | KeyCode::Left => Action::Move(-1),
            KeyCode::Home => Action::Jump(0),
            KeyCode::End => Action::Jump(usize::MAX),
            KeyCode::PageDown => Action::Move(PAGE_STEP),
            KeyCode::PageUp => Action::Move(-PAGE_STEP),
            KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
            KeyCode::Esc => Action::Done,
            KeyCode::Char(ch) => Action::Shortcut(
                self.state
                    .read()
                    .items
                    .iter()
                    .position(|item| item.shortcut == Some(ch))?,
            ),
            _ => return None,
        };
        Some(action)
    }

    /// Index after moving `delta` from `current`; leaving either end wraps
    /// to the other
    fn wrapped(current: usize, delta: isize, len: usize) -> usize {
        let target = current as isize + delta;
        if target < 0 {
            len - 1
        } else if target as usize >= len {
            0
        } else {
            target as usize
        }
    }

    fn handle_key(&self, event: &KeyEvent) {
        if self.item_count() == 0 {
            if event.code == KeyCode::Esc {
                if let Some(done) = self.done.get() {
                    done();
                }
            }
            return;
        }

        let previous = self.current_item();
        match self.action_for(event) {
            Some(Action::Move(delta)) => {
                let mut state = self.state.write();
                state.current = Self::wrapped(state.current, delta, state.items.len());
            }
            Some(Action::Jump(index)) => {
                let mut state = self.state.write();
                state.current = index.min(state.items.len() - 1);
            }
            Some(Action::Shortcut(index)) => {
                self.state.write().current = index;
                self.fire_selected();
            }
            Some(Action::Select) => self.fire_selected(),
            Some(Action::Done) => {
                if let Some(done) = self.done.get() {
                    done();
                }
            }
            None => {}
        }

        if self.current_item() != previous {
            self.fire_changed();
        }
    }

    /// First item drawn so that the current one stays visible
    fn offset(current: usize, height: usize, show_secondary: bool) -> usize {
        let rows = if show_secondary { height / 2 } else { height };
        if current >= rows {
            current + 1 - rows
        } else {
            0
        }
    }
}

impl Primitive for List {
    fn draw(&self, screen: &dyn Screen) {
        self.block.draw(screen);

        let inner = self.block.inner_rect();
        if inner.is_empty() {
            return;
        }
        let state = self.state.read().clone();

        let mut x = inner.x;
        let mut width = inner.width;
        let show_shortcuts = state.items.iter().any(|item| item.shortcut.is_some());
        if show_shortcuts {
            x = x.saturating_add(4);
            width = width.saturating_sub(4);
        }

        let offset = Self::offset(state.current, inner.height as usize, state.show_secondary);
        let bottom = inner.bottom();
        let mut y = inner.y;

        for (index, item) in state.items.iter().enumerate().skip(offset) {
            if y >= bottom {
                break;
            }

            if let Some(shortcut) = item.shortcut {
                print(
                    screen,
                    &format!("({shortcut})"),
                    inner.x,
                    y,
                    3.min(inner.width),
                    Alignment::Left,
                    state.shortcut_color,
                );
            }

            let (_, drawn) = print(
                screen,
                &item.main_text,
                x,
                y,
                width,
                Alignment::Left,
                state.main_text_color,
            );

            if index == state.current {
                let style = Style::new()
                    .fg(state.selected_text_color)
                    .bg(state.selected_background);
                for cx in x..x + drawn {
                    let ch = screen
                        .get_content(cx, y)
                        .map(|cell| cell.ch())
                        .unwrap_or(' ');
                    screen.set_content(cx, y, ch, style);
                }
            }

            y += 1;
            if y >= bottom {
                break;
            }

            if state.show_secondary {
                print(
                    screen,
                    &item.secondary_text,
                    x,
                    y,
                    width,
                    Alignment::Left,
                    state.secondary_text_color,
                );
                y += 1;
            }
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
        Some(self.block.wrap_handler(|event: &KeyEvent, _| self.handle_key(event)))
    }
}
