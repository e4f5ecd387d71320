//! Container laying its children out in a row or a column

use crate::event::{MouseEvent, MouseEventKind};
use crate::geometry::{Point, Rect};
use crate::layout::{Constraint, Direction, Layout};
use crate::primitive::{Block, Handler, Primitive, RequestFocus};
use crate::screen::Screen;
use crate::theme::Theme;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
struct FlexItem {
    primitive: Arc<dyn Primitive>,
    constraint: Constraint,
    /// Receives focus when the container is focused
    focus: bool,
}

/// Children placed side by side (horizontal) or stacked (vertical)
///
/// Layout happens on every draw, inside the block's inner rect. The
/// container has no key handler of its own: focus is always passed to a
/// child, and pointer events are forwarded to the child under the pointer.
pub struct Flex {
    block: Block,
    direction: RwLock<Direction>,
    items: RwLock<Vec<FlexItem>>,
}

impl Flex {
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            direction: RwLock::new(Direction::default()),
            items: RwLock::new(Vec::new()),
        }
    }

    /// The embedded block, for border, title and background
    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn set_direction(&self, direction: Direction) -> &Self {
        *self.direction.write() = direction;
        self
    }

    /// Append a child sized by `constraint`
    ///
    /// When `focus` is set the child receives focus whenever the container
    /// does; otherwise the first child does.
    pub fn add_item(&self, primitive: Arc<dyn Primitive>, constraint: Constraint, focus: bool) -> &Self {
        self.items.write().push(FlexItem {
            primitive,
            constraint,
            focus,
        });
        self
    }

    /// Remove every child
    pub fn clear(&self) -> &Self {
        self.items.write().clear();
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }

    /// Size and place every child inside the inner rect
    fn layout(&self) -> Vec<Arc<dyn Primitive>> {
        let items = self.items.read().clone();
        let areas = Layout::new(*self.direction.read())
            .constraints(items.iter().map(|item| item.constraint))
            .split(self.block.inner_rect());

        items
            .into_iter()
            .zip(areas)
            .map(|(item, area)| {
                item.primitive.set_rect(area);
                item.primitive
            })
            .collect()
    }

    /// Whether the container or one of its direct children has focus
    pub fn contains_focus(&self) -> bool {
        if self.block.has_focus() {
            return true;
        }
        let children: Vec<_> = self
            .items
            .read()
            .iter()
            .map(|item| item.primitive.clone())
            .collect();
        children.iter().any(|child| child.has_focus())
    }

    fn child_at(&self, point: Point) -> Option<Arc<dyn Primitive>> {
        self.items
            .read()
            .iter()
            .find(|item| item.primitive.rect().contains(point))
            .map(|item| item.primitive.clone())
    }
}

impl Primitive for Flex {
    fn draw(&self, screen: &dyn Screen) {
        self.block.draw(screen);
        for child in self.layout() {
            child.draw(screen);
        }
    }

    fn rect(&self) -> Rect {
        self.block.rect()
    }

    fn set_rect(&self, rect: Rect) {
        self.block.set_rect(rect);
        self.layout();
    }

    fn inner_rect(&self) -> Rect {
        self.block.inner_rect()
    }

    fn focus(&self, request_focus: RequestFocus<'_>) {
        let target = {
            let items = self.items.read();
            items
                .iter()
                .find(|item| item.focus)
                .or_else(|| items.first())
                .map(|item| item.primitive.clone())
        };
        match target {
            Some(child) => request_focus(child),
            None => self.block.focus(request_focus),
        }
    }

    fn blur(&self) {
        self.block.blur();
    }

    fn has_focus(&self) -> bool {
        self.block.has_focus()
    }

    /// Focus the child under a pressed button, then let it handle the event
    fn mouse_handler(&self) -> Option<Handler<'_, MouseEvent>> {
        Some(Box::new(
            move |event: &MouseEvent, request_focus: &dyn Fn(Arc<dyn Primitive>)| {
                let Some(child) = self.child_at(Point::of_mouse(event)) else {
                    return;
                };
                if matches!(event.kind, MouseEventKind::Down(_)) && !child.has_focus() {
                    request_focus(child.clone());
                }
                if let Some(handler) = child.mouse_handler() {
                    handler(event, request_focus);
                };
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyModifiers, MouseButton};
    use crate::primitive::same_primitive;
    use crate::test_utils::ScriptedScreen;
    use crate::widget::Checkbox;
    use parking_lot::Mutex;

    fn block() -> Arc<dyn Primitive> {
        Arc::new(Block::new(&Theme::default()))
    }

    #[test]
    fn test_layout_on_set_rect() {
        let flex = Flex::new(&Theme::default());
        let (top, bottom) = (block(), block());
        flex.add_item(top.clone(), Constraint::Fixed(2), false)
            .add_item(bottom.clone(), Constraint::Fill(1), false);
        flex.set_rect(Rect::new(0, 0, 10, 6));

        assert_eq!(top.rect(), Rect::new(0, 0, 10, 2));
        assert_eq!(bottom.rect(), Rect::new(0, 2, 10, 4));
    }

    #[test]
    fn test_horizontal_inside_border() {
        let flex = Flex::new(&Theme::default());
        flex.block().set_border(true);
        flex.set_direction(Direction::Horizontal);
        let (left, right) = (block(), block());
        flex.add_item(left.clone(), Constraint::Fill(1), false)
            .add_item(right.clone(), Constraint::Fill(1), false);
        flex.set_rect(Rect::new(0, 0, 10, 4));

        assert_eq!(left.rect(), Rect::new(1, 1, 4, 2));
        assert_eq!(right.rect(), Rect::new(5, 1, 4, 2));
    }

    #[test]
    fn test_focus_goes_to_preferred_child() {
        let flex = Flex::new(&Theme::default());
        let (first, preferred) = (block(), block());
        flex.add_item(first.clone(), Constraint::Fill(1), false)
            .add_item(preferred.clone(), Constraint::Fill(1), true);

        let requested = Mutex::new(None);
        flex.focus(&|p| *requested.lock() = Some(p));
        let requested = requested.into_inner().unwrap();
        assert!(same_primitive(&requested, &preferred));

        requested.focus(&|_| {});
        assert!(flex.contains_focus());
        assert!(!flex.has_focus());
    }

    #[test]
    fn test_focus_without_children_keeps_it() {
        let flex = Flex::new(&Theme::default());
        flex.focus(&|_| panic!("no child to hand focus to"));
        assert!(flex.has_focus());
    }

    #[test]
    fn test_click_focuses_and_forwards() {
        let flex = Flex::new(&Theme::default());
        let checkbox = Arc::new(Checkbox::new(&Theme::default()));
        flex.add_item(block(), Constraint::Fixed(1), false)
            .add_item(checkbox.clone(), Constraint::Fixed(1), false);
        flex.set_rect(Rect::new(0, 0, 5, 2));

        let handler = flex.mouse_handler().unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handler(&click, &|p| p.focus(&|_| {}));

        assert!(checkbox.has_focus());
        assert!(checkbox.is_checked());
    }

    #[test]
    fn test_draw_children() {
        let screen = ScriptedScreen::new(6, 3);
        let flex = Flex::new(&Theme::default());
        let titled = Block::new(&Theme::default());
        titled.set_border(true).set_title("x");
        flex.add_item(Arc::new(titled), Constraint::Fill(1), false);
        flex.set_rect(Rect::new(0, 0, 6, 3));
        flex.draw(&screen);

        assert_eq!(screen.row_text(0), "┌─x──┐");
    }
}
