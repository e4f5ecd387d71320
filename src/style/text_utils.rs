//! Text measurement and printing helpers
//!
//! Stateless functions shared by widgets. Widths are terminal cells, so wide
//! (CJK) characters count as two.

use super::{Color, Style};
use crate::screen::Screen;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Horizontal alignment used by [`print`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Display width of a string in terminal cells
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Print `text` at (`x`, `y`) within `max_width` cells
///
/// Only the foreground of the touched cells changes; their background is kept
/// so text can be laid over a filled area. Text that does not fit is clipped:
/// on the right for left alignment, on the left for right alignment and on
/// both sides when centered.
///
/// Returns the number of characters printed and the cells they occupy.
pub fn print(
    screen: &dyn Screen,
    text: &str,
    x: u16,
    y: u16,
    max_width: u16,
    align: Alignment,
    color: Color,
) -> (usize, u16) {
    let max_width = max_width as usize;
    if max_width == 0 || text.is_empty() {
        return (0, 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let total = string_width(text);

    // Drop characters from the front until what remains fits
    let mut start = 0;
    let mut visible = total;
    let skip_front = |start: &mut usize, visible: &mut usize, target: usize| {
        while *visible > target && *start < chars.len() {
            *visible -= char_width(chars[*start]);
            *start += 1;
        }
    };
    match align {
        Alignment::Left => {}
        Alignment::Right => skip_front(&mut start, &mut visible, max_width),
        Alignment::Center => {
            if total > max_width {
                let excess = total - max_width;
                skip_front(&mut start, &mut visible, total - excess / 2);
            }
        }
    }

    let offset = match align {
        Alignment::Left => 0,
        Alignment::Right => max_width.saturating_sub(visible),
        Alignment::Center => max_width.saturating_sub(visible) / 2,
    };

    let mut drawn = 0usize;
    let mut printed = 0usize;
    for &c in &chars[start..] {
        let w = char_width(c);
        if offset + drawn + w > max_width {
            break;
        }
        let cx = x.saturating_add((offset + drawn) as u16);
        let bg = screen
            .get_content(cx, y)
            .map(|cell| cell.bg)
            .unwrap_or_default();
        screen.set_content(cx, y, c, Style::new().fg(color).bg(bg));
        drawn += w;
        printed += 1;
    }

    (printed, drawn as u16)
}

/// Truncate a string to fit within max_width, adding ellipsis if needed
pub fn truncate(s: &str, max_width: usize) -> String {
    if string_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let w = char_width(c);
        if current_width + w + 1 > max_width {
            break;
        }
        result.push(c);
        current_width += w;
    }
    result.push('…');
    result
}
