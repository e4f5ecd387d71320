//! Terminal colors

use crossterm::style::Color as CrosstermColor;

/// Terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Color {
    /// Reset to terminal default
    #[default]
    Reset,
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    /// RGB color
    Rgb(u8, u8, u8),
    /// ANSI 256-color palette index
    Indexed(u8),
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::Rgb(r, g, b))
    }

    /// Parse a color as written in configuration files
    ///
    /// Accepts a named color (case-insensitive, `-`/`_` ignored, so
    /// `dark-cyan`, `DarkCyan` and `darkcyan` are equal), `reset`, or a
    /// `#rrggbb` hex triple.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value);
        }

        let name: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();

        let color = match name.as_str() {
            "reset" | "default" => Color::Reset,
            "black" => Color::Black,
            "darkgrey" | "darkgray" => Color::DarkGrey,
            "red" => Color::Red,
            "darkred" => Color::DarkRed,
            "green" => Color::Green,
            "darkgreen" => Color::DarkGreen,
            "yellow" => Color::Yellow,
            "darkyellow" => Color::DarkYellow,
            "blue" => Color::Blue,
            "darkblue" => Color::DarkBlue,
            "magenta" => Color::Magenta,
            "darkmagenta" => Color::DarkMagenta,
            "cyan" => Color::Cyan,
            "darkcyan" => Color::DarkCyan,
            "white" => Color::White,
            "grey" | "gray" => Color::Grey,
            _ => return None,
        };
        Some(color)
    }
}

impl From<Color> for CrosstermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => CrosstermColor::Reset,
            Color::Black => CrosstermColor::Black,
            Color::DarkGrey => CrosstermColor::DarkGrey,
            Color::Red => CrosstermColor::Red,
            Color::DarkRed => CrosstermColor::DarkRed,
            Color::Green => CrosstermColor::Green,
            Color::DarkGreen => CrosstermColor::DarkGreen,
            Color::Yellow => CrosstermColor::Yellow,
            Color::DarkYellow => CrosstermColor::DarkYellow,
            Color::Blue => CrosstermColor::Blue,
            Color::DarkBlue => CrosstermColor::DarkBlue,
            Color::Magenta => CrosstermColor::Magenta,
            Color::DarkMagenta => CrosstermColor::DarkMagenta,
            Color::Cyan => CrosstermColor::Cyan,
            Color::DarkCyan => CrosstermColor::DarkCyan,
            Color::White => CrosstermColor::White,
            Color::Grey => CrosstermColor::Grey,
            Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
            Color::Indexed(i) => CrosstermColor::AnsiValue(i),
        }
    }
}
