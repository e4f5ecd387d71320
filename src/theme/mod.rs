//! Color theme handed to widget constructors

use crate::style::Color;
use std::fmt;
use std::str::FromStr;

/// Names of the individual theme colors, as used in configuration overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
    PrimitiveBackground,
    ContrastBackground,
    MoreContrastBackground,
    Border,
    Title,
    Graphics,
    PrimaryText,
    SecondaryText,
    TertiaryText,
    InverseText,
    ContrastSecondaryText,
}

impl ThemeSlot {
    pub const ALL: [ThemeSlot; 11] = [
        ThemeSlot::PrimitiveBackground,
        ThemeSlot::ContrastBackground,
        ThemeSlot::MoreContrastBackground,
        ThemeSlot::Border,
        ThemeSlot::Title,
        ThemeSlot::Graphics,
        ThemeSlot::PrimaryText,
        ThemeSlot::SecondaryText,
        ThemeSlot::TertiaryText,
        ThemeSlot::InverseText,
        ThemeSlot::ContrastSecondaryText,
    ];

    /// Configuration key of the slot
    pub fn name(&self) -> &'static str {
        match self {
            ThemeSlot::PrimitiveBackground => "primitive_background",
            ThemeSlot::ContrastBackground => "contrast_background",
            ThemeSlot::MoreContrastBackground => "more_contrast_background",
            ThemeSlot::Border => "border",
            ThemeSlot::Title => "title",
            ThemeSlot::Graphics => "graphics",
            ThemeSlot::PrimaryText => "primary_text",
            ThemeSlot::SecondaryText => "secondary_text",
            ThemeSlot::TertiaryText => "tertiary_text",
            ThemeSlot::InverseText => "inverse_text",
            ThemeSlot::ContrastSecondaryText => "contrast_secondary_text",
        }
    }
}

impl fmt::Display for ThemeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeSlot::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| format!("unknown theme slot '{s}'"))
    }
}

/// The colors widgets pick their defaults from
///
/// A theme is a plain value: widgets copy what they need at construction,
/// so changing a theme afterwards does not restyle existing widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Main background of every primitive
    pub primitive_background: Color,
    /// Background of contrasting elements such as input fields
    pub contrast_background: Color,
    /// Background of elements contrasting the contrast background
    pub more_contrast_background: Color,
    pub border: Color,
    pub title: Color,
    /// Graphic elements such as the cursor
    pub graphics: Color,
    /// Default text
    pub primary_text: Color,
    /// Labels and list shortcuts
    pub secondary_text: Color,
    /// Placeholders and secondary list text
    pub tertiary_text: Color,
    /// Text on a contrast background
    pub inverse_text: Color,
    pub contrast_secondary_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Light text on a black background
    pub fn dark() -> Self {
        Self {
            primitive_background: Color::Black,
            contrast_background: Color::Blue,
            more_contrast_background: Color::Green,
            border: Color::White,
            title: Color::White,
            graphics: Color::White,
            primary_text: Color::White,
            secondary_text: Color::Yellow,
            tertiary_text: Color::Green,
            inverse_text: Color::Blue,
            contrast_secondary_text: Color::DarkCyan,
        }
    }

    /// Dark text on a white background
    pub fn light() -> Self {
        Self {
            primitive_background: Color::White,
            contrast_background: Color::DarkBlue,
            more_contrast_background: Color::DarkGreen,
            border: Color::Black,
            title: Color::Black,
            graphics: Color::Black,
            primary_text: Color::Black,
            secondary_text: Color::DarkMagenta,
            tertiary_text: Color::DarkGreen,
            inverse_text: Color::White,
            contrast_secondary_text: Color::Cyan,
        }
    }

    /// Theme for a preset name (`dark` or `light`)
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    fn slot_mut(&mut self, slot: ThemeSlot) -> &mut Color {
        match slot {
            ThemeSlot::PrimitiveBackground => &mut self.primitive_background,
            ThemeSlot::ContrastBackground => &mut self.contrast_background,
            ThemeSlot::MoreContrastBackground => &mut self.more_contrast_background,
            ThemeSlot::Border => &mut self.border,
            ThemeSlot::Title => &mut self.title,
            ThemeSlot::Graphics => &mut self.graphics,
            ThemeSlot::PrimaryText => &mut self.primary_text,
            ThemeSlot::SecondaryText => &mut self.secondary_text,
            ThemeSlot::TertiaryText => &mut self.tertiary_text,
            ThemeSlot::InverseText => &mut self.inverse_text,
            ThemeSlot::ContrastSecondaryText => &mut self.contrast_secondary_text,
        }
    }

    /// Color of a slot
    pub fn get(&self, slot: ThemeSlot) -> Color {
        let mut copy = *self;
        *copy.slot_mut(slot)
    }

    /// Override one slot
    pub fn set(&mut self, slot: ThemeSlot, color: Color) -> &mut Self {
        *self.slot_mut(slot) = color;
        self
    }
}
