use ratatui::style::Color;

use crate::model::theme::ThemeChoice;

/// Resolved color palette for the TUI
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub selection_bg: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Palette {
    pub fn light() -> Self {
        Palette {
            background: Color::Rgb(0xF6, 0xF7, 0xFB),
            text: Color::Rgb(0x1F, 0x24, 0x33),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            border: Color::Rgb(0xC9, 0xCE, 0xDD),
            accent: Color::Rgb(0x25, 0x63, 0xEB),
            selection_bg: Color::Rgb(0xDB, 0xE4, 0xFF),
            high: Color::Rgb(0xDC, 0x26, 0x26),
            medium: Color::Rgb(0xD9, 0x77, 0x06),
            low: Color::Rgb(0x05, 0x96, 0x69),
            success: Color::Rgb(0x16, 0xA3, 0x4A),
            error: Color::Rgb(0xDC, 0x26, 0x26),
            info: Color::Rgb(0x25, 0x63, 0xEB),
        }
    }

    pub fn dark() -> Self {
        Palette {
            background: Color::Rgb(0x0F, 0x13, 0x1E),
            text: Color::Rgb(0xD7, 0xDC, 0xE8),
            dim: Color::Rgb(0x7C, 0x84, 0x96),
            border: Color::Rgb(0x33, 0x3B, 0x4F),
            accent: Color::Rgb(0x60, 0xA5, 0xFA),
            selection_bg: Color::Rgb(0x1E, 0x2A, 0x45),
            high: Color::Rgb(0xF8, 0x71, 0x71),
            medium: Color::Rgb(0xFB, 0xBF, 0x24),
            low: Color::Rgb(0x34, 0xD3, 0x99),
            success: Color::Rgb(0x4A, 0xDE, 0x80),
            error: Color::Rgb(0xF8, 0x71, 0x71),
            info: Color::Rgb(0x60, 0xA5, 0xFA),
        }
    }

    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Palette::light(),
            ThemeChoice::Dark => Palette::dark(),
        }
    }
}
