//! Pink & purple light/dark palettes for the Folio TUI.
//!
//! All colors are RGB truecolor. Views receive the active [`Palette`]
//! instead of using inline `Color::*` literals; the app swaps palettes
//! whenever the theme preference changes.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::preference::ThemePreference;

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error: failures, invalid fields.
pub const ERROR: Color = Color::Rgb(0xEF, 0x44, 0x44);
/// Success: confirmations, sent messages.
pub const SUCCESS: Color = Color::Rgb(0x22, 0xC5, 0x5E);
/// Warning: degraded but usable.
pub const WARNING: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
/// Info: informational highlights.
pub const INFO: Color = Color::Rgb(0x3B, 0x82, 0xF6);

/// Parse `#RRGGBB` into a truecolor, falling back to `fallback`.
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return fallback;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => fallback,
    }
}

/// One complete set of UI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Pink: primary accent, active items, focused borders.
    pub primary: Color,
    /// Purple: secondary accent, headings, chips.
    pub accent: Color,
    /// Base background.
    pub bg_base: Color,
    /// Elevated panels, sidebar, overlays.
    pub bg_surface: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary labels, borders.
    pub text_muted: Color,
    /// Disabled items, faint hints, backdrop stars.
    pub text_dim: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: Color::Rgb(0xDB, 0x27, 0x77),
        accent: Color::Rgb(0x93, 0x33, 0xEA),
        bg_base: Color::Rgb(0xFD, 0xF2, 0xF8),
        bg_surface: Color::Rgb(0xFC, 0xE7, 0xF3),
        text: Color::Rgb(0x1F, 0x29, 0x37),
        text_muted: Color::Rgb(0x6B, 0x72, 0x80),
        text_dim: Color::Rgb(0xC0, 0xA8, 0xC4),
    };

    pub const DARK: Palette = Palette {
        primary: Color::Rgb(0xEC, 0x48, 0x99),
        accent: Color::Rgb(0xA8, 0x55, 0xF7),
        bg_base: Color::Rgb(0x11, 0x18, 0x27),
        bg_surface: Color::Rgb(0x1F, 0x29, 0x37),
        text: Color::Rgb(0xF3, 0xF4, 0xF6),
        text_muted: Color::Rgb(0x9C, 0xA3, 0xAF),
        text_dim: Color::Rgb(0x4B, 0x55, 0x63),
    };

    pub fn for_preference(preference: ThemePreference) -> Palette {
        match preference {
            ThemePreference::Light => Palette::LIGHT,
            ThemePreference::Dark => Palette::DARK,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Whole-screen base style.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg_base)
    }

    /// Bold primary text (titles, active items).
    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Section header style.
    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn border_default(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Highlighted/selected item.
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint style (e.g., "[q]:quit").
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Filter chip, active or not.
    pub fn chip(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.bg_base)
                .bg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.accent).bg(self.bg_surface)
        }
    }

    /// Status bar brand badge.
    pub fn brand_badge(&self) -> Style {
        Style::default()
            .fg(self.bg_base)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Insert mode badge.
    pub fn insert_badge(&self) -> Style {
        Style::default()
            .fg(self.bg_base)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    // ── Block builders ──────────────────────────────────────────────────

    /// A bordered block with focused styling.
    pub fn block_focused<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(self.title())
            .borders(Borders::ALL)
            .border_style(self.border_focused())
    }

    /// A bordered block with default (unfocused) styling.
    pub fn block_default<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(self.border_default())
    }

    /// Opaque block for overlays drawn above the backdrop.
    pub fn block_overlay<'a>(&self, title: &'a str) -> Block<'a> {
        self.block_focused(title)
            .style(Style::default().bg(self.bg_surface).fg(self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_preference() {
        assert_eq!(Palette::for_preference(ThemePreference::Light), Palette::LIGHT);
        assert_eq!(Palette::for_preference(ThemePreference::Dark), Palette::DARK);
        assert_ne!(Palette::LIGHT.bg_base, Palette::DARK.bg_base);
    }

    #[test]
    fn test_dark_primary_is_pink() {
        assert_eq!(Palette::DARK.primary, Color::Rgb(0xEC, 0x48, 0x99));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#61DAFB", Color::Reset), Color::Rgb(0x61, 0xDA, 0xFB));
        assert_eq!(hex_color("61dafb", Color::Reset), Color::Rgb(0x61, 0xDA, 0xFB));
        assert_eq!(hex_color("#xyz", Color::Reset), Color::Reset);
        assert_eq!(hex_color("#GGGGGG", Color::Reset), Color::Reset);
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        let p = Palette::DARK;
        assert_ne!(p.title(), Style::default());
        assert_ne!(p.heading(), Style::default());
        assert_ne!(p.chip(true), p.chip(false));
    }
}
