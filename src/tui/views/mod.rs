//! One module per portfolio section, plus the command palette.

pub mod about;
pub mod command_palette;
pub mod contact;
pub mod education;
pub mod hero;
pub mod projects;
pub mod skills;

use ratatui::text::{Line, Span};

use super::theme::Palette;

/// Footer line of `key:description` hints.
pub(crate) fn key_hints(hints: &[(&str, &str)], palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in hints {
        spans.push(Span::styled(key.to_string(), palette.key_hint()));
        spans.push(Span::styled(format!(":{desc}  "), palette.muted()));
    }
    Line::from(spans)
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        s.to_string()
    }
}
