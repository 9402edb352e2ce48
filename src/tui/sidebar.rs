//! Collapsible left sidebar listing the portfolio sections.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::{AreaFocus, Section};
use super::layout::SidebarVisibility;
use super::theme::Palette;

/// Sidebar navigation state.
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted item index (into Section::ALL).
    pub selected: usize,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            user_collapsed: false,
            selected: 0,
        }
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Section::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Section::ALL.len() - 1) % Section::ALL.len();
    }

    pub fn selected_section(&self) -> Section {
        Section::ALL[self.selected]
    }

    /// Sync selection to match the active section (e.g., after Tab navigation).
    pub fn sync_to(&mut self, section: Section) {
        if let Some(idx) = Section::ALL.iter().position(|&s| s == section) {
            self.selected = idx;
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: Section,
        area_focus: AreaFocus,
        palette: &Palette,
    ) {
        let sidebar_focused = area_focus == AreaFocus::Sidebar;
        let expanded = visibility == SidebarVisibility::Expanded;
        if visibility == SidebarVisibility::Hidden {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        if expanded {
            lines.push(Line::from(Span::styled(" Folio", palette.heading())));
            lines.push(Line::raw(""));
        }

        for (idx, &section) in Section::ALL.iter().enumerate() {
            if lines.len() >= area.height as usize {
                break;
            }
            let is_current = section == current;
            let is_selected = sidebar_focused && idx == self.selected;

            let style = if is_current {
                palette.highlight()
            } else if is_selected {
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD)
            } else {
                palette.muted()
            };

            let label = if expanded {
                let prefix = if is_selected { "▸" } else { " " };
                format!("{prefix}{} {} {}", idx + 1, section.icon(), section.label())
            } else {
                format!(" {}", section.icon())
            };
            let padded = format!("{:<width$}", label, width = area.width as usize);
            lines.push(Line::from(Span::styled(padded, style)));
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(palette.bg_surface)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SidebarState::new();
        assert!(!state.user_collapsed);
        assert_eq!(state.selected_section(), Section::Hero);
    }

    #[test]
    fn test_select_next_wraps() {
        let mut state = SidebarState::new();
        for _ in 0..Section::ALL.len() {
            state.select_next();
        }
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_select_prev_wraps() {
        let mut state = SidebarState::new();
        state.select_prev();
        assert_eq!(state.selected_section(), Section::Contact);
    }

    #[test]
    fn test_sync_to_section() {
        let mut state = SidebarState::new();
        state.sync_to(Section::Projects);
        assert_eq!(state.selected_section(), Section::Projects);
    }
}
