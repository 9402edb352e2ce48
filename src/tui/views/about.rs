//! About section: bio, highlighted tools and achievements.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::catalog::Profile;
use crate::tui::events::{Action, AppEvent};
use crate::tui::services::Services;
use crate::tui::theme::Palette;

use super::key_hints;

#[derive(Debug, Default)]
pub struct AboutState {
    scroll: u16,
}

impl AboutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.scroll = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                let _ = services.event_tx.send(AppEvent::Action(Action::DownloadResume));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                let _ = services.event_tx.send(AppEvent::Action(Action::SharePortfolio));
                true
            }
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, profile: &Profile, palette: &Palette) {
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        let mut lines: Vec<Line<'static>> =
            vec![Line::from(Span::styled("About Me", palette.heading()))];
        for paragraph in &profile.bio {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(paragraph.clone(), palette.text())));
        }
        lines.push(Line::from(vec![
            Span::styled("⌖ ", palette.dim()),
            Span::styled(profile.location.clone(), palette.muted()),
        ]));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("What I Work With", palette.heading())));
        for highlight in &profile.highlights {
            lines.push(Line::from(vec![
                Span::styled("  • ", palette.dim()),
                Span::styled(format!("{:<14}", highlight.name), palette.title()),
                Span::styled(highlight.description.clone(), palette.muted()),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Achievements", palette.heading())));
        for achievement in &profile.achievements {
            lines.push(Line::from(vec![
                Span::styled("  ★ ", palette.title()),
                Span::styled(achievement.title.clone(), palette.text()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", achievement.description),
                palette.muted(),
            )));
        }

        let scroll = self.scroll.min(lines.len().saturating_sub(1) as u16);
        frame.render_widget(
            Paragraph::new(lines)
                .block(palette.block_default("About"))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(key_hints(
                &[("j/k", "scroll"), ("d", "resume"), ("s", "copy portfolio link")],
                palette,
            )),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::services::test_support::services;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_scroll_saturates_at_top() {
        let (services, _rx) = services();
        let mut about = AboutState::new();
        about.handle_input(&press(KeyCode::Char('k')), &services);
        assert_eq!(about.scroll(), 0);
        about.handle_input(&press(KeyCode::Char('j')), &services);
        about.handle_input(&press(KeyCode::Down), &services);
        assert_eq!(about.scroll(), 2);
        about.handle_input(&press(KeyCode::Char('g')), &services);
        assert_eq!(about.scroll(), 0);
    }

    #[test]
    fn test_download_key_requests_resume() {
        let (services, mut rx) = services();
        let mut about = AboutState::new();
        assert!(about.handle_input(&press(KeyCode::Char('d')), &services));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::Action(Action::DownloadResume)
        ));
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut about = AboutState::new();
        let wheel = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(about.handle_mouse(&wheel(MouseEventKind::ScrollDown)));
        assert_eq!(about.scroll(), 1);
        assert!(about.handle_mouse(&wheel(MouseEventKind::ScrollUp)));
        assert!(!about.handle_mouse(&wheel(MouseEventKind::Moved)));
    }
}
