//! Landing section: name, rotating role, tagline and social links.
//!
//! `a`/`p`/`c` jump to About, Projects and Contact, `d` downloads the
//! resume, and the first letter of a social label opens that profile.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::catalog::Profile;
use crate::tui::events::{Action, AppEvent};
use crate::tui::services::Services;
use crate::tui::theme::Palette;

use super::key_hints;

/// Ticks each role stays on screen (3s at the default 50ms tick).
const ROLE_ROTATE_TICKS: u32 = 60;

#[derive(Debug, Default)]
pub struct HeroState {
    role_index: usize,
    ticks: u32,
}

impl HeroState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tick(&mut self, role_count: usize) {
        if role_count == 0 {
            return;
        }
        self.ticks += 1;
        if self.ticks >= ROLE_ROTATE_TICKS {
            self.ticks = 0;
            self.role_index = (self.role_index + 1) % role_count;
        }
    }

    pub fn current_role<'a>(&self, profile: &'a Profile) -> &'a str {
        profile
            .roles
            .get(self.role_index % profile.roles.len().max(1))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        let action = match *c {
            'a' => Some(Action::FocusAbout),
            'p' => Some(Action::FocusProjects),
            'c' => Some(Action::FocusContact),
            'd' => Some(Action::DownloadResume),
            _ => None,
        };
        if let Some(action) = action {
            let _ = services.event_tx.send(AppEvent::Action(action));
            return true;
        }

        let social = services.catalog.profile.socials.iter().find(|s| {
            s.label
                .chars()
                .next()
                .is_some_and(|first| first.to_ascii_lowercase() == *c)
        });
        match social {
            Some(link) => {
                services.open_link(&link.url);
                true
            }
            None => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, profile: &Profile, palette: &Palette) {
        let mut lines = vec![
            Line::from(Span::styled("Hi, I'm", palette.muted())),
            Line::from(Span::styled(profile.name.clone(), palette.title())),
            Line::from(vec![
                Span::styled("▸ ", palette.dim()),
                Span::styled(self.current_role(profile).to_string(), palette.heading()),
            ]),
            Line::raw(""),
            Line::from(Span::styled(profile.tagline.clone(), palette.text())),
            Line::raw(""),
        ];

        let mut socials = Vec::new();
        for (i, link) in profile.socials.iter().enumerate() {
            if i > 0 {
                socials.push(Span::styled("  ·  ", palette.dim()));
            }
            let (first, rest) = link.label.split_at(link.label.chars().next().map_or(0, char::len_utf8));
            socials.push(Span::styled(first.to_string(), palette.key_hint()));
            socials.push(Span::styled(rest.to_string(), palette.muted()));
        }
        lines.push(Line::from(socials));

        let height = lines.len() as u16 + 2;
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
        frame.render_widget(
            Paragraph::new(key_hints(
                &[("a", "about"), ("p", "projects"), ("c", "contact"), ("d", "resume")],
                palette,
            ))
            .alignment(Alignment::Center),
            rows[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::services::test_support::services;

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_roles_rotate() {
        let (services, _rx) = services();
        let profile = &services.catalog.profile;
        let mut hero = HeroState::new();
        assert_eq!(hero.current_role(profile), "Full Stack Developer");
        for _ in 0..ROLE_ROTATE_TICKS {
            hero.on_tick(profile.roles.len());
        }
        assert_eq!(hero.current_role(profile), "UI/UX Designer");
        for _ in 0..ROLE_ROTATE_TICKS * 2 {
            hero.on_tick(profile.roles.len());
        }
        assert_eq!(hero.current_role(profile), "Full Stack Developer");
    }

    #[test]
    fn test_no_roles_is_safe() {
        let (services, _rx) = services();
        let mut profile = services.catalog.profile.clone();
        profile.roles.clear();
        let mut hero = HeroState::new();
        hero.on_tick(0);
        assert_eq!(hero.current_role(&profile), "");
    }

    #[test]
    fn test_shortcut_dispatches_action() {
        let (services, mut rx) = services();
        let mut hero = HeroState::new();
        assert!(hero.handle_input(&press('p'), &services));
        match rx.try_recv().unwrap() {
            AppEvent::Action(action) => assert_eq!(action, Action::FocusProjects),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_falls_through() {
        let (services, _rx) = services();
        let mut hero = HeroState::new();
        assert!(!hero.handle_input(&press('z'), &services));
        assert!(!hero.handle_input(
            &Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            &services
        ));
    }
}
