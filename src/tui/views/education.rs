//! Education section: degrees (expand inline) and certificates (detail
//! overlay with share actions).
//!
//! `e` and `c` switch between the two panes; each pane has its own search
//! and category chips.

use std::collections::HashSet;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::core::catalog::{Certificate, Education, EntryId};
use crate::core::modal::ScrollLock;
use crate::core::share::SharePlatform;
use crate::tui::browser::{BrowserInput, CatalogBrowser};
use crate::tui::services::Services;
use crate::tui::theme::{self, Palette};

use super::key_hints;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationPane {
    Education,
    Certificates,
}

pub struct EducationState {
    pub pane: EducationPane,
    pub education: CatalogBrowser<Education>,
    pub certificates: CatalogBrowser<Certificate>,
    expanded: HashSet<EntryId>,
}

impl EducationState {
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            pane: EducationPane::Education,
            education: CatalogBrowser::new(scroll_lock.clone()),
            certificates: CatalogBrowser::new(scroll_lock),
            expanded: HashSet::new(),
        }
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_searching(&self) -> bool {
        match self.pane {
            EducationPane::Education => self.education.is_searching(),
            EducationPane::Certificates => self.certificates.is_searching(),
        }
    }

    fn toggle_expanded(&mut self, id: EntryId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
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

        let outcome = match self.pane {
            EducationPane::Education => {
                self.education
                    .handle_key(*code, *modifiers, &services.catalog.education)
            }
            EducationPane::Certificates => {
                self.certificates
                    .handle_key(*code, *modifiers, &services.catalog.certificates)
            }
        };

        match outcome {
            BrowserInput::Consumed => true,
            BrowserInput::Activate(id) => {
                match self.pane {
                    EducationPane::Education => self.toggle_expanded(id),
                    EducationPane::Certificates => self.certificates.open(id),
                }
                true
            }
            BrowserInput::Overlay(code) => {
                if let Some(cert) = self.certificates.open_entry(&services.catalog.certificates) {
                    share_certificate(cert, code, services);
                }
                true
            }
            BrowserInput::Ignored => match (*modifiers, *code) {
                (KeyModifiers::NONE, KeyCode::Char('e')) => {
                    self.pane = EducationPane::Education;
                    true
                }
                (KeyModifiers::NONE, KeyCode::Char('c')) => {
                    self.pane = EducationPane::Certificates;
                    true
                }
                _ => false,
            },
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent, main: Rect, services: &Services) -> bool {
        let code = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                return self
                    .certificates
                    .handle_click(Position::new(mouse.column, mouse.row), main);
            }
            MouseEventKind::ScrollDown => KeyCode::Down,
            MouseEventKind::ScrollUp => KeyCode::Up,
            _ => return false,
        };
        match self.pane {
            EducationPane::Education => {
                self.education
                    .handle_key(code, KeyModifiers::NONE, &services.catalog.education);
            }
            EducationPane::Certificates => {
                self.certificates
                    .handle_key(code, KeyModifiers::NONE, &services.catalog.certificates);
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.education.reset();
        self.certificates.reset();
        self.expanded.clear();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services, palette: &Palette) {
        let rows = Layout::vertical([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_education(frame, rows[0], &services.catalog.education, palette);
        self.render_certificates(frame, rows[1], &services.catalog.certificates, palette);

        let hints = match self.pane {
            EducationPane::Education => key_hints(
                &[("c", "certificates"), ("/", "search"), ("Enter", "expand"), ("r", "reset")],
                palette,
            ),
            EducationPane::Certificates => key_hints(
                &[("e", "education"), ("/", "search"), ("Enter", "details"), ("r", "reset")],
                palette,
            ),
        };
        frame.render_widget(Paragraph::new(hints), rows[2]);

        if let Some(cert) = self.certificates.open_entry(&services.catalog.certificates) {
            self.certificates.render_overlay(
                frame,
                area,
                &cert.name,
                certificate_lines(cert, palette),
                key_hints(
                    &[
                        ("Esc", "close"),
                        ("o", "open"),
                        ("c", "copy link"),
                        ("t", "twitter"),
                        ("l", "linkedin"),
                    ],
                    palette,
                ),
                palette,
            );
        }
    }

    fn pane_block<'a>(&self, pane: EducationPane, title: &'a str, palette: &Palette) -> Block<'a> {
        if self.pane == pane {
            palette.block_focused(title)
        } else {
            palette.block_default(title)
        }
    }

    fn render_education(
        &self,
        frame: &mut Frame,
        area: Rect,
        entries: &[Education],
        palette: &Palette,
    ) {
        let block = self.pane_block(EducationPane::Education, "Education", palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let parts = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);
        self.education.render_toolbar(frame, parts[0], entries, palette);

        let visible = self.education.visible(entries);
        if visible.is_empty() {
            self.education.render_empty(frame, parts[1], palette);
            return;
        }

        let active = self.pane == EducationPane::Education;
        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, edu) in visible.iter().enumerate() {
            let selected = active && i == self.education.selected_index();
            let expanded = self.is_expanded(edu.id);
            lines.push(Line::from(vec![
                Span::styled(if selected { "▸ " } else { "  " }, palette.title()),
                Span::styled(
                    edu.degree.clone(),
                    if selected { palette.highlight() } else { palette.text() },
                ),
                Span::styled(if expanded { "  ▾" } else { "  ▸" }, palette.dim()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {} · {}", edu.institution, edu.duration),
                palette.muted(),
            )));
            lines.push(Line::from(Span::styled(format!("  {}", edu.grade), palette.key_hint())));
            if expanded {
                lines.push(Line::from(Span::styled(format!("  {}", edu.details), palette.text())));
            }
            lines.push(Line::raw(""));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[1]);
    }

    fn render_certificates(
        &self,
        frame: &mut Frame,
        area: Rect,
        entries: &[Certificate],
        palette: &Palette,
    ) {
        let block = self.pane_block(EducationPane::Certificates, "Certificates", palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let parts = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);
        self.certificates.render_toolbar(frame, parts[0], entries, palette);

        let visible = self.certificates.visible(entries);
        if visible.is_empty() {
            self.certificates.render_empty(frame, parts[1], palette);
            return;
        }

        let active = self.pane == EducationPane::Certificates;
        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, cert) in visible.iter().enumerate() {
            let selected = active && i == self.certificates.selected_index();
            let mut title = vec![
                Span::styled(if selected { "▸ " } else { "  " }, palette.title()),
                Span::styled(
                    cert.name.clone(),
                    if selected { palette.highlight() } else { palette.text() },
                ),
            ];
            if cert.verified {
                title.push(Span::styled(
                    "  ✓ Verified",
                    Style::default().fg(theme::SUCCESS),
                ));
            }
            lines.push(Line::from(title));
            lines.push(Line::from(Span::styled(
                format!("  {} · {}", cert.issuer, cert.date.format("%b %Y")),
                palette.muted(),
            )));
        }
        frame.render_widget(Paragraph::new(lines), parts[1]);
    }
}

/// Overlay keys: `o` opens the credential, `c`/`t`/`l` share it.
fn share_certificate(cert: &Certificate, code: KeyCode, services: &Services) {
    let platform = match code {
        KeyCode::Char('o') => {
            services.open_link(&cert.link);
            return;
        }
        KeyCode::Char('c') => SharePlatform::Clipboard,
        KeyCode::Char('t') => SharePlatform::Twitter,
        KeyCode::Char('l') => SharePlatform::LinkedIn,
        _ => return,
    };
    log::debug!("Sharing certificate {} via {}", cert.id, platform.label());
    services.share(platform, &cert.link, &cert.share_text());
}

fn certificate_lines(cert: &Certificate, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(cert.name.clone(), palette.title())),
        Line::from(Span::styled(
            format!("Issued by {} · {}", cert.issuer, cert.date.format("%B %d, %Y")),
            palette.muted(),
        )),
    ];
    if cert.verified {
        lines.push(Line::from(Span::styled(
            "✓ Verified credential",
            Style::default().fg(theme::SUCCESS),
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(cert.description.clone(), palette.text())));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Link: ", palette.muted()),
        Span::styled(cert.link.clone(), palette.text()),
    ]));
    lines
}
