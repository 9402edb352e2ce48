//! Skills section: tools grouped by category, each with its brand color.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::assets::AssetKind;
use crate::core::catalog::{CatalogEntry, Skill};
use crate::core::modal::ScrollLock;
use crate::tui::browser::{BrowserInput, CatalogBrowser};
use crate::tui::services::Services;
use crate::tui::theme::{hex_color, Palette};

use super::{key_hints, truncate};

pub struct SkillsState {
    pub browser: CatalogBrowser<Skill>,
}

impl SkillsState {
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            browser: CatalogBrowser::new(scroll_lock),
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

        match self.browser.handle_key(*code, *modifiers, &services.catalog.skills) {
            BrowserInput::Consumed => true,
            BrowserInput::Activate(id) => {
                self.browser.open(id);
                true
            }
            BrowserInput::Overlay(KeyCode::Char('d')) => {
                download_summary(services);
                true
            }
            BrowserInput::Overlay(_) => true,
            BrowserInput::Ignored => match (*modifiers, *code) {
                (KeyModifiers::NONE, KeyCode::Char('d')) => {
                    download_summary(services);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent, main: Rect, services: &Services) -> bool {
        let entries = &services.catalog.skills;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .browser
                .handle_click(Position::new(mouse.column, mouse.row), main),
            MouseEventKind::ScrollDown => {
                self.browser.handle_key(KeyCode::Down, KeyModifiers::NONE, entries);
                true
            }
            MouseEventKind::ScrollUp => {
                self.browser.handle_key(KeyCode::Up, KeyModifiers::NONE, entries);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.browser.reset();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services, palette: &Palette) {
        let skills = &services.catalog.skills;
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        self.browser.render_toolbar(frame, rows[0], skills, palette);

        let block = palette.block_default("Skills & Expertise");
        let inner = block.inner(rows[1]);
        frame.render_widget(block, rows[1]);

        let visible = self.browser.visible(skills);
        if visible.is_empty() {
            self.browser.render_empty(frame, inner, palette);
        } else {
            let (lines, selected_line) = self.list_lines(&visible, inner.width, palette);
            let offset = selected_line.saturating_sub(inner.height.saturating_sub(1) as usize);
            frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
        }

        frame.render_widget(
            Paragraph::new(key_hints(
                &[
                    ("/", "search"),
                    ("h/l", "category"),
                    ("t", "tag"),
                    ("Enter", "details"),
                    ("d", "skills summary"),
                    ("r", "reset"),
                ],
                palette,
            )),
            rows[2],
        );

        if let Some(skill) = self.browser.open_entry(skills) {
            self.browser.render_overlay(
                frame,
                area,
                &skill.name,
                overlay_lines(skill, palette),
                key_hints(&[("Esc", "close"), ("j/k", "scroll"), ("d", "skills summary")], palette),
                palette,
            );
        }
    }

    /// Lines for the visible skills with a header above each category run,
    /// plus the line index of the selected skill.
    fn list_lines(
        &self,
        visible: &[&Skill],
        width: u16,
        palette: &Palette,
    ) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut selected_line = 0;
        let mut current_category: Option<&str> = None;

        for (i, skill) in visible.iter().enumerate() {
            if current_category != Some(skill.category.as_str()) {
                if current_category.is_some() {
                    lines.push(Line::raw(""));
                }
                current_category = Some(skill.category.as_str());
                lines.push(Line::from(Span::styled(
                    category_label(&skill.category).to_string(),
                    palette.heading(),
                )));
            }

            let is_selected = i == self.browser.selected_index();
            if is_selected {
                selected_line = lines.len();
            }
            let name_style = if is_selected {
                palette.highlight()
            } else {
                palette.text()
            };
            let description_width = (width as usize).saturating_sub(22);
            lines.push(Line::from(vec![
                Span::styled(
                    if is_selected { " ▸ " } else { "   " },
                    palette.title(),
                ),
                Span::styled(
                    "■ ",
                    Style::default().fg(hex_color(&skill.color, palette.accent)),
                ),
                Span::styled(format!("{:<16}", skill.name), name_style),
                Span::styled(truncate(&skill.description, description_width), palette.muted()),
            ]));
        }
        (lines, selected_line)
    }
}

fn download_summary(services: &Services) {
    services.download(AssetKind::SkillsSummary, AssetKind::SkillsSummary.file_name());
}

fn category_label(value: &str) -> &str {
    Skill::CATEGORIES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

fn overlay_lines(skill: &Skill, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "■ ",
                Style::default().fg(hex_color(&skill.color, palette.accent)),
            ),
            Span::styled(skill.name.clone(), palette.title()),
            Span::styled(format!("  {}", category_label(&skill.category)), palette.muted()),
        ]),
        Line::raw(""),
        Line::from(Span::styled(skill.description.clone(), palette.text())),
    ];

    if !skill.tags.is_empty() {
        lines.push(Line::raw(""));
        let tags: Vec<String> = skill.tags.iter().map(|t| format!("#{t}")).collect();
        lines.push(Line::from(Span::styled(tags.join(" "), palette.dim())));
    }

    if !skill.projects.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Used in", palette.heading())));
        for project in &skill.projects {
            lines.push(Line::from(vec![
                Span::styled("  • ", palette.dim()),
                Span::styled(project.clone(), palette.text()),
            ]));
        }
    }
    lines
}
