//! Projects section: filterable project cards with a detail overlay.
//!
//! The overlay shows the long description, what was done and the
//! timeline. `g`/`o` open the repository and demo, `d` saves the project
//! summary document under a per-project name.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::assets::{project_summary_file_name, AssetKind};
use crate::core::catalog::{EntryId, Project};
use crate::core::modal::ScrollLock;
use crate::tui::browser::{list_window, BrowserInput, CatalogBrowser};
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme::Palette;

use super::{key_hints, truncate};

/// Rows per project card.
const CARD_HEIGHT: u16 = 3;

pub struct ProjectsState {
    pub browser: CatalogBrowser<Project>,
}

impl ProjectsState {
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

        match self.browser.handle_key(*code, *modifiers, &services.catalog.projects) {
            BrowserInput::Consumed => true,
            BrowserInput::Activate(id) => {
                self.browser.open(id);
                true
            }
            BrowserInput::Overlay(code) => {
                if let Some(id) = self.browser.modal().open_id() {
                    self.handle_overlay_key(id, code, services);
                }
                true
            }
            BrowserInput::Ignored => false,
        }
    }

    fn handle_overlay_key(&mut self, id: EntryId, code: KeyCode, services: &Services) {
        let Some(project) = services.catalog.project(id) else {
            return;
        };
        match code {
            KeyCode::Char('g') => match &project.github {
                Some(url) => services.open_link(url),
                None => services.notify("No repository for this project", NotificationLevel::Info),
            },
            KeyCode::Char('o') => match &project.demo {
                Some(url) => services.open_link(url),
                None => services.notify("No live demo for this project", NotificationLevel::Info),
            },
            KeyCode::Char('d') => services.download(
                AssetKind::ProjectSummary,
                &project_summary_file_name(&project.title),
            ),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent, main: Rect, services: &Services) -> bool {
        let entries = &services.catalog.projects;
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
        let projects = &services.catalog.projects;
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        self.browser.render_toolbar(frame, rows[0], projects, palette);

        let block = palette.block_default("Projects");
        let inner = block.inner(rows[1]);
        frame.render_widget(block, rows[1]);

        let visible = self.browser.visible(projects);
        if visible.is_empty() {
            self.browser.render_empty(frame, inner, palette);
        } else {
            let capacity = (inner.height / CARD_HEIGHT) as usize;
            let (start, end) = list_window(self.browser.selected_index(), visible.len(), capacity);
            let mut lines = Vec::new();
            for (i, project) in visible.iter().enumerate().take(end).skip(start) {
                lines.extend(card_lines(
                    project,
                    i == self.browser.selected_index(),
                    inner.width,
                    palette,
                ));
            }
            frame.render_widget(Paragraph::new(lines), inner);
        }

        frame.render_widget(
            Paragraph::new(key_hints(
                &[
                    ("/", "search"),
                    ("h/l", "category"),
                    ("t", "tag"),
                    ("Enter", "details"),
                    ("r", "reset"),
                ],
                palette,
            )),
            rows[2],
        );

        if let Some(project) = self.browser.open_entry(projects) {
            self.browser.render_overlay(
                frame,
                area,
                &project.title,
                overlay_lines(project, palette),
                key_hints(
                    &[
                        ("Esc", "close"),
                        ("j/k", "scroll"),
                        ("g", "github"),
                        ("o", "demo"),
                        ("d", "summary"),
                    ],
                    palette,
                ),
                palette,
            );
        }
    }
}

fn card_lines(project: &Project, selected: bool, width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let width = width as usize;
    let marker = if selected { "▸ " } else { "  " };
    let title_style = if selected {
        palette.highlight()
    } else {
        palette.text()
    };

    let mut title = vec![
        Span::styled(marker, palette.title()),
        Span::styled(project.title.clone(), title_style),
    ];
    if project.featured {
        title.push(Span::styled(" ★", palette.title()));
    }
    title.push(Span::styled(
        format!("  {} · {}", project.date.format("%b %Y"), project.category),
        palette.dim(),
    ));

    let tags: Vec<String> = project.tags.iter().map(|t| format!("#{t}")).collect();
    vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {}", truncate(&project.description, width.saturating_sub(2))),
            palette.muted(),
        )),
        Line::from(Span::styled(format!("  {}", tags.join(" ")), palette.dim())),
    ]
}

fn overlay_lines(project: &Project, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(project.title.clone(), palette.title()),
            Span::styled(
                if project.featured { "  ★ Featured" } else { "" },
                palette.heading(),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} · {}", project.date.format("%B %Y"), project.category),
            palette.muted(),
        )),
        Line::raw(""),
        Line::from(Span::styled(project.long_description.clone(), palette.text())),
    ];

    if !project.what_i_did.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("What I Did", palette.heading())));
        for item in &project.what_i_did {
            lines.push(Line::from(vec![
                Span::styled("  • ", palette.dim()),
                Span::styled(item.clone(), palette.text()),
            ]));
        }
    }

    if !project.timeline.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Timeline", palette.heading())));
        for step in &project.timeline {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}  ", step.date.format("%b %d, %Y")), palette.key_hint()),
                Span::styled(step.milestone.clone(), palette.text()),
            ]));
        }
    }

    lines.push(Line::raw(""));
    let tags: Vec<String> = project.tags.iter().map(|t| format!("#{t}")).collect();
    lines.push(Line::from(Span::styled(tags.join(" "), palette.dim())));

    for (label, link) in [("GitHub", &project.github), ("Demo", &project.demo)] {
        if let Some(url) = link {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), palette.muted()),
                Span::styled(url.clone(), palette.text()),
            ]));
        }
    }
    lines
}
