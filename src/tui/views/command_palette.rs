//! Command palette: fuzzy-searchable registry of portfolio actions.
//!
//! Opens on Ctrl+P, provides nucleo-powered fuzzy matching with
//! match highlighting, category grouping, and keybinding hints.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nucleo::{
    pattern::{Atom, AtomKind, CaseMatching, Normalization},
    Matcher, Utf32Str,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::tui::events::{Action, Section};
use crate::tui::theme::{self, Palette};
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};

// ============================================================================
// Command types
// ============================================================================

/// A command that can be invoked from the palette.
#[derive(Clone)]
pub struct Command {
    pub label: &'static str,
    pub description: &'static str,
    pub category: CommandCategory,
    pub keybinding: Option<&'static str>,
    pub action: Action,
}

/// Command grouping for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandCategory {
    Navigation,
    Portfolio,
    System,
}

impl CommandCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Portfolio => "Portfolio",
            Self::System => "System",
        }
    }

    fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Navigation => palette.primary,
            Self::Portfolio => palette.accent,
            Self::System => theme::INFO,
        }
    }
}

/// A command that matched the current filter, with score and indices.
struct FilteredCommand {
    command_index: usize,
    score: u16,
    indices: Vec<u32>,
}

/// Result of handling a palette input event.
pub enum PaletteResult {
    /// Event consumed, palette stays open.
    Consumed,
    /// User selected a command; close and dispatch this action.
    Execute(Action),
    /// User pressed Esc; close without action.
    Close,
}

// ============================================================================
// Command registry
// ============================================================================

fn go_to(section: Section, keybinding: &'static str) -> Command {
    let (label, description) = match section {
        Section::Hero => ("Go to Home", "Name, role and social links"),
        Section::About => ("Go to About", "Bio, tools and achievements"),
        Section::Skills => ("Go to Skills", "Browse skills by category"),
        Section::Projects => ("Go to Projects", "Browse and search projects"),
        Section::Education => ("Go to Education", "Degrees and certificates"),
        Section::Contact => ("Go to Contact", "Send a message"),
    };
    Command {
        label,
        description,
        category: CommandCategory::Navigation,
        keybinding: Some(keybinding),
        action: section.to_action(),
    }
}

pub fn build_command_registry() -> Vec<Command> {
    let mut commands: Vec<Command> = Section::ALL
        .iter()
        .zip(["1", "2", "3", "4", "5", "6"])
        .map(|(section, key)| go_to(*section, key))
        .collect();

    commands.extend([
        Command {
            label: "Toggle Sidebar",
            description: "Collapse or expand the section list",
            category: CommandCategory::Navigation,
            keybinding: Some("Ctrl+B"),
            action: Action::ToggleSidebar,
        },
        Command {
            label: "Toggle Theme",
            description: "Switch between light and dark mode",
            category: CommandCategory::Portfolio,
            keybinding: Some("Ctrl+T"),
            action: Action::ToggleTheme,
        },
        Command {
            label: "Download Resume",
            description: "Save the resume PDF to your downloads",
            category: CommandCategory::Portfolio,
            keybinding: None,
            action: Action::DownloadResume,
        },
        Command {
            label: "Download Skills Summary",
            description: "Save the skills summary PDF",
            category: CommandCategory::Portfolio,
            keybinding: None,
            action: Action::DownloadSkillsSummary,
        },
        Command {
            label: "Copy Portfolio Link",
            description: "Copy the portfolio URL to the clipboard",
            category: CommandCategory::Portfolio,
            keybinding: None,
            action: Action::SharePortfolio,
        },
        Command {
            label: "Reset Filters",
            description: "Show everything in the current section",
            category: CommandCategory::Portfolio,
            keybinding: Some("r"),
            action: Action::ResetFilters,
        },
        Command {
            label: "Show Help",
            description: "Open the keybindings help modal",
            category: CommandCategory::System,
            keybinding: Some("?"),
            action: Action::ShowHelp,
        },
        Command {
            label: "Quit",
            description: "Exit the application",
            category: CommandCategory::System,
            keybinding: Some("q"),
            action: Action::Quit,
        },
    ]);
    commands
}

// ============================================================================
// Palette state
// ============================================================================

pub struct CommandPaletteState {
    input: InputBuffer,
    commands: Vec<Command>,
    filtered: Vec<FilteredCommand>,
    selected: usize,
    matcher: Matcher,
}

impl CommandPaletteState {
    pub fn new(commands: Vec<Command>) -> Self {
        let len = commands.len();
        let mut state = Self {
            input: InputBuffer::new(),
            commands,
            filtered: Vec::with_capacity(len),
            selected: 0,
            matcher: Matcher::default(),
        };
        state.refilter();
        state
    }

    /// Re-run fuzzy matching against all commands using current input.
    fn refilter(&mut self) {
        self.filtered.clear();
        let query = self.input.text();

        if query.trim().is_empty() {
            // Empty input: show all commands, no highlighting
            for (i, _) in self.commands.iter().enumerate() {
                self.filtered.push(FilteredCommand {
                    command_index: i,
                    score: 0,
                    indices: Vec::new(),
                });
            }
        } else {
            let atom = Atom::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
                false,
            );

            let mut buf = Vec::new();
            for (i, cmd) in self.commands.iter().enumerate() {
                let haystack = Utf32Str::new(cmd.label, &mut buf);
                let mut indices = Vec::new();
                if let Some(score) = atom.indices(haystack, &mut self.matcher, &mut indices) {
                    self.filtered.push(FilteredCommand {
                        command_index: i,
                        score,
                        indices,
                    });
                }
            }

            // Sort by score descending
            self.filtered.sort_by(|a, b| b.score.cmp(&a.score));
        }

        if self.filtered.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.filtered.len() - 1);
        }
    }

    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + 1) % self.filtered.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + self.filtered.len() - 1) % self.filtered.len();
        }
    }

    pub fn selected_action(&self) -> Option<Action> {
        self.filtered
            .get(self.selected)
            .map(|fc| self.commands[fc.command_index].action.clone())
    }

    fn selected_description(&self) -> Option<&'static str> {
        self.filtered
            .get(self.selected)
            .map(|fc| self.commands[fc.command_index].description)
    }

    // ── Input handling ──────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> PaletteResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return PaletteResult::Consumed;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc) => PaletteResult::Close,
            (KeyModifiers::NONE, KeyCode::Enter) => match self.selected_action() {
                Some(action) => PaletteResult::Execute(action),
                None => PaletteResult::Close,
            },
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                self.select_prev();
                PaletteResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.select_next();
                PaletteResult::Consumed
            }
            _ => {
                if route_text_input(&mut self.input, *code, *modifiers) {
                    self.refilter();
                }
                // Swallow everything else
                PaletteResult::Consumed
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let modal = centered_palette_rect(area);

        frame.render_widget(Clear, modal);

        let block = palette
            .block_overlay("Command Palette")
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        if inner.height < 4 || inner.width < 10 {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // Input
            Constraint::Length(1), // Separator
            Constraint::Min(1),    // Results
            Constraint::Length(1), // Description
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(self.input.to_line("> ", "Type to search...", true, palette)),
            chunks[0],
        );

        let sep = Line::styled("─".repeat(chunks[1].width as usize), palette.dim());
        frame.render_widget(Paragraph::new(sep), chunks[1]);

        self.render_results(frame, chunks[2], palette);

        if let Some(description) = self.selected_description() {
            frame.render_widget(
                Paragraph::new(Line::styled(format!("  {description}"), palette.muted())),
                chunks[3],
            );
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.filtered.is_empty() {
            let no_match = Line::styled("  No matching commands", palette.dim());
            frame.render_widget(Paragraph::new(no_match), area);
            return;
        }

        let visible_height = area.height as usize;
        let is_filtered = !self.input.text().trim().is_empty();

        let mut lines: Vec<Line> = Vec::new();

        if is_filtered {
            // Flat list sorted by score
            for (i, fc) in self.filtered.iter().enumerate() {
                if lines.len() >= visible_height {
                    break;
                }
                let cmd = &self.commands[fc.command_index];
                lines.push(render_command_line(
                    cmd,
                    &fc.indices,
                    i == self.selected,
                    area.width,
                    palette,
                ));
            }
        } else {
            // Grouped by category
            let mut current_category: Option<CommandCategory> = None;
            for (i, fc) in self.filtered.iter().enumerate() {
                if lines.len() >= visible_height {
                    break;
                }
                let cmd = &self.commands[fc.command_index];

                if current_category != Some(cmd.category) {
                    current_category = Some(cmd.category);
                    if !lines.is_empty() && lines.len() < visible_height {
                        lines.push(Line::raw("")); // Spacer between groups
                    }
                    if lines.len() < visible_height {
                        lines.push(Line::styled(
                            format!("  {}", cmd.category.label()),
                            Style::default()
                                .fg(cmd.category.color(palette))
                                .add_modifier(Modifier::BOLD),
                        ));
                    }
                }

                if lines.len() < visible_height {
                    lines.push(render_command_line(
                        cmd,
                        &fc.indices,
                        i == self.selected,
                        area.width,
                        palette,
                    ));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn render_command_line(
    cmd: &Command,
    match_indices: &[u32],
    is_selected: bool,
    width: u16,
    palette: &Palette,
) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();

    let prefix = if is_selected { "▸ " } else { "  " };
    spans.push(Span::styled(prefix, palette.title()));

    let base_style = if is_selected {
        palette.text().add_modifier(Modifier::BOLD)
    } else {
        palette.text()
    };
    let highlight_style = if is_selected {
        palette
            .highlight()
            .add_modifier(Modifier::UNDERLINED)
    } else {
        palette.highlight()
    };

    for (i, ch) in cmd.label.chars().enumerate() {
        let style = if match_indices.contains(&(i as u32)) {
            highlight_style
        } else {
            base_style
        };
        spans.push(Span::styled(ch.to_string(), style));
    }

    // Keybinding hint (right-aligned)
    if let Some(key) = cmd.keybinding {
        let label_len = cmd.label.chars().count() + 2;
        let key_display = format!(" [{key}]");
        let padding_needed = (width as usize)
            .saturating_sub(label_len)
            .saturating_sub(key_display.len());
        if padding_needed > 0 {
            spans.push(Span::raw(" ".repeat(padding_needed)));
        }
        spans.push(Span::styled(key_display, palette.dim()));
    }

    Line::from(spans)
}

/// Palette modal position: top-center, ~50% wide, ~45% tall.
fn centered_palette_rect(area: Rect) -> Rect {
    let width = (area.width * 50 / 100).max(30).min(area.width);
    let height = (area.height * 45 / 100).max(10).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height / 6;

    Rect::new(x, y, width, height.min(area.height.saturating_sub(y - area.y)))
}

// ============================================================================
// Tests
// ============================================================================
