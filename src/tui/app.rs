use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::{mpsc, watch};

use crate::config::TuiConfig;
use crate::core::assets::{resume_file_name, AssetKind};
use crate::core::preference::ThemePreference;
use crate::core::share::SharePlatform;

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel, Section};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme::{self, Palette};
use super::views::about::AboutState;
use super::views::command_palette::{build_command_registry, CommandPaletteState, PaletteResult};
use super::views::contact::ContactState;
use super::views::education::EducationState;
use super::views::hero::HeroState;
use super::views::projects::ProjectsState;
use super::views::skills::SkillsState;
use super::widgets::backdrop::{Backdrop, Starfield};

/// Most notifications shown at once.
const MAX_NOTIFICATIONS: usize = 3;
/// Ticks a notification stays on screen.
const NOTIFICATION_TTL: u32 = 100;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Section shown in the main area.
    pub section: Section,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    pub sidebar: SidebarState,
    pub hero: HeroState,
    pub about: AboutState,
    pub skills: SkillsState,
    pub projects: ProjectsState,
    pub education: EducationState,
    pub contact: ContactState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Command palette state (Some when open).
    pub command_palette: Option<CommandPaletteState>,
    /// Colors for the current theme preference.
    palette: Palette,
    theme_rx: watch::Receiver<ThemePreference>,
    backdrop: Option<Box<dyn Backdrop>>,
    /// Last known terminal size.
    viewport: Rect,
    /// Receiver for background events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        config: &TuiConfig,
    ) -> Self {
        let theme_rx = services.preferences.subscribe();
        let palette = Palette::for_preference(*theme_rx.borrow());
        let backdrop: Option<Box<dyn Backdrop>> = if config.backdrop {
            Some(Box::new(Starfield::new(config.star_count)))
        } else {
            None
        };
        let lock = services.scroll_lock.clone();

        Self {
            running: true,
            section: Section::Hero,
            area_focus: AreaFocus::Main,
            sidebar: SidebarState::new(),
            hero: HeroState::new(),
            about: AboutState::new(),
            skills: SkillsState::new(lock.clone()),
            projects: ProjectsState::new(lock.clone()),
            education: EducationState::new(lock),
            contact: ContactState::new(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            command_palette: None,
            palette,
            theme_rx,
            backdrop,
            viewport: Rect::default(),
            event_rx,
            services,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        let size = terminal.size()?;
        self.set_viewport(Rect::new(0, 0, size.width, size.height));

        while self.running {
            self.sync_theme();
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        log::info!("Event loop finished");
        Ok(())
    }

    /// Pick up a theme change published by the preference store.
    fn sync_theme(&mut self) {
        if self.theme_rx.has_changed().unwrap_or(false) {
            let preference = *self.theme_rx.borrow_and_update();
            self.palette = Palette::for_preference(preference);
            log::debug!("Palette switched to {preference}");
        }
    }

    fn layout(&self) -> AppLayout {
        AppLayout::compute(self.viewport, self.sidebar.user_collapsed).0
    }

    fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        let main = self.layout().main;
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.on_resize(main);
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Resize(width, height)) => {
                self.set_viewport(Rect::new(0, 0, width, height));
            }
            AppEvent::Input(Event::Mouse(mouse)) => self.handle_mouse(&mouse),
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Command palette consumes all input when open
                if let Some(ref mut palette) = self.command_palette {
                    match palette.handle_input(&crossterm_event) {
                        PaletteResult::Consumed => return,
                        PaletteResult::Execute(action) => {
                            self.command_palette = None;
                            self.handle_action(action);
                            return;
                        }
                        PaletteResult::Close => {
                            self.command_palette = None;
                            return;
                        }
                    }
                }

                // Priority 2: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 3: Sidebar navigation
                if self.area_focus == AreaFocus::Sidebar
                    && self.handle_sidebar_input(&crossterm_event)
                {
                    return;
                }

                // Priority 4: Active section (overlays, search, form editing)
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::ContactSent(result) => self.contact.on_sent(result, &self.services),
            AppEvent::ContactStatusExpired(epoch) => self.contact.on_status_expired(epoch),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        let services = &self.services;
        match self.section {
            Section::Hero => self.hero.handle_input(event, services),
            Section::About => self.about.handle_input(event, services),
            Section::Skills => self.skills.handle_input(event, services),
            Section::Projects => self.projects.handle_input(event, services),
            Section::Education => self.education.handle_input(event, services),
            Section::Contact => self.contact.handle_input(event, services),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some(backdrop) = self.backdrop.as_mut() {
                    backdrop.on_pointer(Position::new(mouse.column, mouse.row));
                }
            }
            _ if self.command_palette.is_some() || self.show_help => {}
            _ => {
                let main = self.layout().main;
                let services = &self.services;
                match self.section {
                    Section::About => {
                        self.about.handle_mouse(mouse);
                    }
                    Section::Skills => {
                        self.skills.handle_mouse(mouse, main, services);
                    }
                    Section::Projects => {
                        self.projects.handle_mouse(mouse, main, services);
                    }
                    Section::Education => {
                        self.education.handle_mouse(mouse, main, services);
                    }
                    Section::Hero | Section::Contact => {}
                }
            }
        }
    }

    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
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
            (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                let section = self.sidebar.selected_section();
                self.handle_action(section.to_action());
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
                let area = self.viewport;
                self.set_viewport(area);
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.area_focus = AreaFocus::Main;
                true
            }
            _ => false,
        }
    }

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(Action::OpenCommandPalette),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(Action::ToggleTheme),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char(c @ '1'..='6') => {
                    let index = c as usize - '1' as usize;
                    Some(Section::ALL[index].to_action())
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        if action.is_navigation() && self.services.scroll_lock.is_locked() {
            log::debug!("Ignoring {action:?} while a detail overlay is open");
            return;
        }

        match action {
            Action::Quit => self.running = false,
            Action::FocusHero => self.set_section(Section::Hero),
            Action::FocusAbout => self.set_section(Section::About),
            Action::FocusSkills => self.set_section(Section::Skills),
            Action::FocusProjects => self.set_section(Section::Projects),
            Action::FocusEducation => self.set_section(Section::Education),
            Action::FocusContact => self.set_section(Section::Contact),
            Action::TabNext => self.set_section(self.section.next()),
            Action::TabPrev => self.set_section(self.section.prev()),
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
                if !self.sidebar.user_collapsed {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to(self.section);
                } else {
                    self.area_focus = AreaFocus::Main;
                }
                let area = self.viewport;
                self.set_viewport(area);
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::OpenCommandPalette => {
                self.command_palette = Some(CommandPaletteState::new(build_command_registry()));
            }
            Action::CloseCommandPalette => {
                self.command_palette = None;
            }
            Action::ToggleTheme => match self.services.preferences.toggle() {
                Ok(theme) => log::info!("Theme switched to {theme}"),
                Err(e) => {
                    log::warn!("Theme changed but not saved: {e}");
                    self.push_notification(
                        "Theme changed for this session only".to_string(),
                        NotificationLevel::Warning,
                    );
                }
            },
            Action::DownloadResume => {
                let name = resume_file_name(&self.services.catalog.profile.name);
                self.services.download(AssetKind::Resume, &name);
            }
            Action::DownloadSkillsSummary => {
                self.services.download(
                    AssetKind::SkillsSummary,
                    AssetKind::SkillsSummary.file_name(),
                );
            }
            Action::SharePortfolio => {
                let profile = &self.services.catalog.profile;
                self.services
                    .share(SharePlatform::Clipboard, &profile.portfolio_url, &profile.name);
            }
            Action::ResetFilters => match self.section {
                Section::Skills => self.skills.reset(),
                Section::Projects => self.projects.reset(),
                Section::Education => self.education.reset(),
                _ => {}
            },
        }
    }

    /// Set the section and sync sidebar selection.
    fn set_section(&mut self, section: Section) {
        if section != self.section {
            log::debug!("Section {} -> {}", self.section.label(), section.label());
        }
        self.section = section;
        self.sidebar.sync_to(section);
        self.area_focus = AreaFocus::Main;
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, advance animations.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        self.hero.on_tick(self.services.catalog.profile.roles.len());
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.on_tick();
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = &self.palette;

        frame.render_widget(Block::default().style(palette.base()), area);

        let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

        if let Some(ref backdrop) = self.backdrop {
            backdrop.render(frame.buffer_mut(), palette);
        }

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(
                frame,
                sidebar_area,
                visibility,
                self.section,
                self.area_focus,
                palette,
            );
        }

        self.render_header(frame, layout.header);
        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }

        if let Some(ref command_palette) = self.command_palette {
            command_palette.render(frame, area, palette);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let palette = &self.palette;
        let (theme_icon, theme_label) = match *self.theme_rx.borrow() {
            ThemePreference::Light => ("☀", "light"),
            ThemePreference::Dark => ("☾", "dark"),
        };

        let chunks = Layout::horizontal([Constraint::Min(1), Constraint::Length(20)]).split(area);

        let title = Line::from(vec![
            Span::styled(format!(" {} ", self.section.icon()), palette.title()),
            Span::styled(self.section.label(), palette.heading()),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let toggle = Line::from(vec![
            Span::styled(format!("{theme_icon} {theme_label} "), palette.muted()),
            Span::styled("Ctrl+T", palette.key_hint()),
            Span::raw(" "),
        ]);
        frame.render_widget(
            Paragraph::new(toggle).alignment(Alignment::Right),
            chunks[1],
        );
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let services = &self.services;
        let profile = &services.catalog.profile;
        let palette = &self.palette;
        match self.section {
            Section::Hero => self.hero.render(frame, area, profile, palette),
            Section::About => self.about.render(frame, area, profile, palette),
            Section::Skills => self.skills.render(frame, area, services, palette),
            Section::Projects => self.projects.render(frame, area, services, palette),
            Section::Education => self.education.render(frame, area, services, palette),
            Section::Contact => self.contact.render(frame, area, profile, palette),
        }
    }

    /// Whether keystrokes currently go into a text field.
    fn is_typing(&self) -> bool {
        match self.section {
            Section::Contact => self.contact.is_editing(),
            Section::Skills => self.skills.browser.is_searching(),
            Section::Projects => self.projects.browser.is_searching(),
            Section::Education => self.education.is_searching(),
            Section::Hero | Section::About => false,
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let palette = &self.palette;
        let mode_indicator = if self.is_typing() {
            Span::styled(" INSERT ", palette.insert_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" FOLIO ", palette.brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.section.label(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("Tab", palette.key_hint()),
            Span::styled(":nav ", palette.muted()),
            Span::styled("Ctrl+B", palette.key_hint()),
            Span::styled(":sidebar ", palette.muted()),
            Span::styled("?", palette.key_hint()),
            Span::styled(":help ", palette.muted()),
            Span::styled("Ctrl+P", palette.key_hint()),
            Span::styled(":cmd ", palette.muted()),
            Span::styled("q", palette.key_hint()),
            Span::styled(":quit", palette.muted()),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height.saturating_sub(1));
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height);

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::styled(n.message.as_str(), self.palette.text()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(self.palette.bg_surface)),
            notification_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let palette = &self.palette;
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous section"),
            ("1-6", "Jump to section by number"),
            ("Ctrl+P", "Open command palette"),
            ("Ctrl+B", "Toggle sidebar collapse/expand"),
            ("Ctrl+T", "Toggle light/dark theme"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Sidebar (when focused):", ""),
            ("j/k", "Navigate up/down"),
            ("Enter / l", "Open section"),
            ("h", "Collapse sidebar"),
            ("Esc", "Focus main content"),
            ("", ""),
            ("Skills, Projects, Education:", ""),
            ("/", "Search by text"),
            ("h/l", "Previous / next category"),
            ("t", "Cycle tag filter"),
            ("r", "Show everything"),
            ("j/k", "Select entry"),
            ("Enter", "Open details"),
            ("Esc / click outside", "Close details"),
            ("e / c", "Education / certificates pane"),
            ("", ""),
            ("Home & About:", ""),
            ("a / p / c", "Jump to About / Projects / Contact"),
            ("d", "Download resume"),
            ("s", "Copy portfolio link"),
            ("", ""),
            ("Contact:", ""),
            ("i / Enter", "Edit the focused field"),
            ("Tab / Shift+Tab", "Next / previous field (editing)"),
            ("Ctrl+S / s", "Send message"),
            ("m", "Open in mail client"),
            ("Esc", "Stop editing"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", palette.heading())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), palette.heading())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<22}", key), palette.key_hint()),
                    Span::styled(*desc, palette.text()),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  Press ", palette.muted()),
            Span::styled("?", palette.key_hint()),
            Span::styled(" or ", palette.muted()),
            Span::styled("Esc", palette.key_hint()),
            Span::styled(" to close", palette.muted()),
        ]));

        let block = palette
            .block_overlay("Help")
            .title_alignment(Alignment::Center);

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::filter::ALL;
    use crate::core::contact::Field;
    use crate::tui::services::test_support::services;
    use crossterm::event::{KeyEventState, MouseButton};
    use ratatui::backend::TestBackend;

    fn app() -> AppState {
        let (services, rx) = services();
        let config = TuiConfig {
            backdrop: false,
            ..TuiConfig::default()
        };
        let mut app = AppState::new(rx, services, &config);
        app.set_viewport(Rect::new(0, 0, 100, 30));
        app
    }

    fn key(app: &mut AppState, code: KeyCode) {
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    fn ctrl(app: &mut AppState, c: char) {
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        ))));
    }

    #[test]
    fn test_notifications_dedup_and_cap() {
        let mut app = app();
        app.push_notification("one".into(), NotificationLevel::Info);
        app.push_notification("one".into(), NotificationLevel::Info);
        assert_eq!(app.notifications.len(), 1);

        for msg in ["two", "three", "four"] {
            app.push_notification(msg.into(), NotificationLevel::Info);
        }
        let messages: Vec<_> = app.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["two", "three", "four"]);
    }

    #[test]
    fn test_notifications_expire_after_ttl() {
        let mut app = app();
        app.push_notification("bye".into(), NotificationLevel::Success);
        for _ in 0..NOTIFICATION_TTL - 1 {
            app.on_tick();
        }
        assert_eq!(app.notifications.len(), 1);
        app.on_tick();
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_number_keys_jump_to_sections() {
        let mut app = app();
        key(&mut app, KeyCode::Char('4'));
        assert_eq!(app.section, Section::Projects);
        key(&mut app, KeyCode::Char('6'));
        assert_eq!(app.section, Section::Contact);
        assert_eq!(app.sidebar.selected_section(), Section::Contact);
    }

    #[test]
    fn test_tab_cycles_sections() {
        let mut app = app();
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::About);
        key(&mut app, KeyCode::BackTab);
        key(&mut app, KeyCode::BackTab);
        assert_eq!(app.section, Section::Contact);
    }

    #[test]
    fn test_navigation_blocked_while_overlay_open() {
        let mut app = app();
        app.handle_action(Action::FocusProjects);
        key(&mut app, KeyCode::Enter);
        assert!(app.services.scroll_lock.is_locked());

        key(&mut app, KeyCode::Tab);
        app.handle_action(Action::FocusContact);
        assert_eq!(app.section, Section::Projects);

        key(&mut app, KeyCode::Esc);
        assert!(!app.services.scroll_lock.is_locked());
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::Education);
    }

    #[test]
    fn test_ctrl_c_quits_with_overlay_open() {
        let mut app = app();
        app.handle_action(Action::FocusProjects);
        key(&mut app, KeyCode::Enter);
        assert!(app.projects.browser.modal().is_open());

        ctrl(&mut app, 'c');
        assert!(!app.running);
    }

    #[test]
    fn test_quit_key_types_while_editing_contact() {
        let mut app = app();
        app.handle_action(Action::FocusContact);
        key(&mut app, KeyCode::Char('i'));
        key(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.contact.form().value(Field::Name), "q");

        key(&mut app, KeyCode::Esc);
        key(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_theme_toggle_switches_palette() {
        let mut app = app();
        assert_eq!(*app.palette(), Palette::LIGHT);
        ctrl(&mut app, 't');
        app.sync_theme();
        assert_eq!(*app.palette(), Palette::DARK);
        assert_eq!(app.services.preferences.get(), ThemePreference::Dark);
    }

    #[test]
    fn test_command_palette_executes_action() {
        let mut app = app();
        ctrl(&mut app, 'p');
        assert!(app.command_palette.is_some());
        for c in "gopro".chars() {
            key(&mut app, KeyCode::Char(c));
        }
        key(&mut app, KeyCode::Enter);
        assert!(app.command_palette.is_none());
        assert_eq!(app.section, Section::Projects);
    }

    #[test]
    fn test_help_modal_swallows_keys() {
        let mut app = app();
        key(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        key(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        key(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_sidebar_focus_navigation() {
        let mut app = app();
        ctrl(&mut app, 'b');
        assert!(app.sidebar.user_collapsed);
        assert_eq!(app.area_focus, AreaFocus::Main);

        ctrl(&mut app, 'b');
        assert_eq!(app.area_focus, AreaFocus::Sidebar);
        key(&mut app, KeyCode::Char('j'));
        key(&mut app, KeyCode::Char('j'));
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.section, Section::Skills);
        assert_eq!(app.area_focus, AreaFocus::Main);
    }

    #[test]
    fn test_reset_filters_targets_current_section() {
        let mut app = app();
        app.handle_action(Action::FocusSkills);
        key(&mut app, KeyCode::Char('l'));
        assert_ne!(app.skills.browser.filter_state().category, ALL);
        app.handle_action(Action::ResetFilters);
        assert_eq!(app.skills.browser.filter_state().category, ALL);
    }

    #[test]
    fn test_download_resume_reports_missing_asset() {
        let mut app = app();
        app.handle_action(Action::DownloadResume);
        match app.event_rx.try_recv().unwrap() {
            AppEvent::Notification(n) => assert_eq!(n.level, NotificationLevel::Error),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        })));
        assert!(app.running);
    }

    #[test]
    fn test_click_outside_closes_overlay() {
        let mut app = app();
        app.handle_action(Action::FocusSkills);
        key(&mut app, KeyCode::Enter);
        assert!(app.skills.browser.modal().is_open());

        app.handle_event(AppEvent::Input(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 99,
            row: 29,
            modifiers: KeyModifiers::NONE,
        })));
        assert!(!app.skills.browser.modal().is_open());
        assert!(!app.services.scroll_lock.is_locked());
    }

    #[test]
    fn test_every_section_renders() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for section in Section::ALL {
            app.handle_action(section.to_action());
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
        app.handle_action(Action::ShowHelp);
        app.handle_action(Action::OpenCommandPalette);
        app.push_notification("hello".into(), NotificationLevel::Info);
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
