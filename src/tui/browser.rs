//! Search, category chips, selection and detail overlay for one catalog
//! collection.
//!
//! Every browsable section owns one [`CatalogBrowser`] per collection it
//! shows. The browser knows nothing about how an entry is drawn; views
//! render the rows and the overlay body, the browser renders the toolbar,
//! the empty state and the overlay frame.

use std::marker::PhantomData;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::catalog::filter::{self, category_chips, FilterState, ALL};
use crate::core::catalog::{CatalogEntry, EntryId};
use crate::core::modal::{ModalController, ModalInput, ScrollLock};

use super::layout::centered_rect;
use super::theme::Palette;
use super::widgets::input_buffer::{route_text_input, InputBuffer};

/// Outcome of routing a key through the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserInput {
    /// Not a browser key; let the view or the app handle it.
    Ignored,
    Consumed,
    /// Enter on a list row. The view decides what activation means.
    Activate(EntryId),
    /// The overlay is open and this key is for its body (links, sharing).
    Overlay(KeyCode),
}

pub struct CatalogBrowser<T> {
    filter: FilterState,
    search: InputBuffer,
    searching: bool,
    selected: usize,
    modal: ModalController<EntryId>,
    overlay_scroll: u16,
    _entries: PhantomData<fn() -> T>,
}

impl<T: CatalogEntry> CatalogBrowser<T> {
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            filter: FilterState::new(),
            search: InputBuffer::new(),
            searching: false,
            selected: 0,
            modal: ModalController::new(scroll_lock),
            overlay_scroll: 0,
            _entries: PhantomData,
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible<'a>(&self, entries: &'a [T]) -> Vec<&'a T> {
        filter::filter(entries, &self.filter)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected<'a>(&self, entries: &'a [T]) -> Option<&'a T> {
        self.visible(entries).get(self.selected).copied()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn modal(&self) -> &ModalController<EntryId> {
        &self.modal
    }

    /// The entry whose overlay is open, looked up in the full collection so
    /// a filter change underneath never orphans it.
    pub fn open_entry<'a>(&self, entries: &'a [T]) -> Option<&'a T> {
        let id = self.modal.open_id()?;
        entries.iter().find(|e| e.id() == id)
    }

    pub fn open(&mut self, id: EntryId) {
        self.searching = false;
        self.overlay_scroll = 0;
        self.modal.open(id);
    }

    pub fn close(&mut self) -> bool {
        self.modal.close()
    }

    pub fn overlay_scroll(&self) -> u16 {
        self.overlay_scroll
    }

    pub fn scroll_overlay(&mut self, delta: i16) {
        self.overlay_scroll = self.overlay_scroll.saturating_add_signed(delta);
    }

    // ── Filter state ────────────────────────────────────────────────────

    pub fn set_category(&mut self, category: &str) {
        log::debug!("{} filter category -> {category}", T::COLLECTION);
        self.filter.set_category(category);
        self.selected = 0;
    }

    pub fn set_query(&mut self, query: &str) {
        self.search.set_text(query);
        self.sync_query();
    }

    fn sync_query(&mut self) {
        self.filter.set_query(self.search.text());
        self.selected = 0;
    }

    /// "Show all": clears both axes and leaves search mode.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.search.clear();
        self.searching = false;
        self.selected = 0;
    }

    fn chip_values() -> Vec<&'static str> {
        std::iter::once(ALL)
            .chain(T::CATEGORIES.iter().map(|(value, _)| *value))
            .collect()
    }

    /// Step through the declared chips. A tag in the slot restarts at `all`.
    pub fn cycle_chip(&mut self, forward: bool) {
        let values = Self::chip_values();
        let len = values.len();
        let next = match values.iter().position(|v| *v == self.filter.category) {
            Some(pos) if forward => (pos + 1) % len,
            Some(pos) => (pos + len - 1) % len,
            None => 0,
        };
        self.set_category(values[next]);
    }

    /// Put the selected entry's next tag into the category slot, keeping the
    /// entry selected.
    pub fn cycle_tag(&mut self, entries: &[T]) {
        let Some(entry) = self.selected(entries) else {
            return;
        };
        let tags = entry.tags();
        if tags.is_empty() {
            return;
        }
        let next = match tags.iter().position(|t| *t == self.filter.category) {
            Some(pos) if pos + 1 < tags.len() => tags[pos + 1].clone(),
            Some(_) => ALL.to_string(),
            None => tags[0].clone(),
        };
        let id = entry.id();
        self.set_category(&next);
        self.selected = self
            .visible(entries)
            .iter()
            .position(|e| e.id() == id)
            .unwrap_or(0);
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        entries: &[T],
    ) -> BrowserInput {
        match self.modal.handle_key(code) {
            ModalInput::Closed => return BrowserInput::Consumed,
            ModalInput::Forward => {
                // Chorded keys belong to the app (Ctrl+C, Ctrl+P...)
                if !matches!(modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
                    return BrowserInput::Ignored;
                }
                return match code {
                    KeyCode::Char('j') | KeyCode::Down => {
                        self.scroll_overlay(1);
                        BrowserInput::Consumed
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        self.scroll_overlay(-1);
                        BrowserInput::Consumed
                    }
                    KeyCode::PageDown => {
                        self.scroll_overlay(10);
                        BrowserInput::Consumed
                    }
                    KeyCode::PageUp => {
                        self.scroll_overlay(-10);
                        BrowserInput::Consumed
                    }
                    other => BrowserInput::Overlay(other),
                };
            }
            ModalInput::Ignored => {}
        }

        if self.searching {
            match code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                _ => {
                    if route_text_input(&mut self.search, code, modifiers) {
                        self.sync_query();
                    }
                }
            }
            // Search mode swallows everything so typed letters never
            // trigger section shortcuts.
            return BrowserInput::Consumed;
        }

        let visible_len = self.visible(entries).len();
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.searching = true;
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if visible_len > 0 {
                    self.selected = (self.selected + 1).min(visible_len - 1);
                }
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.cycle_chip(true);
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.cycle_chip(false);
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('t')) => {
                self.cycle_tag(entries);
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                self.reset();
                BrowserInput::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Enter) => match self.selected(entries) {
                Some(entry) => BrowserInput::Activate(entry.id()),
                None => BrowserInput::Consumed,
            },
            _ => BrowserInput::Ignored,
        }
    }

    /// Route a click while the overlay is open. Returns true when consumed.
    pub fn handle_click(&mut self, position: Position, main: Rect) -> bool {
        !matches!(
            self.modal.handle_click(position, Self::overlay_rect(main)),
            ModalInput::Ignored
        )
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn overlay_rect(main: Rect) -> Rect {
        centered_rect(80, 80, main)
    }

    /// Two rows: the search line, then the chips with per-chip counts.
    pub fn render_toolbar(&self, frame: &mut Frame, area: Rect, entries: &[T], palette: &Palette) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let search = self
            .search
            .to_line(" / ", "Press / to search", self.searching, palette);
        frame.render_widget(Paragraph::new(search), rows[0]);

        let mut spans = vec![Span::raw(" ")];
        let mut tag_in_slot = true;
        for chip in category_chips(entries) {
            let active = chip.value == self.filter.category;
            tag_in_slot &= !active;
            spans.push(Span::styled(
                format!(" {} {} ", chip.label, chip.count),
                palette.chip(active),
            ));
            spans.push(Span::raw(" "));
        }
        if tag_in_slot {
            spans.push(Span::styled(
                format!(" #{} ", self.filter.category),
                palette.chip(true),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("{}/{}", self.visible(entries).len(), entries.len()),
            palette.dim(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }

    pub fn render_empty(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("No {}s match your filters.", T::COLLECTION),
                palette.muted(),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Press ", palette.dim()),
                Span::styled("r", palette.key_hint()),
                Span::styled(" to show all", palette.dim()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    /// Draw the overlay frame around `body`, with `footer` pinned to the
    /// last row.
    pub fn render_overlay(
        &self,
        frame: &mut Frame,
        main: Rect,
        title: &str,
        body: Vec<Line<'static>>,
        footer: Line<'static>,
        palette: &Palette,
    ) {
        let rect = Self::overlay_rect(main);
        frame.render_widget(Clear, rect);
        let block = palette.block_overlay(title);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let scroll = self
            .overlay_scroll
            .min(body.len().saturating_sub(1) as u16);
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            rows[0],
        );
        frame.render_widget(Paragraph::new(footer), rows[1]);
    }
}

/// Rows `start..end` to draw so that `selected` stays on screen.
pub fn list_window(selected: usize, len: usize, capacity: usize) -> (usize, usize) {
    if capacity == 0 || len == 0 {
        return (0, 0);
    }
    let start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    (start, (start + capacity).min(len))
}
