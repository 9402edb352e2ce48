//! Root layout: sidebar, section header, content and status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded sidebar (icon + section label).
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 16;
/// Width of the collapsed sidebar (single-char icons).
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;
/// Auto-collapse sidebar below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 70;
/// Hide sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 30;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Sidebar area (None if hidden).
    pub sidebar: Option<Rect>,
    /// One-row section header above the content.
    pub header: Rect,
    /// Section content area (also hosts the backdrop).
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Sidebar visibility derived from terminal width and user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl AppLayout {
    /// Compute layout regions from the terminal area and sidebar state.
    ///
    /// `user_collapsed`: user has toggled collapse with Ctrl+B.
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, SidebarVisibility) {
        let visibility = if area.width < HIDE_SIDEBAR_THRESHOLD {
            SidebarVisibility::Hidden
        } else if user_collapsed || area.width < AUTO_COLLAPSE_THRESHOLD {
            SidebarVisibility::Collapsed
        } else {
            SidebarVisibility::Expanded
        };

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let (content_area, status) = (rows[0], rows[1]);

        let sidebar_width = match visibility {
            SidebarVisibility::Hidden => 0,
            SidebarVisibility::Collapsed => SIDEBAR_COLLAPSED_WIDTH,
            SidebarVisibility::Expanded => SIDEBAR_EXPANDED_WIDTH,
        };
        let cols = Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(content_area);
        let sidebar = (sidebar_width > 0).then_some(cols[0]);

        let right = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(cols[1]);

        (
            AppLayout {
                sidebar,
                header: right[0],
                main: right[1],
                status,
            },
            visibility,
        )
    }
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
