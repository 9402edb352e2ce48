use crate::core::contact::SendError;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for animations, notification TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse/resize).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// The contact message send finished.
    ContactSent(Result<(), SendError>),
    /// The contact status banner for this epoch should go back to idle.
    ContactStatusExpired(u64),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or command palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusHero,
    FocusAbout,
    FocusSkills,
    FocusProjects,
    FocusEducation,
    FocusContact,
    TabNext,
    TabPrev,
    ToggleSidebar,

    // Modals
    OpenCommandPalette,
    CloseCommandPalette,
    ShowHelp,
    CloseHelp,

    // Portfolio
    ToggleTheme,
    DownloadResume,
    DownloadSkillsSummary,
    SharePortfolio,
    ResetFilters,

    // Application
    Quit,
}

impl Action {
    /// Whether the action moves the page (blocked while an overlay holds
    /// the scroll lock).
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::FocusHero
                | Action::FocusAbout
                | Action::FocusSkills
                | Action::FocusProjects
                | Action::FocusEducation
                | Action::FocusContact
                | Action::TabNext
                | Action::TabPrev
        )
    }
}

/// Whether the sidebar or the main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFocus {
    Sidebar,
    Main,
}

/// Portfolio sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Hero,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Education,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Contact => "Contact",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Hero => "⌂",
            Section::About => "☺",
            Section::Skills => "⚙",
            Section::Projects => "◆",
            Section::Education => "✎",
            Section::Contact => "✉",
        }
    }

    pub fn next(self) -> Section {
        let idx = Section::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Section::ALL[(idx + 1) % Section::ALL.len()]
    }

    pub fn prev(self) -> Section {
        let idx = Section::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Section::ALL[(idx + Section::ALL.len() - 1) % Section::ALL.len()]
    }

    pub fn to_action(self) -> Action {
        match self {
            Section::Hero => Action::FocusHero,
            Section::About => Action::FocusAbout,
            Section::Skills => Action::FocusSkills,
            Section::Projects => Action::FocusProjects,
            Section::Education => Action::FocusEducation,
            Section::Contact => Action::FocusContact,
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
