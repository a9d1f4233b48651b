/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input.
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or the editor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusNext,
    FocusPrev,

    // Selection state
    SelectEntity(u32),
    SetGambitAction { ordinal: usize, action_id: String },
    AddGambit,
    RemoveLastGambit,
    RemoveGambitAt(usize),

    // Output
    GenerateScript,
    ReloadData,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which panel of the editor has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Entity,
    Gambits,
    Preview,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Entity, Focus::Gambits, Focus::Preview];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Entity => "BNPC",
            Focus::Gambits => "Gambits",
            Focus::Preview => "Preview",
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
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
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
