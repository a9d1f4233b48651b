use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::editor::{EditorState, GenerateOutcome};

const NOTIFICATION_TTL: u32 = 100;
const MAX_NOTIFICATIONS: usize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Panel with input focus.
    pub focus: Focus,
    /// BNPC form and preview.
    pub editor: EditorState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for follow-up events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    event_tx: mpsc::UnboundedSender<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut editor = EditorState::new();
        editor.load(&services);
        Self {
            running: true,
            focus: Focus::Entity,
            editor,
            notifications: Vec::new(),
            show_help: false,
            event_rx,
            event_tx,
            services,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
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

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
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

    /// Handle every queued follow-up event without waiting.
    pub fn drain_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 0: Ctrl+C quits from anywhere
                if is_ctrl_c(&crossterm_event) {
                    self.handle_action(Action::Quit);
                    return;
                }

                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Editor (open picker consumes everything)
                let (consumed, action) = self.editor.handle_input(&crossterm_event, self.focus);
                if let Some(action) = action {
                    self.dispatch(action);
                }
                if consumed {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

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
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(Action::GenerateScript),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::FocusNext),
                KeyCode::BackTab => Some(Action::FocusPrev),
                KeyCode::Char('a') => Some(Action::AddGambit),
                KeyCode::Char('D') => Some(Action::RemoveLastGambit),
                KeyCode::Char('g') => Some(Action::GenerateScript),
                KeyCode::Char('r') => Some(Action::ReloadData),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.event_tx.send(AppEvent::Quit).is_err() {
                    self.running = false;
                }
            }
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::SelectEntity(nameid) => {
                self.editor.select_entity(nameid, &self.services);
            }
            Action::SetGambitAction { ordinal, action_id } => {
                self.editor
                    .set_gambit_action(ordinal, action_id, &self.services);
            }
            Action::AddGambit => {
                self.editor.add_gambit(&self.services);
                self.focus = Focus::Gambits;
            }
            Action::RemoveLastGambit => {
                if !self.editor.remove_last_gambit(&self.services) {
                    self.notify("At least one gambit is required", NotificationLevel::Info);
                }
            }
            Action::RemoveGambitAt(ordinal) => {
                if !self.editor.remove_gambit_at(ordinal, &self.services) {
                    self.notify("At least one gambit is required", NotificationLevel::Info);
                }
            }
            Action::GenerateScript => match self.editor.generate(&self.services) {
                GenerateOutcome::NoEntity => {
                    self.notify("Please select a BNPC first", NotificationLevel::Warning);
                }
                GenerateOutcome::Saved => {
                    self.notify("Script generated successfully!", NotificationLevel::Success);
                }
                GenerateOutcome::Failed => {
                    self.notify("Error generating script", NotificationLevel::Error);
                }
            },
            Action::ReloadData => {
                self.editor.load(&self.services);
                self.notify("Data reloaded", NotificationLevel::Info);
            }
        }
    }

    /// Queue an action for the next loop iteration.
    fn dispatch(&self, action: Action) {
        if self.event_tx.send(AppEvent::Action(action)).is_err() {
            log::warn!("Event channel closed, action dropped");
        }
    }

    /// Queue a notification through the event channel.
    fn notify(&self, message: &str, level: NotificationLevel) {
        let event = AppEvent::Notification(Notification {
            message: message.to_string(),
            level,
            ttl_ticks: NOTIFICATION_TTL,
        });
        if self.event_tx.send(event).is_err() {
            log::warn!("Notification dropped: {message}");
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notifications.push(Notification {
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, _) = AppLayout::compute(area);

        self.editor
            .render(frame, layout.form, layout.preview, self.focus);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let target = if self.services.name_by_entity {
            Span::styled("<ClassName>.cpp", theme::muted())
        } else {
            Span::styled(
                self.services.writer.target_path().display().to_string(),
                theme::muted(),
            )
        };

        let status = Line::from(vec![
            Span::styled(" GAMBIT ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("out:", theme::key_hint()),
            Span::raw(" "),
            target,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":nav "),
            Span::styled("g", theme::key_hint()),
            Span::raw(":generate "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height).intersection(area);

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
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous panel"),
            ("g / Ctrl+S", "Generate script"),
            ("r", "Reload data files"),
            ("a", "Add gambit"),
            ("D", "Remove last gambit"),
            ("", ""),
            ("BNPC field:", ""),
            ("Enter / Space", "Open BNPC picker"),
            ("", ""),
            ("Gambits:", ""),
            ("j/k", "Move between rows"),
            ("Enter / Space", "Pick action for row"),
            ("x / Delete", "Remove selected row"),
            ("", ""),
            ("Preview:", ""),
            ("j/k", "Scroll"),
            ("Home", "Jump to top"),
            ("", ""),
            ("Picker:", ""),
            ("type", "Fuzzy filter"),
            ("Up/Down", "Move selection"),
            ("Enter", "Choose"),
            ("Esc", "Cancel"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::heading())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{key:<18}"),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::highlight()),
            Span::raw(" or "),
            Span::styled("Esc", theme::highlight()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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
