//! Script editor view: BNPC field and gambit list on the left, live preview on
//! the right.
//!
//! The view owns the selection state. Every change recomputes the preview in
//! full; nothing is diffed.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::catalog::{Choice, ENTITY_SENTINEL};
use crate::core::gambits::{GambitList, DEFAULT_ACTION_ID};
use crate::core::template;
use crate::tui::events::{Action, Focus};
use crate::tui::services::Services;
use crate::tui::theme;

use super::picker::{PickerResult, PickerState, PickerTarget};

const ENTITY_PLACEHOLDER: &str = "Select BNPC...";
const ACTION_PLACEHOLDER: &str = "Select Action...";

/// Outcome of a generate request, for the caller to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The BNPC field still holds the sentinel; nothing was written.
    NoEntity,
    Saved,
    Failed,
}

pub struct EditorState {
    entity_id: u32,
    gambits: GambitList,
    /// 0-based index of the highlighted gambit row.
    selected: usize,

    entity_choices: Vec<Choice>,
    action_choices: Vec<Choice>,

    preview: String,
    preview_scroll: u16,

    picker: Option<PickerState>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            entity_id: ENTITY_SENTINEL,
            gambits: GambitList::new(),
            selected: 0,
            entity_choices: Vec::new(),
            action_choices: Vec::new(),
            preview: template::PREVIEW_PLACEHOLDER.to_string(),
            preview_scroll: 0,
            picker: None,
        }
    }

    pub fn entity_id(&self) -> u32 {
        self.entity_id
    }

    pub fn gambits(&self) -> &GambitList {
        &self.gambits
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn selected_ordinal(&self) -> usize {
        self.selected + 1
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    pub fn has_entity(&self) -> bool {
        self.entity_id != ENTITY_SENTINEL
    }

    /// Re-read both data sets and recompute the preview.
    pub fn load(&mut self, services: &Services) {
        self.entity_choices = services.entity_choices();
        self.action_choices = services.action_choices();
        log::debug!(
            "Editor loaded {} BNPCs, {} actions",
            self.entity_choices.len(),
            self.action_choices.len()
        );
        self.refresh_preview(services);
    }

    pub fn refresh_preview(&mut self, services: &Services) {
        self.preview = template::preview(
            self.entity_id,
            |id| services.resolve_entity(id),
            self.gambits.entries(),
            &services.template,
        );
        let max_scroll = self.preview.lines().count().saturating_sub(1) as u16;
        self.preview_scroll = self.preview_scroll.min(max_scroll);
    }

    // ── Selection state changes ───────────────────────────────────────────

    pub fn select_entity(&mut self, nameid: u32, services: &Services) {
        self.entity_id = nameid;
        self.refresh_preview(services);
    }

    pub fn set_gambit_action(&mut self, ordinal: usize, action_id: String, services: &Services) {
        if let Err(e) = self.gambits.set_entry_value(ordinal, action_id) {
            log::warn!("{e}");
            return;
        }
        self.refresh_preview(services);
    }

    pub fn add_gambit(&mut self, services: &Services) {
        self.gambits.add_entry();
        self.selected = self.gambits.len() - 1;
        self.refresh_preview(services);
    }

    pub fn remove_last_gambit(&mut self, services: &Services) -> bool {
        let removed = self.gambits.remove_entry();
        if removed {
            self.clamp_selection();
            self.refresh_preview(services);
        }
        removed
    }

    pub fn remove_gambit_at(&mut self, ordinal: usize, services: &Services) -> bool {
        let removed = self.gambits.remove_entry_at(ordinal);
        if removed {
            self.clamp_selection();
            self.refresh_preview(services);
        }
        removed
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.gambits.len() - 1);
    }

    /// Render the current selection and hand it to the writer.
    pub fn generate(&self, services: &Services) -> GenerateOutcome {
        if !self.has_entity() {
            return GenerateOutcome::NoEntity;
        }
        let entity = services.resolve_entity(self.entity_id);
        let text = template::generate_with(&entity, self.gambits.entries(), &services.template);
        if services.write_artifact(&entity, &text) {
            GenerateOutcome::Saved
        } else {
            GenerateOutcome::Failed
        }
    }

    // ── Input handling ─────────────────────────────────────────────────────

    /// Handle input for the focused panel. Returns an action for the app to
    /// dispatch, and whether the event was consumed.
    pub fn handle_input(&mut self, event: &Event, focus: Focus) -> (bool, Option<Action>) {
        if let Some(picker) = self.picker.as_mut() {
            let target = picker.target;
            return match picker.handle_input(event) {
                PickerResult::Consumed => (true, None),
                PickerResult::Close => {
                    self.picker = None;
                    (true, None)
                }
                PickerResult::Select(value) => {
                    self.picker = None;
                    (true, picked_action(target, value))
                }
            };
        }

        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return (false, None);
        };

        match focus {
            Focus::Entity => match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_entity_picker();
                    (true, None)
                }
                _ => (false, None),
            },
            Focus::Gambits => match code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.selected = (self.selected + 1).min(self.gambits.len() - 1);
                    (true, None)
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    (true, None)
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_action_picker();
                    (true, None)
                }
                KeyCode::Char('x') | KeyCode::Delete => {
                    (true, Some(Action::RemoveGambitAt(self.selected_ordinal())))
                }
                _ => (false, None),
            },
            Focus::Preview => match code {
                KeyCode::Char('j') | KeyCode::Down => {
                    let max_scroll = self.preview.lines().count().saturating_sub(1) as u16;
                    self.preview_scroll = (self.preview_scroll + 1).min(max_scroll);
                    (true, None)
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(1);
                    (true, None)
                }
                KeyCode::Home => {
                    self.preview_scroll = 0;
                    (true, None)
                }
                _ => (false, None),
            },
        }
    }

    fn open_entity_picker(&mut self) {
        self.picker = Some(PickerState::new(
            PickerTarget::Entity,
            "Select BNPC",
            Some(Choice::new(ENTITY_SENTINEL.to_string(), ENTITY_PLACEHOLDER)),
            self.entity_choices.clone(),
            &self.entity_id.to_string(),
        ));
    }

    fn open_action_picker(&mut self) {
        let ordinal = self.selected_ordinal();
        let current = self
            .gambits
            .get(ordinal)
            .map(|e| e.action_id.as_str())
            .unwrap_or(DEFAULT_ACTION_ID);
        self.picker = Some(PickerState::new(
            PickerTarget::Gambit(ordinal),
            format!("Gambit Pack {ordinal}"),
            Some(Choice::new(DEFAULT_ACTION_ID, ACTION_PLACEHOLDER)),
            self.action_choices.clone(),
            current,
        ));
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, form: Rect, preview: Rect, focus: Focus) {
        let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(form);
        self.render_entity_field(frame, rows[0], focus == Focus::Entity);
        self.render_gambits(frame, rows[1], focus == Focus::Gambits);
        self.render_preview(frame, preview, focus == Focus::Preview);

        if let Some(ref picker) = self.picker {
            let area = frame.area();
            picker.render(frame, area);
        }
    }

    fn render_entity_field(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = theme::panel("BNPC", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = if self.has_entity() {
            Span::styled(
                label_for(&self.entity_choices, &self.entity_id.to_string()),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(ENTITY_PLACEHOLDER, theme::placeholder())
        };

        let line = Line::from(vec![Span::raw(" "), value, Span::styled("  ▾", theme::muted())]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_gambits(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = theme::panel(&format!("Gambits ({})", self.gambits.len()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, entry) in self.gambits.entries().iter().enumerate() {
            let is_selected = focused && i == self.selected;
            let cursor = if is_selected { "▸ " } else { "  " };

            let value = if entry.is_unset() {
                Span::styled(ACTION_PLACEHOLDER, theme::placeholder())
            } else {
                Span::styled(
                    label_for(&self.action_choices, &entry.action_id),
                    if is_selected { theme::highlight() } else { Style::default().fg(theme::TEXT) },
                )
            };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(theme::ACCENT)),
                Span::styled(format!("Gambit Pack {}: ", entry.ordinal), theme::muted()),
                value,
            ]));
        }

        // Footer
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("a", theme::muted()),
            Span::raw(":add "),
            Span::styled("D", theme::muted()),
            Span::raw(":del last "),
            Span::styled("x", theme::muted()),
            Span::raw(":del "),
            Span::styled("Enter", theme::muted()),
            Span::raw(":pick"),
        ]));

        // Keep the highlighted row visible
        let visible = inner.height as usize;
        let scroll = (self.selected + 1).saturating_sub(visible.saturating_sub(2)) as u16;
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = theme::panel("Preview", focused);
        let style = if self.has_entity() {
            Style::default().fg(theme::CODE)
        } else {
            theme::placeholder()
        };
        let lines: Vec<Line> = self
            .preview
            .lines()
            .map(|l| Line::styled(l.to_string(), style))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .scroll((self.preview_scroll, 0)),
            area,
        );
    }
}

fn picked_action(target: PickerTarget, value: String) -> Option<Action> {
    match target {
        PickerTarget::Entity => match value.parse::<u32>() {
            Ok(id) => Some(Action::SelectEntity(id)),
            Err(_) => {
                log::warn!("Ignoring non-numeric BNPC id {value:?}");
                None
            }
        },
        PickerTarget::Gambit(ordinal) => Some(Action::SetGambitAction {
            ordinal,
            action_id: value,
        }),
    }
}

/// Display label for a stored value, or `#value` when the data set lacks it.
fn label_for(choices: &[Choice], value: &str) -> String {
    choices
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| format!("#{value}"))
}
