//! Dropdown picker: a fuzzy-searchable popup over a list of choices.
//!
//! Opened from the BNPC field or a gambit slot. Typing filters the choices with
//! nucleo; Enter picks the highlighted choice, Esc closes without a change.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nucleo::{
    pattern::{Atom, AtomKind, CaseMatching, Normalization},
    Matcher, Utf32Str,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::catalog::Choice;
use crate::tui::theme;

/// What a picker is choosing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    Entity,
    Gambit(usize),
}

/// A choice that matched the current query, with score and match positions.
struct FilteredChoice {
    choice_index: usize,
    score: u16,
    indices: Vec<u32>,
}

/// Result of handling a picker input event.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerResult {
    /// Event consumed, picker stays open.
    Consumed,
    /// User picked a choice; carries its value.
    Select(String),
    /// User pressed Esc.
    Close,
}

pub struct PickerState {
    pub target: PickerTarget,
    title: String,
    query: String,
    choices: Vec<Choice>,
    filtered: Vec<FilteredChoice>,
    selected: usize,
    /// `choices[0]` is the "nothing selected" row.
    has_placeholder: bool,
    matcher: Matcher,
}

impl PickerState {
    /// Open over `choices`, highlighting `current` when it is among them.
    ///
    /// A `placeholder` row goes first; picking it clears the field.
    pub fn new(
        target: PickerTarget,
        title: impl Into<String>,
        placeholder: Option<Choice>,
        choices: Vec<Choice>,
        current: &str,
    ) -> Self {
        let has_placeholder = placeholder.is_some();
        let choices: Vec<Choice> = placeholder.into_iter().chain(choices).collect();
        let mut state = Self {
            target,
            title: title.into(),
            query: String::new(),
            filtered: Vec::with_capacity(choices.len()),
            choices,
            selected: 0,
            has_placeholder,
            matcher: Matcher::default(),
        };
        state.refilter();
        if let Some(pos) = state
            .filtered
            .iter()
            .position(|fc| state.choices[fc.choice_index].value == current)
        {
            state.selected = pos;
        }
        state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_count(&self) -> usize {
        self.filtered.len()
    }

    /// Re-run fuzzy matching against all choice labels.
    fn refilter(&mut self) {
        self.filtered.clear();

        if self.query.trim().is_empty() {
            self.filtered
                .extend((0..self.choices.len()).map(|choice_index| FilteredChoice {
                    choice_index,
                    score: 0,
                    indices: Vec::new(),
                }));
        } else {
            let atom = Atom::new(
                &self.query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
                false,
            );

            let mut buf = Vec::new();
            for (i, choice) in self.choices.iter().enumerate() {
                let haystack = Utf32Str::new(&choice.label, &mut buf);
                let mut indices = Vec::new();
                if let Some(score) = atom.indices(haystack, &mut self.matcher, &mut indices) {
                    self.filtered.push(FilteredChoice {
                        choice_index: i,
                        score,
                        indices,
                    });
                }
            }

            // Stable sort keeps source order among equal scores
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

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.filtered
            .get(self.selected)
            .map(|fc| &self.choices[fc.choice_index])
    }

    // ── Input handling ──────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> PickerResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return PickerResult::Consumed;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc) => PickerResult::Close,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => PickerResult::Close,
            (KeyModifiers::NONE, KeyCode::Enter) => match self.selected_choice() {
                Some(choice) => PickerResult::Select(choice.value.clone()),
                None => PickerResult::Close,
            },
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                self.select_prev();
                PickerResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.select_next();
                PickerResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::PageDown) => {
                for _ in 0..10 {
                    self.select_next();
                }
                PickerResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                for _ in 0..10 {
                    self.select_prev();
                }
                PickerResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.query.pop();
                self.refilter();
                PickerResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.query.clear();
                self.refilter();
                PickerResult::Consumed
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.query.push(c);
                self.refilter();
                PickerResult::Consumed
            }
            _ => PickerResult::Consumed,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = picker_rect(area);
        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(format!(" {} ({}/{}) ", self.title, self.filtered.len(), self.choices.len()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // Query
            Constraint::Length(1), // Separator
            Constraint::Min(1),    // Choices
        ])
        .split(inner);

        let query_line = if self.query.is_empty() {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme::PRIMARY_LIGHT)),
                Span::styled("Type to filter...", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme::PRIMARY_LIGHT)),
                Span::raw(self.query.clone()),
                Span::styled("▎", Style::default().fg(theme::ACCENT)),
            ])
        };
        frame.render_widget(Paragraph::new(query_line), chunks[0]);

        let sep = Line::styled("─".repeat(chunks[1].width as usize), theme::key_hint());
        frame.render_widget(Paragraph::new(sep), chunks[1]);

        self.render_choices(frame, chunks[2]);
    }

    fn render_choices(&self, frame: &mut Frame, area: Rect) {
        if self.filtered.is_empty() {
            let empty = if self.choices.len() == usize::from(self.has_placeholder) {
                "  No data loaded"
            } else {
                "  No matching entries"
            };
            frame.render_widget(Paragraph::new(Line::styled(empty, theme::muted())), area);
            return;
        }

        // Keep the selection inside the visible window
        let visible = area.height as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = self
            .filtered
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, fc)| {
                let choice = &self.choices[fc.choice_index];
                if self.has_placeholder && fc.choice_index == 0 {
                    placeholder_line(choice, i == self.selected)
                } else {
                    choice_line(choice, &fc.indices, i == self.selected)
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn choice_line(choice: &Choice, match_indices: &[u32], is_selected: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(choice.label.len() + 3);

    let (prefix, base) = if is_selected {
        ("▸ ", Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(theme::TEXT))
    };
    spans.push(Span::styled(prefix, Style::default().fg(theme::ACCENT)));

    let matched = Style::default()
        .fg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);
    for (i, ch) in choice.label.chars().enumerate() {
        let style = if match_indices.contains(&(i as u32)) { matched } else { base };
        spans.push(Span::styled(ch.to_string(), style));
    }

    spans.push(Span::styled(format!("  #{}", choice.value), theme::key_hint()));
    Line::from(spans)
}

fn placeholder_line(choice: &Choice, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(theme::ACCENT)),
        Span::styled(choice.label.clone(), theme::placeholder()),
    ])
}

/// `percent` of `len`, computed wide so large terminals don't overflow.
fn percent_of(len: u16, percent: u32) -> u16 {
    u16::try_from(u32::from(len) * percent / 100).unwrap_or(u16::MAX)
}

/// Popup position: centered, ~50% wide, ~60% tall.
fn picker_rect(area: Rect) -> Rect {
    let width = percent_of(area.width, 50).max(30).min(area.width);
    let height = percent_of(area.height, 60).max(10).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
