//! Steel & Ember color theme for the gambit editor.
//!
//! Views take colors and styles from here rather than inline `Color::*` values.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Steel blue — focused borders, active panel.
pub const PRIMARY: Color = Color::Rgb(0x46, 0x82, 0xB4);
/// Light steel — hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x87, 0xAF, 0xD7);

/// Ember — selection cursor, calls to action.
pub const ACCENT: Color = Color::Rgb(0xE8, 0x6A, 0x33);

/// Charcoal — badge foreground.
pub const BG_BASE: Color = Color::Rgb(0x14, 0x16, 0x1A);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Generated C++ in the preview pane.
pub const CODE: Color = Color::Rgb(0xC5, 0xC8, 0xC6);
/// Placeholder values ("Select BNPC...").
pub const PLACEHOLDER: Color = Color::Rgb(0x9E, 0x86, 0xC8);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn placeholder() -> Style {
    Style::default().fg(PLACEHOLDER).add_modifier(Modifier::ITALIC)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered panel block, styled by whether it has focus.
pub fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border)
}
