//! Root layout computation for form panel + preview panel + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the form panel when panels sit side by side.
pub const FORM_WIDTH: u16 = 44;
/// Stack the panels vertically below this terminal width.
pub const STACK_THRESHOLD: u16 = 90;
/// Height of the form panel when stacked.
pub const STACKED_FORM_HEIGHT: u16 = 12;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// BNPC field and gambit list.
    pub form: Rect,
    /// Live script preview.
    pub preview: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// How the two panels are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelArrangement {
    SideBySide,
    Stacked,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> (Self, PanelArrangement) {
        let arrangement = if area.width < STACK_THRESHOLD {
            PanelArrangement::Stacked
        } else {
            PanelArrangement::SideBySide
        };

        let rows = Layout::vertical([
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let panels = match arrangement {
            PanelArrangement::SideBySide => Layout::horizontal([
                Constraint::Length(FORM_WIDTH),
                Constraint::Min(1),
            ])
            .split(content_area),
            PanelArrangement::Stacked => Layout::vertical([
                Constraint::Length(STACKED_FORM_HEIGHT),
                Constraint::Min(1),
            ])
            .split(content_area),
        };

        (
            AppLayout {
                form: panels[0],
                preview: panels[1],
                status,
            },
            arrangement,
        )
    }
}
