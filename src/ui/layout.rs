// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const GAUGE_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

/// Rows taken by the counts panel: one per pattern, one for ignored domains, two for borders.
pub fn counts_height(patterns: usize) -> u16 {
    u16::try_from(patterns).unwrap_or(u16::MAX).saturating_add(3)
}

/// Areas of the inline progress view, top to bottom.
pub struct AppLayout {
    pub gauge: Rect,
    pub counts: Rect,
    pub footer: Rect,
}

pub fn create_layout(frame_size: Rect, patterns: usize) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GAUGE_HEIGHT),
            Constraint::Length(counts_height(patterns)),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame_size);

    AppLayout {
        gauge: chunks[0],
        counts: chunks[1],
        footer: chunks[2],
    }
}
