// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

/// Height of the inline viewport needed to show `patterns` pattern rows.
pub fn viewport_height(patterns: usize) -> u16 {
    layout::GAUGE_HEIGHT + layout::counts_height(patterns) + layout::FOOTER_HEIGHT
}

pub fn render(app: &App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.progress.found.len());

    widgets::progress::render_progress(frame, app, layout.gauge);
    widgets::summary::render_summary(frame, app, layout.counts);
    widgets::footer::render_footer(frame, app, layout.footer);
}
