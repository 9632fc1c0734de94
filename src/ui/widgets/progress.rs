// src/ui/widgets/progress.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge},
};

/// Renders the completed / total gauge.
pub fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let progress = &app.progress;
    let label = format!("{}/{} domains", progress.completed, progress.total);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.ratio())
        .label(label);
    frame.render_widget(gauge, area);
}
