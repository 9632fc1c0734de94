// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the status line under the counts.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.state {
        AppState::Scanning => Line::from(vec![
            Span::styled("Scanning", Style::new().bold().fg(Color::Yellow)),
            Span::raw(format!(" ({} remaining)", app.progress.total.saturating_sub(app.progress.completed))),
        ]),
        AppState::Finished => Line::from(vec![
            Span::styled("Done", Style::new().bold().fg(Color::Green)),
            Span::raw(", writing result files."),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}
