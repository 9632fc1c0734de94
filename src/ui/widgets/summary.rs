// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Renders per-pattern counts.
///
/// While scanning only the running found counts are known; once the scan is
/// finished the not-found totals are shown next to them.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Patterns");
    let found_style = Style::default().fg(Color::Green);
    let muted_style = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = match app.state {
        AppState::Scanning => app
            .progress
            .found
            .iter()
            .map(|(name, found)| {
                Line::from(vec![
                    Span::styled(format!("{name}: "), Style::default().bold()),
                    Span::styled(format!("{found} found"), found_style),
                ])
            })
            .collect(),
        AppState::Finished => app
            .summary
            .patterns
            .iter()
            .map(|pattern| {
                Line::from(vec![
                    Span::styled(format!("{}: ", pattern.name), Style::default().bold()),
                    Span::styled(format!("{} found", pattern.found), found_style),
                    Span::raw(", "),
                    Span::styled(format!("{} not found", pattern.not_found), muted_style),
                ])
            })
            .collect(),
    };

    let ignored = match app.state {
        AppState::Scanning => app.progress.skipped,
        AppState::Finished => app.summary.ignored,
    };
    lines.push(Line::from(vec![
        Span::raw("Ignored (unreachable or no main bundle): "),
        Span::styled(ignored.to_string(), Style::default().fg(Color::Yellow)),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
