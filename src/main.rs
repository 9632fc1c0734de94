// src/main.rs

use bundle_recon::core::models::ResultAggregate;
use bundle_recon::core::scanner::run_scan;
use bundle_recon::output::{self, ScanReport};
use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::tty::IsTty;
use ratatui::{prelude::*, TerminalOptions, Viewport};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use tracing::{info, warn};

mod app;
mod cli;
mod logging;
mod ui;

use app::App;

type ProgressTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    let log_path = logging::initialize_logging()?;

    let domains = cli::read_domains(&cli.domains_file)?;
    let patterns = cli.pattern_set()?;
    let settings = cli.settings();
    info!(
        domains = domains.len(),
        patterns = ?patterns.names().collect::<Vec<_>>(),
        timeout_secs = settings.timeout_secs,
        concurrency = settings.concurrency,
        "Configuration loaded."
    );

    let mut app = App::new(domains.len(), patterns.names().map(String::from).collect());
    let mut terminal = if !cli.no_progress && stdout().is_tty() {
        Some(progress_terminal(ui::viewport_height(patterns.len()))?)
    } else {
        None
    };
    draw(&mut terminal, &app);

    let started_at = Utc::now();
    let aggregate = run_scan(&domains, patterns, &settings, |progress| {
        app.update(progress);
        draw(&mut terminal, &app);
    })
    .await?;
    let finished_at = Utc::now();

    app.finish(&aggregate);
    draw(&mut terminal, &app);
    if let Some(terminal) = terminal.take() {
        release_terminal(terminal)?;
    }

    let written = output::write_results(&aggregate, &cli.output_dir)
        .wrap_err("failed to write result files")?;
    if let Some(path) = &cli.report {
        ScanReport::new(&aggregate, &settings, domains.len(), started_at, finished_at)
            .write(path)
            .wrap_err("failed to write JSON report")?;
    }

    print_summary(&aggregate, &written, cli.report.as_ref());
    info!(log = %log_path.display(), "Run complete.");
    Ok(())
}

fn progress_terminal(height: u16) -> Result<ProgressTerminal> {
    let terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions { viewport: Viewport::Inline(height) },
    )
    .wrap_err("failed to set up the progress view")?;
    Ok(terminal)
}

/// Parks the cursor under the inline viewport so the summary prints below it.
fn release_terminal(mut terminal: ProgressTerminal) -> Result<()> {
    let area = terminal.get_frame().area();
    terminal.set_cursor_position(Position::new(0, area.bottom().saturating_sub(1)))?;
    terminal.show_cursor()?;
    println!();
    Ok(())
}

/// Redraws the progress view, if any. Drawing failures are logged and ignored;
/// they must not interrupt the scan.
fn draw(terminal: &mut Option<ProgressTerminal>, app: &App) {
    if let Some(terminal) = terminal.as_mut() {
        if let Err(e) = terminal.draw(|frame| ui::render(app, frame)) {
            warn!(error = %e, "Failed to draw progress view.");
        }
    }
}

fn print_summary(aggregate: &ResultAggregate, written: &[PathBuf], report: Option<&PathBuf>) {
    println!("Summary:");
    for (name, bucket) in aggregate.buckets() {
        println!(
            "  Pattern '{}': found = {}, not found = {}",
            name,
            bucket.found.len(),
            bucket.not_found.len()
        );
    }
    println!("  Ignored (failure or no main bundle): {}", aggregate.skipped.len());

    let mut files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    if let Some(report) = report {
        files.push(report.display().to_string());
    }
    println!("Files written:");
    println!("{}", files.join(", "));
}
