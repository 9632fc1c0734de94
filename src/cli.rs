// src/cli.rs

use bundle_recon::core::patterns::PatternSet;
use bundle_recon::core::scanner::fetcher::DEFAULT_USER_AGENT;
use bundle_recon::core::scanner::{DEFAULT_TIMEOUT_SECS, ScanSettings};
use bundle_recon::core::scanner::coordinator::DEFAULT_CONCURRENCY;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};
use std::path::{Path, PathBuf};

/// Checks the `main*.js` bundle of every listed domain for embedded patterns.
#[derive(Debug, Parser)]
#[command(name = "bundle-recon", version, about)]
pub struct Cli {
    /// Text file with one domain per line.
    #[arg(value_name = "DOMAINS_FILE")]
    pub domains_file: PathBuf,

    /// Per-request HTTP timeout, in seconds.
    #[arg(short, long, env = "BUNDLE_RECON_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Number of domains analyzed in parallel.
    #[arg(short = 'n', long, env = "BUNDLE_RECON_THREADS", default_value_t = DEFAULT_CONCURRENCY,
          value_parser = parse_positive)]
    pub threads: usize,

    /// Pattern to look for, as NAME=REGEX with one capture group. Repeatable;
    /// replaces the built-in authDomain pattern.
    #[arg(short, long = "pattern", value_name = "NAME=REGEX")]
    pub patterns: Vec<String>,

    /// Directory receiving the result files.
    #[arg(short, long, env = "BUNDLE_RECON_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also export a JSON report to this path.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// User agent sent with every request.
    #[arg(long, env = "BUNDLE_RECON_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Disable the live progress view.
    #[arg(long)]
    pub no_progress: bool,
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    pub fn settings(&self) -> ScanSettings {
        ScanSettings {
            timeout_secs: self.timeout,
            concurrency: self.threads,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn pattern_set(&self) -> Result<PatternSet> {
        if self.patterns.is_empty() {
            return Ok(PatternSet::defaults());
        }
        PatternSet::from_definitions(&self.patterns).wrap_err("invalid --pattern")
    }
}

/// Reads the domain list: one entry per line, trimmed, blank lines dropped.
pub fn read_domains(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        bail!("file '{}' not found", path.display());
    }
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read '{}'", path.display()))?;
    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if domains.is_empty() {
        bail!("domain list '{}' is empty", path.display());
    }
    Ok(domains)
}
