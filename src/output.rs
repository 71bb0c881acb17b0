//! Diagnostic rendering for terminal output.
//!
//! Everything goes to stderr so converted markup on stdout stays clean.

use crate::defaults::MISSING_WORDS_SHOWN;
use crate::phonetics::resolver::ResolveReport;
use std::path::Path;
use std::time::Duration;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// How much the binary says on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity {
    pub quiet: bool,
    pub level: u8,
}

impl Verbosity {
    pub fn new(quiet: bool, level: u8) -> Self {
        Self { quiet, level }
    }

    /// Load status and per-chapter counters (`-v`).
    pub fn shows_status(&self) -> bool {
        !self.quiet && self.level >= 1
    }

    /// Missing word listing (`-vv`).
    pub fn shows_missing_words(&self) -> bool {
        !self.quiet && self.level >= 2
    }

    /// Warnings are shown unless quiet.
    pub fn shows_warnings(&self) -> bool {
        !self.quiet
    }
}

pub fn format_dictionary_loaded(path: &Path, entries: usize, elapsed: Duration) -> String {
    format!(
        "{GREEN}Dictionary loaded{RESET}: {} {DIM}({} entries, {}ms){RESET}",
        path.display(),
        entries,
        elapsed.as_millis()
    )
}

pub fn format_dictionary_failed(path: &Path, error: &str) -> String {
    format!(
        "{RED}Dictionary failed{RESET}: {}: {}",
        path.display(),
        error
    )
}

/// One-line summary of a resolve report.
pub fn format_report(title: &str, report: &ResolveReport) -> String {
    let mut line = format!(
        "{DIM}[{title}]{RESET} {} words, {} resolved",
        report.words, report.resolved
    );
    if report.missing > 0 {
        line.push_str(&format!(", {YELLOW}{} missing{RESET}", report.missing));
    }
    if report.fallbacks > 0 {
        line.push_str(&format!(", {RED}{} malformed{RESET}", report.fallbacks));
    }
    line
}

/// Distinct missing words, capped at `limit`, with a count of the rest.
pub fn format_missing_words(report: &ResolveReport, limit: usize) -> Option<String> {
    if report.missing_words.is_empty() {
        return None;
    }
    let shown: Vec<&str> = report
        .missing_words
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect();
    let mut line = format!("{DIM}missing:{RESET} {}", shown.join(" "));
    let rest = report.missing_words.len().saturating_sub(limit);
    if rest > 0 {
        line.push_str(&format!(" {DIM}(+{rest} more){RESET}"));
    }
    Some(line)
}

pub fn report_dictionary_loaded(
    verbosity: Verbosity,
    path: &Path,
    entries: usize,
    elapsed: Duration,
) {
    if verbosity.shows_status() {
        eprintln!("{}", format_dictionary_loaded(path, entries, elapsed));
    }
}

pub fn report_dictionary_failed(verbosity: Verbosity, path: &Path, error: &str) {
    if verbosity.shows_warnings() {
        eprintln!("{}", format_dictionary_failed(path, error));
    }
}

/// Print the counters for one chapter, and its missing words at `-vv`.
pub fn report_conversion(verbosity: Verbosity, title: &str, report: &ResolveReport) {
    if !verbosity.shows_status() {
        return;
    }
    eprintln!("{}", format_report(title, report));
    if verbosity.shows_missing_words()
        && let Some(line) = format_missing_words(report, MISSING_WORDS_SHOWN)
    {
        eprintln!("  {}", line);
    }
}
