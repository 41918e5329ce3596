//! Line mode: every stdin line is an independent document.
//!
//! Echoes each line and annotates it with the date found in it, so a batch of
//! OCR results (one per line) can be reviewed or post-processed in one pass.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use colored::Colorize;
use datefinder_core::{select, DateFinder, DateMatch};

use crate::output;

/// Configuration for line mode.
pub struct LineModeConfig {
    pub reference: NaiveDate,
    /// Annotate every match instead of just the selected one
    pub all: bool,
    /// Output JSON Lines instead of human-readable
    pub json: bool,
}

/// Run line mode, processing stdin line by line.
pub fn run_line_mode(finder: &DateFinder, config: &LineModeConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    process_lines(finder, stdin.lock(), &mut out, config)
}

fn process_lines(
    finder: &DateFinder,
    input: impl BufRead,
    out: &mut impl Write,
    config: &LineModeConfig,
) -> io::Result<()> {
    for (index, line_result) in input.lines().enumerate() {
        let line = line_result?;
        let matches = finder.extract_all(&line, config.reference);
        let best = select(matches.iter().cloned());
        tracing::debug!(line = index + 1, found = best.is_some(), "line processed");

        if config.json {
            print_json_line(out, index + 1, &line, best.as_ref(), &matches, config)?;
        } else {
            print_annotated_line(out, &line, best.as_ref(), &matches, config)?;
        }
    }
    Ok(())
}

fn print_annotated_line(
    out: &mut impl Write,
    line: &str,
    best: Option<&DateMatch>,
    matches: &[DateMatch],
    config: &LineModeConfig,
) -> io::Result<()> {
    writeln!(out, "{}", line)?;

    let shown: Vec<&DateMatch> = if config.all {
        matches.iter().collect()
    } else {
        best.into_iter().collect()
    };

    for m in shown {
        writeln!(
            out,
            "  {} {} {}",
            "\u{21b3}".cyan(),
            m.text.yellow(),
            format!("({})", m.date).dimmed()
        )?;
    }
    Ok(())
}

fn print_json_line(
    out: &mut impl Write,
    line_number: usize,
    line: &str,
    best: Option<&DateMatch>,
    matches: &[DateMatch],
    config: &LineModeConfig,
) -> io::Result<()> {
    let mut report = output::json_report(config.reference, best, config.all.then_some(matches));
    report["line"] = line_number.into();
    report["text"] = line.into();

    let encoded = serde_json::to_string(&report).map_err(io::Error::other)?;
    writeln!(out, "{}", encoded)
}
