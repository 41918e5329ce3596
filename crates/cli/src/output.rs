//! Human-readable and JSON rendering of extraction results.

use chrono::NaiveDate;
use colored::Colorize;
use datefinder_core::{DateMatch, PatternInfo};
use serde_json::{json, Value};

/// The one-line announcement for a document.
pub fn render_found(found: Option<&DateMatch>) -> String {
    match found {
        Some(m) => format!("{} {}", "Date found:".green().bold(), m.text.yellow()),
        None => "No date detected".red().to_string(),
    }
}

/// Every match in scan order, the selected one marked with `*`.
pub fn render_all(matches: &[DateMatch], best: Option<&DateMatch>) -> String {
    if matches.is_empty() {
        return format!("{}\n", render_found(None));
    }

    let width = matches.iter().map(|m| m.text.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for m in matches {
        let marker = if Some(m) == best {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let padding = " ".repeat(width - m.text.chars().count());
        out.push_str(&format!(
            "{} {}{}  {}  {} {}\n",
            marker,
            m.text.yellow(),
            padding,
            m.date.to_string().cyan(),
            m.pattern.dimmed(),
            format!("({})", m.format).dimmed()
        ));
    }
    out
}

/// The pattern catalog with examples, then the format ids in trial order.
pub fn render_patterns(infos: &[PatternInfo], format_ids: &[&str]) -> String {
    let mut out = format!("{}\n\n", "Date Patterns".bold().underline());
    for info in infos {
        out.push_str(&format!(
            "  {} {} - {}\n",
            "→".cyan(),
            info.id.yellow(),
            info.description
        ));
        let examples: Vec<_> = info.examples.iter().map(|e| e.green().to_string()).collect();
        out.push_str(&format!(
            "      {}\n",
            format!("e.g. {}", examples.join(", ")).dimmed()
        ));
    }

    out.push_str(&format!("\n{}\n\n", "Interpretations (tried in order)".bold().underline()));
    for id in format_ids {
        out.push_str(&format!("  {}\n", id));
    }
    out
}

/// JSON report for one document. `matches` is included only when requested.
pub fn json_report(
    reference: NaiveDate,
    best: Option<&DateMatch>,
    matches: Option<&[DateMatch]>,
) -> Value {
    let mut report = json!({
        "reference_date": reference.format("%Y-%m-%d").to_string(),
        "best": best,
    });
    if let Some(matches) = matches {
        report["matches"] = json!(matches);
    }
    report
}
