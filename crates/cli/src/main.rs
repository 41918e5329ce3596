mod config;
mod output;
mod pipe;

use config::Config;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use colored::{control::set_override, Colorize};
use datefinder_core::{normalize, parse_reference_date, select, DateFinder, FinderConfig};
use is_terminal::IsTerminal;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LONG_ABOUT: &str = r##"
datefind finds the most relevant calendar date in noisy OCR text.

Feed it the text a recognizer produced from a receipt, label or letter. It
cleans up common OCR damage, scans for date-shaped text, keeps only real
calendar dates and reports the latest one.

RECOGNIZED DATES:
  Numeric:      25/01/1971, 01/25/1971, 21.03.2020, 25-01-71
  Year first:   1971-01-25, 2024/03/05, 2020.12.31, 71-01-25
  Month names:  January 25, 1971 / 25 January 1971 / 25th of Jan. 71 / 25-Jan-71
  Weekdays:     Mon, Jan 25, 1971 / Monday 25th of January 1971

  Ambiguous numeric dates read day first (01/02/2024 is 1 February).
  Two-digit years land in the 100 years ending 15 years after the reference
  date (see --pivot-lookahead).

EXAMPLES:
  datefind "Invoice: 01/01/2020. Due: 15/06/2021."
  datefind @receipt.txt               Read a file
  tesseract scan.png - | datefind     Read piped OCR output
  datefind --all "..."                List every date found
  cat batch.txt | datefind --lines    One document per line

EXIT STATUS:
  0  a date was found
  2  no date was found
  1  an error occurred

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting         | CLI flag          | Env var                  | Default
  ----------------|-------------------|--------------------------|---------
  pivot_lookahead | --pivot-lookahead | DATEFIND_PIVOT_LOOKAHEAD | 15
  reference_date  | --today           | DATEFIND_REFERENCE_DATE  | today
  no_color        | -C, --no-color    | DATEFIND_NO_COLOR        | false

  Config file location: datefind --config-path
  Generate default config: datefind --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "datefind")]
#[command(version)]
#[command(about = "Find the most relevant date in noisy OCR text")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The text to search
    ///
    /// Use @path to read from a file, @- to read stdin.
    /// Without INPUT, piped stdin is read.
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// List every date found, not just the most relevant one
    #[arg(long, short = 'a')]
    all: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Print the normalized text and exit
    #[arg(long)]
    normalize: bool,

    /// Reference date (YYYY-MM-DD) used for two-digit years
    #[arg(long, value_name = "DATE")]
    today: Option<String>,

    /// Years past the reference year a two-digit year may land in (0-99)
    #[arg(long, value_name = "YEARS")]
    pivot_lookahead: Option<i32>,

    /// Treat every stdin line as its own document
    #[arg(long, short = 'L')]
    lines: bool,

    /// List the date patterns and interpretations
    #[arg(long)]
    patterns: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why a date was or wasn't picked.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Read input, handling @path syntax for file reading.
fn read_input(input: &str) -> Result<String, String> {
    let Some(path) = input.strip_prefix('@') else {
        return Ok(input.to_string());
    };

    if path == "-" {
        return read_stdin();
    }

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(format!("File not found: {}", path));
    }

    let buffer =
        fs::read(file_path).map_err(|e| format!("Failed to read file '{}': {}", path, e))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Reference date with precedence: CLI > env > config file > today.
fn resolve_reference(cli: &Cli, file_config: &Config) -> Result<NaiveDate, String> {
    let (value, source) = if let Some(ref today) = cli.today {
        (today.clone(), "CLI")
    } else if let Some(date) = file_config.reference_date() {
        let source = if std::env::var("DATEFIND_REFERENCE_DATE").is_ok() {
            "env DATEFIND_REFERENCE_DATE"
        } else {
            "config file"
        };
        (date, source)
    } else {
        let today = chrono::Local::now().date_naive();
        tracing::debug!("reference_date = {} (from system clock)", today);
        return Ok(today);
    };

    let date = parse_reference_date(&value).map_err(|e| e.to_string())?;
    tracing::debug!("reference_date = {} (from {})", date, source);
    Ok(date)
}

fn pivot_lookahead(cli: &Cli, file_config: &Config) -> i32 {
    if let Some(n) = cli.pivot_lookahead {
        tracing::debug!("pivot_lookahead = {} (from CLI)", n);
        return n;
    }
    let n = file_config.pivot_lookahead();
    let source = if std::env::var("DATEFIND_PIVOT_LOOKAHEAD").is_ok() {
        "env DATEFIND_PIVOT_LOOKAHEAD"
    } else if file_config.pivot_lookahead.is_some() {
        "config file"
    } else {
        "default"
    };
    tracing::debug!("pivot_lookahead = {} (from {})", n, source);
    n
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{}: {}", "error".red().bold(), message);
    ExitCode::from(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.config_path {
        return match Config::path() {
            Some(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            None => fail("Cannot determine config directory"),
        };
    }

    if cli.config_init {
        return match config::init_config() {
            Ok(path) => {
                println!("Created config file: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        };
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let file_config = Config::load();
    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    if cli.no_color || file_config.no_color() {
        set_override(false);
    }

    let finder = match DateFinder::with_config(FinderConfig {
        pivot_lookahead: pivot_lookahead(&cli, &file_config),
    }) {
        Ok(finder) => finder,
        Err(e) => return fail(e),
    };

    if cli.patterns {
        print!(
            "{}",
            output::render_patterns(&finder.pattern_infos(), &finder.format_ids())
        );
        return ExitCode::SUCCESS;
    }

    let reference = match resolve_reference(&cli, &file_config) {
        Ok(date) => date,
        Err(e) => return fail(e),
    };

    let stdin_is_pipe = !io::stdin().is_terminal();

    if cli.lines {
        if !stdin_is_pipe {
            return fail("--lines requires piped input (e.g., cat batch.txt | datefind --lines)");
        }
        let config = pipe::LineModeConfig {
            reference,
            all: cli.all,
            json: cli.json,
        };
        return match pipe::run_line_mode(&finder, &config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(format!("Failed to read stdin: {}", e)),
        };
    }

    let text = match cli.input.as_deref() {
        Some(input) => read_input(input),
        None if stdin_is_pipe => read_stdin(),
        None => {
            eprintln!("{}: No input provided", "error".red().bold());
            eprintln!();
            eprintln!("Usage: {} <INPUT>", "datefind".bold());
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  datefind \"Due: 15/06/2021\"     Search text");
            eprintln!("  datefind @receipt.txt          Read a file");
            eprintln!("  ocr scan.png | datefind        Pipe OCR output");
            eprintln!();
            eprintln!("Run {} for more information.", "datefind --help".bold());
            return ExitCode::from(1);
        }
    };
    let text = match text {
        Ok(text) => text,
        Err(e) => return fail(e),
    };

    if cli.normalize {
        println!("{}", normalize(&text));
        return ExitCode::SUCCESS;
    }

    let matches = finder.extract_all(&text, reference);
    let best = select(matches.iter().cloned());

    if cli.json {
        let report = output::json_report(reference, best.as_ref(), cli.all.then_some(&matches[..]));
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => return fail(e),
        }
    } else if cli.all {
        print!("{}", output::render_all(&matches, best.as_ref()));
    } else {
        println!("{}", output::render_found(best.as_ref()));
    }

    if best.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
