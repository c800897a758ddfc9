use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;

use lsstap_core::FrameTag;

#[derive(Parser, Debug)]
#[command(name = "lsstap")]
#[command(version)]
#[command(
    about = "Offline decoder for Lynxmotion Smart Servo (LSS) serial captures.",
    long_about = None,
    after_help = "Examples:\n  lsstap serial decode capture.csv -o report.json\n  lsstap serial decode capture.csv --stdout --pretty\n  lsstap serial decode capture.csv --stdout --errors-only"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on serial byte-capture exports (offline-first).
    Serial {
        #[command(subcommand)]
        command: SerialCommands,
    },
}

#[derive(Subcommand, Debug)]
enum SerialCommands {
    /// Decode a timestamped byte-capture CSV into a JSON report.
    #[command(alias = "analyse", alias = "analyze")]
    #[command(
        after_help = "Examples:\n  lsstap serial decode capture.csv -o report.json\n  lsstap serial decode capture.csv --stdout --errors-only"
    )]
    Decode {
        /// Path to a capture CSV export (rows: start,end,byte)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Keep only error-tagged frames in the report
        #[arg(long)]
        errors_only: bool,

        /// Exit with a non-zero code if any error-tagged frames are present
        #[arg(long)]
        strict: bool,

        /// List error-tagged frames after decoding
        #[arg(long)]
        list_errors: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serial { command } => match command {
            SerialCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                errors_only,
                strict,
                list_errors,
            } => cmd_serial_decode(
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                errors_only,
                strict,
                list_errors,
            ),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_serial_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    errors_only: bool,
    strict: bool,
    list_errors: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let meta = fs::metadata(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a capture CSV export".to_string()),
        ));
    }

    let mut rep =
        lsstap_core::decode_csv_file(&resolved_input).context("capture decoding failed")?;
    if errors_only {
        rep.frames.retain(|frame| frame.tag == FrameTag::Error);
    }
    let json = serialize_report(&rep, pretty, compact)?;

    if let Some(report_path) = report.as_ref() {
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(report_path, &json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report_path.display());
        }
    } else {
        print!("{}", json);
    }

    if list_errors && !quiet {
        print_error_frames(&rep);
    }
    if strict && has_error_frames(&rep) {
        return Err(CliError::new(
            "decode errors detected",
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &lsstap_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_error_frames(rep: &lsstap_core::Report) -> bool {
    rep.frames.iter().any(|frame| frame.tag == FrameTag::Error)
}

fn print_error_frames(rep: &lsstap_core::Report) {
    eprintln!("Decode errors:");
    for frame in rep.frames.iter().filter(|f| f.tag == FrameTag::Error) {
        eprintln!(
            "  {:.6}s {:?}: {}",
            frame.start, frame.bytes, frame.description
        );
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a capture CSV export (.csv or .txt)".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" && ext != "txt" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .csv or .txt capture export".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected a .csv export".to_string()),
        ));
    }
    if matches.len() > 1 {
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches)",
                pattern,
                matches.len()
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
