//! `json-check`: validates a JSON file and optionally dumps what was parsed.
//!
//! Exits 0 when the file is valid JSON and 1 on any lexical or syntax error,
//! an unreadable file, or bad arguments.

use clap::error::ErrorKind;
use clap::{Parser as ClapParser, ValueEnum};
use json_core::{analyze_with_options, Analysis, ParseOptions};
use miette::{IntoDiagnostic, WrapErr};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Nesting limit applied unless `--max-depth` overrides it.
const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(ClapParser, Debug)]
#[command(name = "json-check")]
#[command(about = "Strict JSON parser and validator", long_about = None)]
#[command(version)]
struct Cli {
    /// The JSON file to parse
    file: PathBuf,

    /// Print the parsed value to stdout
    #[arg(long)]
    print_value: bool,

    /// Print the AST, with source positions, to stdout as JSON
    #[arg(long)]
    print_ast: bool,

    /// Write the re-serialized value to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format used by --print-value and --output
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Reject documents whose top-level value is not an object or array
    #[arg(long)]
    require_container_root: bool,

    /// Maximum container nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log verbosity: -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> miette::Result<()> {
    let source = fs::read_to_string(&cli.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", cli.file.display()))?;

    let options = ParseOptions::new()
        .require_container_root(cli.require_container_root)
        .max_depth(cli.max_depth);

    let analysis = analyze_with_options(&source, &cli.file.to_string_lossy(), &options)?;
    log::debug!("{} is valid JSON", cli.file.display());

    if cli.print_value {
        println!("{}", serialize(&analysis, cli.format)?);
    }

    if cli.print_ast {
        println!("{}", analysis.ast_json().into_diagnostic()?);
    }

    if let Some(output) = &cli.output {
        let mut text = serialize(&analysis, cli.format)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(output, text)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    }

    Ok(())
}

fn serialize(analysis: &Analysis, format: Format) -> miette::Result<String> {
    match format {
        Format::Json => analysis.to_json().into_diagnostic(),
        Format::Yaml => analysis.to_yaml().into_diagnostic(),
    }
}
