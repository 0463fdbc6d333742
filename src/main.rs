//! simplex - lexical analyzer for SIMPLE source files.
//!
//! Scans one source file and writes its symbol table report.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use simplex::{
    config::Config,
    display_error,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::{tokenize, LexOutput},
    read_source,
    report::{write_report, write_report_to_path},
};

const SOURCE_EXTENSION: &str = "simp";

/// Lexical analyzer for the SIMPLE language
///
/// Splits a SIMPLE source file into classified tokens and writes a symbol table
/// listing every token with its position, a token summary and the lexical errors.
#[derive(Parser, Debug)]
#[command(name = "simplex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexical analyzer for the SIMPLE language", long_about = None)]
struct Cli {
    /// SIMPLE source file (prompted for when omitted)
    file: Option<PathBuf>,

    /// Where to write the symbol table (default: from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the symbol table to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Path to configuration file
    #[arg(short, long, env = "SIMPLEX_CONFIG")]
    config: Option<PathBuf>,

    /// Leave the token summary out of the report
    #[arg(long)]
    no_summary: bool,

    /// Print each lexical error with its source line to stderr
    #[arg(long)]
    diagnostics: bool,

    /// Enable verbose output
    #[arg(short, long, env = "SIMPLEX_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "SIMPLEX_NO_COLOR")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(ErrorTip::Suggestion(tip)) = e.downcast_ref::<Error>().map(Error::get_tip)
            {
                eprintln!("Tip: {}", tip);
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG` wins over the
/// verbosity flag.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.report.output = output;
    }
    if cli.no_summary {
        config.report.summary = false;
    }

    let path = match cli.file {
        Some(path) => path,
        None => prompt_for_source(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    if !has_source_extension(&path) {
        warn!(
            path = %path.display(),
            "only .{} files are recognised as SIMPLE source", SOURCE_EXTENSION
        );
    }

    let source = read_source(&path)?;
    let output = tokenize(&source, &config.lexer)?;
    let source_name = path.display().to_string();

    info!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scanned {}",
        source_name
    );

    if cli.diagnostics {
        print_diagnostics(&output, &source, &source_name)?;
    }

    if cli.stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&mut out, &source_name, &output, &config.report)
            .context("Failed to write report to stdout")?;
        out.flush()?;
    } else {
        write_report_to_path(&config.report.output, &source_name, &output, &config.report)?;
        println!("Symbol Table saved to: {}", config.report.output.display());
    }

    println!("Analysis Complete.");
    Ok(())
}

/// Asks for a source path on `output` and reads one line from `input`.
fn prompt_for_source<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PathBuf> {
    write!(output, "Enter SIMPLE source file: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read source file name")?;

    let name = line.trim();
    if name.is_empty() {
        bail!("No source file given");
    }
    Ok(PathBuf::from(name))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

fn print_diagnostics(output: &LexOutput, source: &[u8], file: &str) -> Result<()> {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    for error in &output.errors {
        display_error(&mut err, error, source, file)?;
        writeln!(err)?;
    }
    Ok(())
}
