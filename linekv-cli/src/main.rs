//! `linekv`: print the `key=value` pairs found on each line of a text
//! stream.
//!
//! ```bash
//! # Whole records
//! linekv -f app.log
//!
//! # One field per line
//! tail -f app.log | linekv -t '{{.level}} {{.msg}}'
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use linekv_cli::{run, Options, Outcome, Template};
use linekv_common::{Diagnostics, Discard, TracingDiagnostics};
use linekv_scanner::ScanConfig;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linekv")]
#[command(version)]
#[command(about = "Extract key=value pairs from each line of a text stream")]
struct Cli {
    /// Template rendered once per record; `{{.}}` is the whole record and
    /// `{{.key}}` a single value
    #[arg(short, long, default_value = "{{.}}")]
    template: String,

    /// Input file (reads stdin if not provided)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output file (writes stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Trace scanning and reduction on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Also print records with no pairs
    #[arg(long)]
    keep_empty: bool,

    /// Replace undecodable bytes with U+FFFD instead of stopping
    #[arg(long)]
    lossy_utf8: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(outcome) if outcome.is_clean() => ExitCode::SUCCESS,
        Ok(outcome) => {
            match outcome.termination() {
                Some(cause) => warn!(%cause, written = outcome.written, "input ended early"),
                None => warn!(written = outcome.written, "input ended early"),
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = if verbose {
        filter.add_directive(tracing::Level::TRACE.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: &Cli) -> Result<Outcome> {
    let template: Template = cli
        .template
        .parse()
        .with_context(|| format!("could not parse template {:?}", cli.template))?;

    let diagnostics: Arc<dyn Diagnostics> = if cli.verbose {
        Arc::new(TracingDiagnostics)
    } else {
        Arc::new(Discard)
    };
    let options = Options {
        template,
        keep_empty: cli.keep_empty,
        scan: if cli.lossy_utf8 {
            ScanConfig::lossy()
        } else {
            ScanConfig::default()
        },
        diagnostics,
    };

    let input: Box<dyn BufRead + Send> = match &cli.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("could not create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut output = BufWriter::new(sink);

    run(input, &mut output, &options)
}
