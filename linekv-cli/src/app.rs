use crate::template::Template;
use anyhow::{Context, Result};
use linekv_common::{Diagnostics, Discard};
use linekv_pipeline::{spawn_with, PipelineStats};
use linekv_reducer::Reducer;
use linekv_scanner::{ScanConfig, ScanError, Scanner};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

/// Settings for one run over one input.
#[derive(Clone)]
pub struct Options {
    pub template: Template,
    /// Render records that carry no bindings.
    pub keep_empty: bool,
    pub scan: ScanConfig,
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            template: Template::default(),
            keep_empty: false,
            scan: ScanConfig::default(),
            diagnostics: Arc::new(Discard),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Records rendered to the output.
    pub written: usize,
    pub stats: PipelineStats,
}

impl Outcome {
    /// Why the input ended.
    pub fn termination(&self) -> Option<&ScanError> {
        self.stats.termination.as_ref()
    }

    /// True when the whole input was read and decoded.
    pub fn is_clean(&self) -> bool {
        self.termination().is_some_and(ScanError::is_end_of_source)
    }
}

/// Extracts records from `reader` and writes one rendered line per record
/// to `writer`.
pub fn run<R, W>(reader: R, writer: &mut W, options: &Options) -> Result<Outcome>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let scanner = Scanner::builder(reader)
        .config(options.scan)
        .diagnostics(Arc::clone(&options.diagnostics))
        .build();
    let reducer = Reducer::with_diagnostics(Arc::clone(&options.diagnostics));
    let mut stream = spawn_with(scanner, reducer).context("failed to start pipeline")?;

    let mut written = 0;
    let mut line = String::new();
    for record in stream.by_ref() {
        if record.is_empty() && !options.keep_empty {
            continue;
        }
        line.clear();
        options
            .template
            .render_into(&record, &mut line)
            .context("failed to render record")?;
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .context("failed to write output")?;
        written += 1;
    }
    writer.flush().context("failed to flush output")?;

    let stats = stream.join()?;
    debug!(
        tokens = stats.tokens,
        records = stats.records,
        written,
        "input finished"
    );
    Ok(Outcome { written, stats })
}
