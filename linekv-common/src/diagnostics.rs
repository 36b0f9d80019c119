//! Trace sink for scan and reduce activity.
//!
//! Components take an `Arc<dyn Diagnostics>` explicitly. Nothing here is
//! global: a scanner built without one gets [`Discard`].

use std::fmt;

/// Which stage produced a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scan,
    Reduce,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Scan => f.write_str("scan"),
            Stage::Reduce => f.write_str("reduce"),
        }
    }
}

/// Receives trace-level activity: peeked code points, tokens, window
/// contents, reductions and emissions.
///
/// Not required for correctness; implementations must not panic.
pub trait Diagnostics: Send + Sync {
    fn trace(&self, stage: Stage, args: fmt::Arguments<'_>);

    /// Whether `trace` does anything. Callers may skip building expensive
    /// arguments when this is false.
    fn enabled(&self) -> bool {
        true
    }
}

/// Drops every trace line. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Diagnostics for Discard {
    fn trace(&self, _stage: Stage, _args: fmt::Arguments<'_>) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Forwards trace lines to `tracing` at TRACE level under the `linekv` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn trace(&self, stage: Stage, args: fmt::Arguments<'_>) {
        tracing::trace!(target: "linekv", %stage, "{}", args);
    }

    fn enabled(&self) -> bool {
        tracing::enabled!(target: "linekv", tracing::Level::TRACE)
    }
}
