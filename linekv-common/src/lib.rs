//! Shared types for the scanner, the reducer and the pipeline that joins
//! them.

pub mod diagnostics;
pub mod error;
pub mod position;
pub mod streaming;

pub use diagnostics::{Diagnostics, Discard, Stage, TracingDiagnostics};
pub use error::ScanError;
pub use position::Position;
pub use streaming::ConsumerEvent;
