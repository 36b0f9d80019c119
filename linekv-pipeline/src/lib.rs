//! Drivers that connect a token producer to a record reducer.
//!
//! [`Pipeline`] runs both stages on the calling thread in lockstep.
//! [`spawn`] runs each stage on its own thread, joined by rendezvous
//! channels so a slow consumer stalls the scanner.

mod error;
mod lockstep;
mod threaded;

pub use error::PipelineError;
pub use lockstep::Pipeline;
pub use threaded::{spawn, spawn_with, PipelineStats, RecordStream};
