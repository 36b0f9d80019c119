use crate::error::PipelineError;
use crossbeam_channel::{bounded, Receiver};
use linekv_common::{ScanError, Stage};
use linekv_reducer::{Record, Reducer, Reduction};
use linekv_scanner::TokenProducer;
use std::iter::FusedIterator;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Counters and outcome of a finished threaded run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Tokens handed from the scanner to the reducer, terminal included.
    pub tokens: usize,
    /// Records handed to the caller.
    pub records: usize,
    /// Why the token stream ended. `None` if the reducer stopped before it
    /// saw the end, which only happens when the stream was dropped early.
    pub termination: Option<ScanError>,
}

struct ReduceSummary {
    records: usize,
    termination: Option<ScanError>,
}

/// Records produced by a running two-thread pipeline, in source order.
///
/// Dropping the stream disconnects both channels. The reducing thread
/// stops at its next send and the scanning thread at its next token; a
/// scanner blocked in a read stays blocked until its source yields.
pub struct RecordStream {
    records: Option<Receiver<Record>>,
    scan: Option<JoinHandle<usize>>,
    reduce: Option<JoinHandle<ReduceSummary>>,
}

/// Starts the scanning and reducing threads with a default [`Reducer`].
pub fn spawn<P>(producer: P) -> Result<RecordStream, PipelineError>
where
    P: TokenProducer + Send + 'static,
{
    spawn_with(producer, Reducer::new())
}

pub fn spawn_with<P>(mut producer: P, mut reducer: Reducer) -> Result<RecordStream, PipelineError>
where
    P: TokenProducer + Send + 'static,
{
    let (token_tx, token_rx) = bounded(0);
    let (record_tx, record_rx) = bounded::<Record>(0);

    let reduce = thread::Builder::new()
        .name("linekv-reduce".into())
        .spawn(move || {
            debug!("reduce stage started");
            let mut records = 0;
            let mut deliver = |record: Record| {
                let sent = record_tx.send(record).is_ok();
                if sent {
                    records += 1;
                }
                sent
            };

            let mut open = true;
            for token in token_rx.iter() {
                open = match reducer.push(token) {
                    Reduction::Pending => true,
                    Reduction::Emit(record) => deliver(record),
                    Reduction::Final(record) => {
                        if let Some(record) = record {
                            deliver(record);
                        }
                        false
                    }
                };
                if !open {
                    break;
                }
            }
            if open {
                if let Some(record) = reducer.finish() {
                    deliver(record);
                }
            }

            let termination = reducer.termination().cloned();
            debug!(records, ?termination, "reduce stage finished");
            ReduceSummary {
                records,
                termination,
            }
        })
        .map_err(|source| PipelineError::Spawn {
            stage: Stage::Reduce,
            source,
        })?;

    let scan = thread::Builder::new()
        .name("linekv-scan".into())
        .spawn(move || {
            debug!("scan stage started");
            let mut tokens = 0;
            while let Some(token) = producer.poll_token() {
                if token_tx.send(token).is_err() {
                    debug!("reduce stage hung up");
                    break;
                }
                tokens += 1;
            }
            debug!(tokens, "scan stage finished");
            tokens
        })
        .map_err(|source| PipelineError::Spawn {
            stage: Stage::Scan,
            source,
        })?;

    Ok(RecordStream {
        records: Some(record_rx),
        scan: Some(scan),
        reduce: Some(reduce),
    })
}

impl RecordStream {
    /// Disconnects the stream and waits for both stages to end.
    ///
    /// Records not yet received are discarded; drain the iterator first to
    /// keep them.
    pub fn join(mut self) -> Result<PipelineStats, PipelineError> {
        self.records = None;

        let summary = match self.reduce.take() {
            Some(handle) => Some(handle.join().map_err(|_| PipelineError::StagePanicked {
                stage: Stage::Reduce,
            })?),
            None => None,
        };
        let tokens = match self.scan.take() {
            Some(handle) => handle.join().map_err(|_| PipelineError::StagePanicked {
                stage: Stage::Scan,
            })?,
            None => 0,
        };

        Ok(summary.map_or_else(
            || PipelineStats {
                tokens,
                ..PipelineStats::default()
            },
            |summary| PipelineStats {
                tokens,
                records: summary.records,
                termination: summary.termination,
            },
        ))
    }
}

impl Iterator for RecordStream {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.records.as_ref()?.recv().ok()
    }
}

impl FusedIterator for RecordStream {}
