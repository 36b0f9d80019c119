use crate::record::Record;
use crate::window::Window;
use linekv_common::{Diagnostics, Discard, ScanError, Stage};
use linekv_scanner::Token;
use std::sync::Arc;

/// Outcome of pushing one token.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// Nothing to hand downstream yet.
    Pending,
    /// A NewLine completed this record.
    Emit(Record),
    /// The terminal token arrived. Carries the last record if the final,
    /// unterminated line had any content. The reducer accepts no more
    /// tokens after this.
    Final(Option<Record>),
}

/// Folds a token stream into one [`Record`] per line.
///
/// Grammar: the only binding is `Atom Equal Atom` at the tail of the
/// [`Window`]. Whitespace is dropped before it reaches the window. Tokens
/// that never complete a binding are discarded silently once the window
/// is trimmed past them.
pub struct Reducer {
    window: Window,
    record: Record,
    /// Whether a non-whitespace token arrived since the last line ended.
    line_open: bool,
    termination: Option<ScanError>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer {
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(Discard))
    }

    pub fn with_diagnostics(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            window: Window::new(),
            record: Record::new(),
            line_open: false,
            termination: None,
            diagnostics,
        }
    }

    /// Returns true once the terminal token (or [`finish`](Self::finish))
    /// has been seen.
    pub fn is_halted(&self) -> bool {
        self.termination.is_some()
    }

    /// Why the token stream ended, once it has.
    pub fn termination(&self) -> Option<&ScanError> {
        self.termination.as_ref()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The record being built for the current line.
    pub fn current(&self) -> &Record {
        &self.record
    }

    pub fn push(&mut self, token: Token) -> Reduction {
        if self.is_halted() {
            self.trace(format_args!("halted, ignoring {token}"));
            return Reduction::Pending;
        }
        if token.is_whitespace() {
            return Reduction::Pending;
        }
        if !token.is_line_terminator() {
            self.line_open = true;
        }

        self.window.push(token);
        self.trace(format_args!("window {}", self.window));

        if let Some((key, value)) = self.window.reduce() {
            self.trace(format_args!("reduced {key}={value}"));
            self.record.insert(key, value);
            return Reduction::Pending;
        }

        if let Some(terminator) = self.window.pop_terminator() {
            let record = std::mem::take(&mut self.record);
            let line_open = std::mem::replace(&mut self.line_open, false);
            return match terminator.error() {
                Some(error) => {
                    self.trace(format_args!("stream ended ({error}), flushing {{{record}}}"));
                    self.termination = Some(error.clone());
                    Reduction::Final(line_open.then_some(record))
                }
                None => {
                    self.trace(format_args!("line ended, emitting {{{record}}}"));
                    Reduction::Emit(record)
                }
            };
        }

        self.window.trim();
        Reduction::Pending
    }

    /// Ends a token stream that stopped without a terminal token. Flushes
    /// the open line the same way the terminal token would.
    pub fn finish(&mut self) -> Option<Record> {
        if self.is_halted() {
            return None;
        }
        self.termination = Some(ScanError::EndOfSource);
        let record = std::mem::take(&mut self.record);
        std::mem::replace(&mut self.line_open, false).then_some(record)
    }

    fn trace(&self, args: std::fmt::Arguments<'_>) {
        self.diagnostics.trace(Stage::Reduce, args);
    }
}
