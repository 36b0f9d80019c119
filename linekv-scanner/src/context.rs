use crate::config::ScanConfig;
use crate::source::CharSource;
use linekv_common::{Diagnostics, Discard, Position, ScanError};
use std::io::BufRead;
use std::sync::Arc;

/// The cursor interface scanning rules operate on.
///
/// Rules are generic over the context so they can run against any source
/// of code points. Every read may fail because the underlying source may be
/// a live byte stream.
pub trait ScanContext {
    /// Peeks at the next code point without advancing.
    fn peek(&mut self) -> Result<Option<char>, ScanError>;

    /// Advances past the next code point and returns it.
    fn advance(&mut self) -> Result<Option<char>, ScanError>;

    /// Returns the position of the next code point.
    fn position(&self) -> Position;

    /// Returns the byte offset of the next code point.
    fn offset(&self) -> usize {
        self.position().offset
    }

    /// Sink for trace-level activity.
    fn diagnostics(&self) -> &dyn Diagnostics;

    /// Consumes code points while the predicate returns true.
    fn consume_while<F>(&mut self, mut predicate: F) -> Result<String, ScanError>
    where
        F: FnMut(char) -> bool,
    {
        let mut text = String::new();
        while let Some(ch) = self.peek()? {
            if !predicate(ch) {
                break;
            }
            self.advance()?;
            text.push(ch);
        }
        Ok(text)
    }
}

/// Scan context over a byte reader.
pub struct SourceContext<R> {
    source: CharSource<R>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<R: BufRead> SourceContext<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScanConfig::default())
    }

    pub fn with_config(reader: R, config: ScanConfig) -> Self {
        Self {
            source: CharSource::with_policy(reader, config.invalid_utf8),
            diagnostics: Arc::new(Discard),
        }
    }

    pub fn set_diagnostics(&mut self, diagnostics: Arc<dyn Diagnostics>) {
        self.diagnostics = diagnostics;
    }

    pub fn source(&self) -> &CharSource<R> {
        &self.source
    }
}

impl<R: BufRead> ScanContext for SourceContext<R> {
    fn peek(&mut self) -> Result<Option<char>, ScanError> {
        self.source.peek()
    }

    fn advance(&mut self) -> Result<Option<char>, ScanError> {
        self.source.advance()
    }

    fn position(&self) -> Position {
        self.source.position()
    }

    fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    fn consume_while<F>(&mut self, predicate: F) -> Result<String, ScanError>
    where
        F: FnMut(char) -> bool,
    {
        self.source.consume_while(predicate)
    }
}
