use crate::Position;
use std::io;
use std::sync::Arc;

/// Why a token stream ended.
///
/// Carried by the terminal Error token. Clean exhaustion of the source is
/// one of the variants rather than a separate signal, so consumers handle
/// every ending the same way.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    #[error("end of source")]
    EndOfSource,

    #[error("unterminated {delimiter}-quoted value starting at {position}")]
    UnterminatedQuote { delimiter: char, position: Position },

    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("read failed: {0}")]
    Io(#[source] Arc<io::Error>),

    #[error("no rule accepts {found:?} at {position}")]
    Unrecognized { found: char, position: Position },

    #[error("rule produced a token without consuming input at {position}")]
    NoProgress { position: Position },
}

impl ScanError {
    /// Returns true for the normal end of the source.
    pub fn is_end_of_source(&self) -> bool {
        matches!(self, ScanError::EndOfSource)
    }
}

impl From<io::Error> for ScanError {
    fn from(err: io::Error) -> Self {
        ScanError::Io(Arc::new(err))
    }
}
