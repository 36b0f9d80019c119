use crate::context::ScanContext;
use crate::scanner::Scanner;
use crate::token::Token;

/// Produces tokens on demand, allowing scanners to be consumed in streaming
/// pipelines.
pub trait TokenProducer {
    /// Attempts to emit the next token from the underlying producer.
    fn poll_token(&mut self) -> Option<Token>;
}

impl<Ctx> TokenProducer for Scanner<Ctx>
where
    Ctx: ScanContext,
{
    fn poll_token(&mut self) -> Option<Token> {
        self.next_token()
    }
}
