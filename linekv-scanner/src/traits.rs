use crate::context::ScanContext;
use crate::token::Token;
use linekv_common::ScanError;

/// One token class of the scanner.
///
/// Rules are generic over the context so the same rule set works with any
/// [`ScanContext`]. A rule inspects the next code point and either consumes
/// a whole token or leaves the context untouched.
pub trait ScanRule<Ctx>
where
    Ctx: ScanContext,
{
    /// Attempts to consume a token from the context.
    ///
    /// Returns `Ok(None)` without advancing the context if the rule does not
    /// apply. An `Err` ends the token stream.
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError>;

    /// Rules with higher priority are tried first. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Quick check on the peeked code point.
    ///
    /// - `Some(true)`  - this rule applies
    /// - `Some(false)` - this rule definitely won't match; it is skipped
    /// - `None`        - unknown, `try_match` decides
    #[inline]
    fn quick_check(&self, first_char: char) -> Option<bool> {
        let _ = first_char;
        None
    }
}
