use linekv_scanner::{Token, TokenKind};
use std::fmt;

/// Most tokens the window holds at once.
pub const CAPACITY: usize = 3;
/// Tokens kept after a failed match.
pub const RETAINED: usize = 2;

/// The reducer's lookback buffer of recent non-whitespace tokens.
///
/// Holds at most [`CAPACITY`] tokens: the reducer trims it back to
/// [`RETAINED`] before every push.
#[derive(Debug, Clone, Default)]
pub struct Window {
    tokens: Vec<Token>,
}

impl Window {
    pub fn new() -> Self {
        Self {
            tokens: Vec::with_capacity(CAPACITY),
        }
    }

    pub fn push(&mut self, token: Token) {
        debug_assert!(!token.is_whitespace(), "whitespace never enters the window");
        debug_assert!(self.tokens.len() < CAPACITY);
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(Token::kind).collect()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Returns true if the last three tokens are Atom, Equal, Atom.
    pub fn has_binding(&self) -> bool {
        let n = self.tokens.len();
        if n < 3 {
            return false;
        }
        let [key, equal, value] = &self.tokens[n - 3..] else {
            return false;
        };
        key.is(TokenKind::Atom) && equal.is(TokenKind::Equal) && value.is(TokenKind::Atom)
    }

    /// Takes the `(key, value)` of a trailing Atom, Equal, Atom and clears
    /// the whole window. Leaves the window untouched if there is no match.
    pub fn reduce(&mut self) -> Option<(String, String)> {
        if !self.has_binding() {
            return None;
        }
        let value = self.tokens.pop().and_then(Token::into_lexeme);
        self.tokens.pop();
        let key = self.tokens.pop().and_then(Token::into_lexeme);
        self.tokens.clear();
        Some((key?, value?))
    }

    /// Removes the last token if it is a NewLine or Error.
    pub fn pop_terminator(&mut self) -> Option<Token> {
        if self.tokens.last().is_some_and(Token::is_line_terminator) {
            self.tokens.pop()
        } else {
            None
        }
    }

    /// Drops all but the newest [`RETAINED`] tokens.
    pub fn trim(&mut self) {
        let len = self.tokens.len();
        if len > RETAINED {
            self.tokens.drain(..len - RETAINED);
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        f.write_str("]")
    }
}
