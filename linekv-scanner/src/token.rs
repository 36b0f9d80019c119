use linekv_common::{Position, ScanError};
use std::fmt;

/// Token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Atom,
    Equal,
    Error,
    NewLine,
    /// Reserved for numeric literals; no rule produces it yet.
    Number,
    QuotedString,
    WhiteSpace,
    Unidentified,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Atom => "ATOM",
            TokenKind::Equal => "EQUAL",
            TokenKind::Error => "ERROR",
            TokenKind::NewLine => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::QuotedString => "QUOTED-STRING",
            TokenKind::WhiteSpace => "WHITE-SPACE",
            TokenKind::Unidentified => "UNIDENTIFIED",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a token carries: the scanned text, or for the terminal token the
/// reason the stream ended.
#[derive(Debug, Clone)]
pub enum TokenPayload {
    Lexeme(String),
    Failure(ScanError),
}

#[derive(Debug, Clone)]
pub struct Token {
    kind: TokenKind,
    payload: TokenPayload,
    position: Position,
}

impl Token {
    /// Creates a token carrying scanned text.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        debug_assert!(kind != TokenKind::Error, "use Token::terminal for errors");
        Self {
            kind,
            payload: TokenPayload::Lexeme(lexeme.into()),
            position,
        }
    }

    /// Creates the terminal Error token.
    pub fn terminal(error: ScanError, position: Position) -> Self {
        Self {
            kind: TokenKind::Error,
            payload: TokenPayload::Failure(error),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn payload(&self) -> &TokenPayload {
        &self.payload
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The scanned text; `None` for the terminal token.
    pub fn lexeme(&self) -> Option<&str> {
        match &self.payload {
            TokenPayload::Lexeme(text) => Some(text),
            TokenPayload::Failure(_) => None,
        }
    }

    pub fn into_lexeme(self) -> Option<String> {
        match self.payload {
            TokenPayload::Lexeme(text) => Some(text),
            TokenPayload::Failure(_) => None,
        }
    }

    /// Why the stream ended; `None` unless this is the terminal token.
    pub fn error(&self) -> Option<&ScanError> {
        match &self.payload {
            TokenPayload::Failure(err) => Some(err),
            TokenPayload::Lexeme(_) => None,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::WhiteSpace
    }

    /// NewLine or Error: the tokens that end a line.
    pub fn is_line_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::NewLine | TokenKind::Error)
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            TokenPayload::Lexeme(text) => write!(f, "{}({:?})", self.kind, text),
            TokenPayload::Failure(err) => write!(f, "{}({})", self.kind, err),
        }
    }
}
