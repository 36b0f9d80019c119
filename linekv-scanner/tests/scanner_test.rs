use linekv_scanner::{
    Position, RuleSet, ScanContext, ScanError, ScanRule, Scanner, SourceContext, Token, TokenKind,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;

type Ctx = SourceContext<Cursor<String>>;

/// Scans `text` into `(kind, lexeme)` pairs. The terminal token shows as
/// `(Error, <error message>)`.
fn scan(text: &str) -> Vec<(TokenKind, String)> {
    Scanner::from_text(text)
        .map(|token| {
            let shown = match token.error() {
                Some(err) => err.to_string(),
                None => token.lexeme().unwrap_or_default().to_string(),
            };
            (token.kind(), shown)
        })
        .collect()
}

fn pairs(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    expected
        .iter()
        .map(|(kind, text)| (*kind, text.to_string()))
        .collect()
}

#[test]
fn test_key_value_line() {
    assert_eq!(
        scan("key=value\n"),
        pairs(&[
            (TokenKind::Atom, "key"),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "value"),
            (TokenKind::NewLine, "\n"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_consecutive_equal_signs_scan_one_at_a_time() {
    let tokens = scan("=====");
    assert_eq!(tokens.len(), 6);
    for (kind, text) in &tokens[..5] {
        assert_eq!(*kind, TokenKind::Equal);
        assert_eq!(text, "=");
    }
    assert_eq!(tokens[5].0, TokenKind::Error);
}

#[test]
fn test_whitespace_runs_are_maximal() {
    assert_eq!(
        scan("a \t b"),
        pairs(&[
            (TokenKind::Atom, "a"),
            (TokenKind::WhiteSpace, " \t "),
            (TokenKind::Atom, "b"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_newline_is_never_merged() {
    assert_eq!(
        scan("\n\n"),
        pairs(&[
            (TokenKind::NewLine, "\n"),
            (TokenKind::NewLine, "\n"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_carriage_return_is_whitespace() {
    assert_eq!(
        scan("a=b\r\n"),
        pairs(&[
            (TokenKind::Atom, "a"),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "b"),
            (TokenKind::WhiteSpace, "\r"),
            (TokenKind::NewLine, "\n"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_quoted_strings() {
    let cases = [
        (r#""this is a test""#, "this is a test"),
        ("'this is a test'", "this is a test"),
        (r"'this \'is\' a test'", "this 'is' a test"),
        (r"'\'\'\'\'\''", "'''''"),
        (r#""it's""#, "it's"),
        (r#"'say "hi"'"#, r#"say "hi""#),
        (r#""back\\slash""#, r"back\slash"),
        ("\"\"", ""),
        ("\"two\nlines\"", "two\nlines"),
    ];
    for (input, expected) in cases {
        let tokens = scan(input);
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::QuotedString, expected),
                (TokenKind::Error, "end of source"),
            ]),
            "input: {input}"
        );
    }
}

#[test]
fn test_unterminated_quote_ends_stream() {
    let tokens: Vec<Token> = Scanner::from_text("a=\"open").collect();
    assert_eq!(tokens.len(), 3);
    let terminal = &tokens[2];
    assert!(terminal.is_terminal());
    assert!(matches!(
        terminal.error(),
        Some(ScanError::UnterminatedQuote {
            delimiter: '"',
            position: Position {
                line: 1,
                column: 3,
                offset: 2
            }
        })
    ));
}

#[test]
fn test_trailing_escape_is_unterminated() {
    let tokens: Vec<Token> = Scanner::from_text("'abc\\'").collect();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(
        tokens[0].error(),
        Some(ScanError::UnterminatedQuote { .. })
    ));
}

#[test]
fn test_atom_absorbs_quotes_after_first_char() {
    assert_eq!(
        scan("key\"x\"=1"),
        pairs(&[
            (TokenKind::Atom, "key\"x\""),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "1"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_atom_at_end_of_source_is_kept() {
    assert_eq!(
        scan("level=warn"),
        pairs(&[
            (TokenKind::Atom, "level"),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "warn"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_unidentified_swallows_up_to_whitespace() {
    assert_eq!(
        scan("\u{7}bell=1 x"),
        pairs(&[
            (TokenKind::Unidentified, "\u{7}bell=1"),
            (TokenKind::WhiteSpace, " "),
            (TokenKind::Atom, "x"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_unicode_atoms() {
    assert_eq!(
        scan("名前=値 ключ=значение"),
        pairs(&[
            (TokenKind::Atom, "名前"),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "値"),
            (TokenKind::WhiteSpace, " "),
            (TokenKind::Atom, "ключ"),
            (TokenKind::Equal, "="),
            (TokenKind::Atom, "значение"),
            (TokenKind::Error, "end of source"),
        ])
    );
}

#[test]
fn test_single_pass() {
    let mut scanner = Scanner::from_text("a");
    assert_eq!(scanner.next().map(|t| t.kind()), Some(TokenKind::Atom));
    assert_eq!(scanner.next().map(|t| t.kind()), Some(TokenKind::Error));
    assert!(scanner.is_finished());
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
    assert!(scanner.tokenize().is_empty());
}

#[test]
fn test_token_positions() {
    let positions: Vec<(TokenKind, Position)> = Scanner::from_text("a=1\n  b")
        .map(|token| (token.kind(), token.position()))
        .collect();
    assert_eq!(
        positions,
        vec![
            (TokenKind::Atom, Position::at(1, 1, 0)),
            (TokenKind::Equal, Position::at(1, 2, 1)),
            (TokenKind::Atom, Position::at(1, 3, 2)),
            (TokenKind::NewLine, Position::at(1, 4, 3)),
            (TokenKind::WhiteSpace, Position::at(2, 1, 4)),
            (TokenKind::Atom, Position::at(2, 3, 6)),
            (TokenKind::Error, Position::at(2, 4, 7)),
        ]
    );
}

#[test]
fn test_invalid_utf8_ends_stream() {
    let tokens: Vec<Token> = Scanner::from_reader(&b"a=\xC0b\n"[..]).collect();
    let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
    assert_eq!(kinds, vec![TokenKind::Atom, TokenKind::Equal, TokenKind::Error]);
    assert!(matches!(
        tokens[2].error(),
        Some(ScanError::InvalidUtf8 { offset: 2 })
    ));
}

#[test]
fn test_invalid_utf8_inside_atom_keeps_prefix() {
    let tokens: Vec<Token> = Scanner::from_reader(&b"k=val\xFF"[..]).collect();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2].lexeme(), Some("val"));
    assert!(matches!(
        tokens[3].error(),
        Some(ScanError::InvalidUtf8 { offset: 5 })
    ));
}

#[test]
fn test_lossy_config_replaces_invalid_bytes() {
    let tokens: Vec<Token> = Scanner::builder(&b"a=\xC0b\n"[..])
        .config(linekv_scanner::ScanConfig::lossy())
        .build()
        .collect();
    assert_eq!(tokens[2].lexeme(), Some("\u{FFFD}b"));
    assert_eq!(tokens[3].kind(), TokenKind::NewLine);
    assert!(tokens[4].error().is_some_and(ScanError::is_end_of_source));
}

// --- Custom rule sets -----------------------------------------------------------------

/// Claims every code point but never consumes it.
struct StuckRule;

impl ScanRule<Ctx> for StuckRule {
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        Ok(Some(Token::new(TokenKind::Atom, "", ctx.position())))
    }
}

#[test]
fn test_rule_without_progress_ends_stream() {
    let context = SourceContext::new(Cursor::new("abc".to_string()));
    let rules: RuleSet<Ctx> = vec![Box::new(StuckRule)];
    let mut scanner = Scanner::new(context, rules);
    let token = scanner.next_token().expect("terminal token");
    assert!(matches!(token.error(), Some(ScanError::NoProgress { .. })));
    assert!(scanner.next_token().is_none());
}

#[test]
fn test_no_matching_rule_ends_stream() {
    let context = SourceContext::new(Cursor::new("abc".to_string()));
    let mut scanner: Scanner<Ctx> = Scanner::new(context, Vec::new());
    let token = scanner.next_token().expect("terminal token");
    assert!(matches!(
        token.error(),
        Some(ScanError::Unrecognized { found: 'a', .. })
    ));
}

/// Matches runs of digits.
struct DigitsRule;

impl ScanRule<Ctx> for DigitsRule {
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        let position = ctx.position();
        let digits = ctx.consume_while(|ch| ch.is_ascii_digit())?;
        if digits.is_empty() {
            return Ok(None);
        }
        Ok(Some(Token::new(TokenKind::Number, digits, position)))
    }

    fn priority(&self) -> i32 {
        25
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char.is_ascii_digit())
    }
}

#[test]
fn test_custom_rule_takes_priority_over_atoms() {
    let context = SourceContext::new(Cursor::new("n=42".to_string()));
    let mut rules = linekv_scanner::default_rules::<Ctx>();
    rules.push(Box::new(DigitsRule));
    let kinds: Vec<TokenKind> = Scanner::new(context, rules).map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Atom,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Error
        ]
    );
}

#[test]
fn test_context_consume_while() {
    let mut context = SourceContext::new(Cursor::new("abc def".to_string()));
    assert_eq!(context.consume_while(|ch| ch != ' ').unwrap(), "abc");
    assert_eq!(context.peek().unwrap(), Some(' '));
    assert_eq!(context.offset(), 3);
}
