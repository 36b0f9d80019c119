//! The six token classes, in classification order.

use crate::context::ScanContext;
use crate::scanner::RuleSet;
use crate::token::{Token, TokenKind};
use crate::traits::ScanRule;
use linekv_common::{ScanError, Stage};

pub fn is_newline(ch: char) -> bool {
    ch == '\n'
}

pub fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Whitespace other than the newline.
pub fn is_blank(ch: char) -> bool {
    ch != '\n' && ch.is_whitespace()
}

/// Code points that may appear in an Atom: printable, not whitespace and
/// not `=`.
pub fn is_atom_char(ch: char) -> bool {
    ch != '=' && !ch.is_whitespace() && !ch.is_control() && !is_format_or_private(ch)
}

/// Unicode format (Cf) and private-use (Co) code points, which are not
/// printable.
fn is_format_or_private(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
            | '\u{F0000}'..='\u{FFFFD}'
            | '\u{100000}'..='\u{10FFFD}'
    )
}

/// The default rule set.
pub fn default_rules<Ctx>() -> RuleSet<Ctx>
where
    Ctx: ScanContext,
{
    vec![
        Box::new(NewLineRule),
        Box::new(QuotedStringRule),
        Box::new(WhiteSpaceRule),
        Box::new(EqualRule),
        Box::new(AtomRule),
        Box::new(UnidentifiedRule),
    ]
}

/// Exactly one `\n`.
pub struct NewLineRule;

impl<Ctx> ScanRule<Ctx> for NewLineRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        if ctx.peek()? != Some('\n') {
            return Ok(None);
        }
        let position = ctx.position();
        ctx.advance()?;
        Ok(Some(Token::new(TokenKind::NewLine, "\n", position)))
    }

    fn priority(&self) -> i32 {
        60
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(is_newline(first_char))
    }
}

/// A `'` or `"` delimited value. The delimiters are dropped and a backslash
/// makes the following code point literal.
pub struct QuotedStringRule;

impl<Ctx> ScanRule<Ctx> for QuotedStringRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        let Some(delimiter) = ctx.peek()?.filter(|ch| is_quote(*ch)) else {
            return Ok(None);
        };
        let position = ctx.position();
        ctx.advance()?;
        ctx.diagnostics().trace(
            Stage::Scan,
            format_args!("quoted value opened with {delimiter:?} at {position}"),
        );

        let mut value = String::new();
        let mut escaped = false;
        loop {
            let Some(ch) = ctx.advance()? else {
                return Err(ScanError::UnterminatedQuote {
                    delimiter,
                    position,
                });
            };
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == delimiter {
                break;
            } else {
                value.push(ch);
            }
        }

        ctx.diagnostics().trace(
            Stage::Scan,
            format_args!("quoted value closed at {}", ctx.position()),
        );
        Ok(Some(Token::new(TokenKind::QuotedString, value, position)))
    }

    fn priority(&self) -> i32 {
        50
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(is_quote(first_char))
    }
}

/// A maximal run of whitespace, newline excluded.
pub struct WhiteSpaceRule;

impl<Ctx> ScanRule<Ctx> for WhiteSpaceRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        let position = ctx.position();
        let value = ctx.consume_while(is_blank)?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::new(TokenKind::WhiteSpace, value, position)))
        }
    }

    fn priority(&self) -> i32 {
        40
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(is_blank(first_char))
    }
}

/// Exactly one `=`; a run of them scans as one token each.
pub struct EqualRule;

impl<Ctx> ScanRule<Ctx> for EqualRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        if ctx.peek()? != Some('=') {
            return Ok(None);
        }
        let position = ctx.position();
        ctx.advance()?;
        Ok(Some(Token::new(TokenKind::Equal, "=", position)))
    }

    fn priority(&self) -> i32 {
        30
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char == '=')
    }
}

/// A maximal run of atom code points.
pub struct AtomRule;

impl<Ctx> ScanRule<Ctx> for AtomRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        let position = ctx.position();
        let value = ctx.consume_while(is_atom_char)?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::new(TokenKind::Atom, value, position)))
        }
    }

    fn priority(&self) -> i32 {
        20
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(is_atom_char(first_char))
    }
}

/// Catch-all: a maximal run of anything but whitespace.
///
/// Once started it also swallows `=`, quotes and atom code points up to the
/// next whitespace.
pub struct UnidentifiedRule;

impl<Ctx> ScanRule<Ctx> for UnidentifiedRule
where
    Ctx: ScanContext,
{
    fn try_match(&mut self, ctx: &mut Ctx) -> Result<Option<Token>, ScanError> {
        let position = ctx.position();
        let value = ctx.consume_while(|ch| !ch.is_whitespace())?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::new(TokenKind::Unidentified, value, position)))
        }
    }

    fn priority(&self) -> i32 {
        10
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(!first_char.is_whitespace())
    }
}
