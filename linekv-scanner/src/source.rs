use crate::config::Utf8Policy;
use linekv_common::{Position, ScanError};
use std::io::{self, BufRead};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy)]
struct Decoded {
    ch: char,
    /// Bytes the code point occupied in the source.
    width: usize,
}

/// Forward-only stream of code points decoded from a byte reader.
///
/// Holds at most one decoded code point of lookahead, which is all the
/// scanning rules need: they inspect the next code point with [`peek`] and
/// take it with [`advance`]. Bytes are pulled from the reader lazily, so a
/// blocking reader only blocks when the scanner actually needs more input.
///
/// [`peek`]: CharSource::peek
/// [`advance`]: CharSource::advance
#[derive(Debug)]
pub struct CharSource<R> {
    reader: R,
    lookahead: Option<Decoded>,
    /// A failure hit while extending a run, reported by the next `peek`.
    deferred: Option<ScanError>,
    position: Position,
    policy: Utf8Policy,
}

impl<R: BufRead> CharSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_policy(reader, Utf8Policy::default())
    }

    pub fn with_policy(reader: R, policy: Utf8Policy) -> Self {
        Self {
            reader,
            lookahead: None,
            deferred: None,
            position: Position::new(),
            policy,
        }
    }

    pub fn set_policy(&mut self, policy: Utf8Policy) {
        self.policy = policy;
    }

    /// Position of the next code point.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the next code point without consuming it, or `None` at the
    /// end of the source.
    pub fn peek(&mut self) -> Result<Option<char>, ScanError> {
        if let Some(error) = self.deferred.take() {
            return Err(error);
        }
        if self.lookahead.is_none() {
            self.lookahead = self.decode()?;
        }
        Ok(self.lookahead.map(|decoded| decoded.ch))
    }

    /// Consumes and returns the next code point.
    pub fn advance(&mut self) -> Result<Option<char>, ScanError> {
        self.peek()?;
        let Some(decoded) = self.lookahead.take() else {
            return Ok(None);
        };
        let offset = self.position.offset + decoded.width;
        self.position.advance(decoded.ch);
        self.position.offset = offset;
        Ok(Some(decoded.ch))
    }

    /// Consumes code points while `predicate` holds and returns them.
    ///
    /// A read or decode failure after at least one code point ends the run
    /// instead; the failure is returned by the following `peek`.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> Result<String, ScanError>
    where
        F: FnMut(char) -> bool,
    {
        let mut text = String::new();
        loop {
            let ch = match self.peek() {
                Ok(Some(ch)) => ch,
                Ok(None) => break,
                Err(error) if !text.is_empty() => {
                    self.deferred = Some(error);
                    break;
                }
                Err(error) => return Err(error),
            };
            if !predicate(ch) {
                break;
            }
            self.advance()?;
            text.push(ch);
        }
        Ok(text)
    }

    /// Gives back the underlying reader. Any buffered lookahead is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ScanError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn decode(&mut self) -> Result<Option<Decoded>, ScanError> {
        let Some(lead) = self.peek_byte()? else {
            return Ok(None);
        };
        self.reader.consume(1);

        let width = match lead {
            0x00..=0x7F => {
                return Ok(Some(Decoded {
                    ch: char::from(lead),
                    width: 1,
                }))
            }
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return self.invalid(1),
        };

        let mut bytes = [lead, 0, 0, 0];
        for index in 1..width {
            match self.peek_byte()? {
                Some(byte) if continuation_range(lead, index).contains(&byte) => {
                    bytes[index] = byte;
                    self.reader.consume(1);
                }
                _ => return self.invalid(index),
            }
        }

        let offset = self.position.offset;
        let ch = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|text| text.chars().next())
            .ok_or(ScanError::InvalidUtf8 { offset })?;
        Ok(Some(Decoded { ch, width }))
    }

    fn invalid(&self, width: usize) -> Result<Option<Decoded>, ScanError> {
        match self.policy {
            Utf8Policy::Fail => Err(ScanError::InvalidUtf8 {
                offset: self.position.offset,
            }),
            Utf8Policy::Replace => Ok(Some(Decoded {
                ch: char::REPLACEMENT_CHARACTER,
                width,
            })),
        }
    }
}

/// Bytes allowed at `index` of a sequence introduced by `lead`.
fn continuation_range(lead: u8, index: usize) -> RangeInclusive<u8> {
    match (lead, index) {
        (0xE0, 1) => 0xA0..=0xBF,
        (0xED, 1) => 0x80..=0x9F,
        (0xF0, 1) => 0x90..=0xBF,
        (0xF4, 1) => 0x80..=0x8F,
        _ => 0x80..=0xBF,
    }
}
