//! Output templates.
//!
//! A template is literal text with `{{ ... }}` actions. `{{.}}` renders the
//! whole record as `key=value` pairs and `{{.name}}` renders one value,
//! or nothing when the record has no such key.

use linekv_reducer::Record;
use std::fmt::{self, Write as _};
use std::str::FromStr;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {offset}")]
    Unclosed { offset: usize },

    #[error("unsupported action {action:?} at byte {offset}: expected `.` or `.key`")]
    UnsupportedAction { action: String, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Record,
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            segments: vec![Segment::Record],
        }
    }
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let action_offset = offset + start;
            let body = &rest[start + OPEN.len()..];
            let Some(end) = body.find(CLOSE) else {
                return Err(TemplateError::Unclosed {
                    offset: action_offset,
                });
            };
            segments.push(Self::action(body[..end].trim(), action_offset)?);

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    fn action(action: &str, offset: usize) -> Result<Segment, TemplateError> {
        match action.strip_prefix('.') {
            Some("") => Ok(Segment::Record),
            Some(key) if !key.contains(|c: char| c.is_whitespace() || c == '.') => {
                Ok(Segment::Field(key.to_string()))
            }
            _ => Err(TemplateError::UnsupportedAction {
                action: action.to_string(),
                offset,
            }),
        }
    }

    pub fn render_into<W: fmt::Write>(&self, record: &Record, out: &mut W) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Record => write!(out, "{record}")?,
                Segment::Field(key) => out.write_str(record.get(key).unwrap_or_default())?,
            }
        }
        Ok(())
    }

    pub fn render(&self, record: &Record) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.render_into(record, &mut out);
        out
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
