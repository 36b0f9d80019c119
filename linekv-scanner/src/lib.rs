//! Token scanner for `key=value` text.
//!
//! A [`Scanner`] reads code points from a byte source and classifies them
//! into [`Token`]s using a priority-ordered set of [`ScanRule`]s.

pub mod config;
pub mod context;
pub mod rules;
pub mod scanner;
pub mod source;
pub mod streaming;
pub mod token;
pub mod traits;

pub use config::{ScanConfig, Utf8Policy};
pub use context::{ScanContext, SourceContext};
pub use linekv_common::{Position, ScanError};
pub use rules::{
    default_rules, AtomRule, EqualRule, NewLineRule, QuotedStringRule, UnidentifiedRule,
    WhiteSpaceRule,
};
pub use scanner::{RuleSet, Scanner, ScannerBuilder};
pub use source::CharSource;
pub use streaming::TokenProducer;
pub use token::{Token, TokenKind, TokenPayload};
pub use traits::ScanRule;
