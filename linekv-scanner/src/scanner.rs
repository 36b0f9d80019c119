use crate::config::ScanConfig;
use crate::context::{ScanContext, SourceContext};
use crate::rules::default_rules;
use crate::token::Token;
use crate::traits::ScanRule;
use linekv_common::{Diagnostics, ScanError, Stage};
use std::cmp::Reverse;
use std::io::{self, BufRead};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Rules a scanner dispatches over.
pub type RuleSet<Ctx> = Vec<Box<dyn ScanRule<Ctx> + Send>>;

/// Turns a code-point source into tokens, one per call.
///
/// The stream is single-pass: it ends with exactly one Error token (end of
/// source or a scan failure), after which the scanner stays exhausted.
pub struct Scanner<Ctx>
where
    Ctx: ScanContext,
{
    context: Ctx,
    rules: RuleSet<Ctx>,
    finished: bool,
}

impl<Ctx> Scanner<Ctx>
where
    Ctx: ScanContext,
{
    /// Creates a new scanner with the given context and rules.
    pub fn new(context: Ctx, rules: RuleSet<Ctx>) -> Self {
        // Sort rules by priority (highest first)
        let mut sorted_rules = rules;
        sorted_rules.sort_by_key(|rule| Reverse(rule.priority()));

        Self {
            context,
            rules: sorted_rules,
            finished: false,
        }
    }

    /// Returns a reference to the context.
    pub fn context(&self) -> &Ctx {
        &self.context
    }

    /// Returns true once the terminal token has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scans the next token.
    ///
    /// Returns `None` only after the terminal Error token has been returned.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = match self.scan() {
            Ok(token) => token,
            Err(error) => {
                self.finished = true;
                Token::terminal(error, self.context.position())
            }
        };
        self.context
            .diagnostics()
            .trace(Stage::Scan, format_args!("token {token}"));
        Some(token)
    }

    /// Collects the rest of the token stream, terminal token included.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.collect()
    }

    fn scan(&mut self) -> Result<Token, ScanError> {
        let position = self.context.position();
        let Some(first_char) = self.context.peek()? else {
            return Err(ScanError::EndOfSource);
        };
        self.context.diagnostics().trace(
            Stage::Scan,
            format_args!("peeked {first_char:?} (U+{:04X}) at {position}", first_char as u32),
        );

        for rule in &mut self.rules {
            // Rules that rule themselves out on the first code point are skipped.
            if let Some(false) = rule.quick_check(first_char) {
                continue;
            }
            if let Some(token) = rule.try_match(&mut self.context)? {
                if self.context.offset() == position.offset {
                    return Err(ScanError::NoProgress { position });
                }
                return Ok(token);
            }
        }

        Err(ScanError::Unrecognized {
            found: first_char,
            position,
        })
    }
}

impl<R: BufRead> Scanner<SourceContext<R>> {
    /// Scanner with the default rules and settings over a byte reader.
    pub fn from_reader(reader: R) -> Self {
        ScannerBuilder::new(reader).build()
    }

    pub fn builder(reader: R) -> ScannerBuilder<R> {
        ScannerBuilder::new(reader)
    }
}

impl Scanner<SourceContext<io::Cursor<String>>> {
    /// Scanner over in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_reader(io::Cursor::new(text.into()))
    }
}

/// Yields tokens up to and including the terminal Error token.
impl<Ctx> Iterator for Scanner<Ctx>
where
    Ctx: ScanContext,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            // At least the terminal token is still to come.
            (1, None)
        }
    }
}

impl<Ctx> FusedIterator for Scanner<Ctx> where Ctx: ScanContext {}

/// Builds a [`Scanner`] over a byte reader. The reader is required; the
/// settings and the diagnostics sink are optional.
pub struct ScannerBuilder<R> {
    reader: R,
    config: ScanConfig,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl<R: BufRead> ScannerBuilder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            config: ScanConfig::default(),
            diagnostics: None,
        }
    }

    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn build(self) -> Scanner<SourceContext<R>> {
        let mut context = SourceContext::with_config(self.reader, self.config);
        if let Some(diagnostics) = self.diagnostics {
            context.set_diagnostics(diagnostics);
        }
        Scanner::new(context, default_rules())
    }
}
