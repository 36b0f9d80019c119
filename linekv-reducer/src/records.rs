use crate::record::Record;
use crate::reducer::{Reducer, Reduction};
use linekv_scanner::Token;
use std::iter::FusedIterator;

/// Lazy sequence of records over a token iterator.
///
/// Pulls only as many tokens as it needs for the next record and stops
/// pulling once the terminal token has been reduced.
pub struct Records<I> {
    tokens: I,
    reducer: Reducer,
    done: bool,
}

impl<I> Records<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(tokens: I) -> Self {
        Self::with_reducer(tokens, Reducer::new())
    }

    pub fn with_reducer(tokens: I, reducer: Reducer) -> Self {
        Self {
            tokens,
            reducer,
            done: false,
        }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.done {
            return None;
        }
        loop {
            let Some(token) = self.tokens.next() else {
                self.done = true;
                return self.reducer.finish();
            };
            match self.reducer.push(token) {
                Reduction::Pending => continue,
                Reduction::Emit(record) => return Some(record),
                Reduction::Final(record) => {
                    self.done = true;
                    return record;
                }
            }
        }
    }
}

impl<I> FusedIterator for Records<I> where I: Iterator<Item = Token> {}

/// Reduces a token stream into records.
pub fn reduce<I>(tokens: I) -> Records<I::IntoIter>
where
    I: IntoIterator<Item = Token>,
{
    Records::new(tokens.into_iter())
}
