use crate::record::Record;
use crate::reducer::{Reducer, Reduction};
use linekv_common::ConsumerEvent;
use linekv_scanner::Token;

/// Trait for consumers that accept tokens incrementally and emit output.
pub trait TokenConsumer<Out> {
    /// Pushes a single token. Output is collected with [`poll`](Self::poll).
    fn push_token(&mut self, token: Token);

    /// Signals the end of input and drains any remaining output.
    fn finish(&mut self) -> Vec<Out>;

    /// Reports what the consumer has ready or needs.
    fn poll(&mut self) -> ConsumerEvent<Out>;
}

/// A [`Reducer`] with an outbox, driven by a pipeline.
#[derive(Default)]
pub struct StreamingReducer {
    reducer: Reducer,
    ready: Vec<Record>,
}

impl StreamingReducer {
    pub fn new(reducer: Reducer) -> Self {
        Self {
            reducer,
            ready: Vec::new(),
        }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }
}

impl TokenConsumer<Record> for StreamingReducer {
    fn push_token(&mut self, token: Token) {
        match self.reducer.push(token) {
            Reduction::Pending => {}
            Reduction::Emit(record) => self.ready.push(record),
            Reduction::Final(record) => self.ready.extend(record),
        }
    }

    fn finish(&mut self) -> Vec<Record> {
        self.ready.extend(self.reducer.finish());
        std::mem::take(&mut self.ready)
    }

    fn poll(&mut self) -> ConsumerEvent<Record> {
        let ready = std::mem::take(&mut self.ready);
        if self.reducer.is_halted() {
            ConsumerEvent::Finished(ready)
        } else if ready.is_empty() {
            ConsumerEvent::NeedToken
        } else {
            ConsumerEvent::Produced(ready)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linekv_scanner::Scanner;

    #[test]
    fn test_poll_cycle() {
        let mut consumer = StreamingReducer::default();
        let mut scanner = Scanner::from_text("a=1\nb=2");

        assert_eq!(consumer.poll(), ConsumerEvent::NeedToken);
        let mut produced = Vec::new();
        while let Some(token) = scanner.next() {
            consumer.push_token(token);
            match consumer.poll() {
                ConsumerEvent::NeedToken => {}
                ConsumerEvent::Produced(mut records) => produced.append(&mut records),
                ConsumerEvent::Finished(mut records) => {
                    produced.append(&mut records);
                    break;
                }
            }
        }

        let rendered: Vec<String> = produced.iter().map(Record::to_string).collect();
        assert_eq!(rendered, vec!["a=1", "b=2"]);
        assert!(consumer.poll().is_finished());
        assert!(consumer.finish().is_empty());
    }
}
