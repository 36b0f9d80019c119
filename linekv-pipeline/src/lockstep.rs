use linekv_common::ConsumerEvent;
use linekv_reducer::TokenConsumer;
use linekv_scanner::TokenProducer;
use std::marker::PhantomData;

/// Drives a producer and a consumer in lockstep on the current thread.
///
/// Tokens are pulled only when the consumer reports
/// [`ConsumerEvent::NeedToken`], so nothing is read ahead of the record
/// being built.
pub struct Pipeline<P, C, Out>
where
    P: TokenProducer,
    C: TokenConsumer<Out>,
{
    producer: P,
    consumer: C,
    _marker: PhantomData<Out>,
}

impl<P, C, Out> Pipeline<P, C, Out>
where
    P: TokenProducer,
    C: TokenConsumer<Out>,
{
    pub fn new(producer: P, consumer: C) -> Self {
        Self {
            producer,
            consumer,
            _marker: PhantomData,
        }
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Runs until the consumer finishes, collecting everything it emits.
    pub fn run(&mut self) -> Vec<Out> {
        let mut results = Vec::new();
        self.for_each(|out| results.push(out));
        results
    }

    /// Runs until the consumer finishes, handing each output to `f` as soon
    /// as it is produced.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Out),
    {
        loop {
            match self.consumer.poll() {
                ConsumerEvent::Produced(outputs) => outputs.into_iter().for_each(&mut f),
                ConsumerEvent::NeedToken => match self.producer.poll_token() {
                    Some(token) => self.consumer.push_token(token),
                    None => {
                        self.consumer.finish().into_iter().for_each(&mut f);
                        break;
                    }
                },
                ConsumerEvent::Finished(outputs) => {
                    outputs.into_iter().for_each(&mut f);
                    break;
                }
            }
        }
    }

    pub fn into_parts(self) -> (P, C) {
        (self.producer, self.consumer)
    }
}
