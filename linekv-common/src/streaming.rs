/// Status a push-style consumer reports to the pipeline driving it.
///
/// The driver polls the consumer: `NeedToken` asks for another token,
/// `Produced` hands over finished output, `Finished` hands over the last of
/// it and tells the driver to stop.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsumerEvent<Out> {
    /// Output became available; more input is still wanted.
    Produced(Vec<Out>),
    /// Nothing is ready until another token arrives.
    NeedToken,
    /// The consumer has halted; no further input will be read.
    Finished(Vec<Out>),
}

impl<Out> ConsumerEvent<Out> {
    /// Returns true once the consumer will accept no more tokens.
    pub fn is_finished(&self) -> bool {
        matches!(self, ConsumerEvent::Finished(_))
    }
}
