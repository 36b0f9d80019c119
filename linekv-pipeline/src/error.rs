use linekv_common::Stage;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to start the {stage} thread")]
    Spawn {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("the {stage} thread panicked")]
    StagePanicked { stage: Stage },
}
