mod url;

pub use self::url::RecipePipeline;

use std::fmt;

/// Where an extraction call currently is. Used for logging transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    Fetching,
    StructuredAttempt,
    HeuristicOrAiAttempt,
    Normalizing,
    Done,
    Failed,
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtractionState::Fetching => "fetching",
            ExtractionState::StructuredAttempt => "structured attempt",
            ExtractionState::HeuristicOrAiAttempt => "heuristic or AI attempt",
            ExtractionState::Normalizing => "normalizing",
            ExtractionState::Done => "done",
            ExtractionState::Failed => "failed",
        };
        f.write_str(label)
    }
}
