// ============================================================
// Layer 3 - Pipeline Errors
// ============================================================
// Typed contract violations. They are wrapped into anyhow at the
// application boundary and abort the run; none are recoverable.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("training set is empty; the intents file produced no examples")]
    EmptyTrainingSet,

    #[error("example {index}: feature vector has width {actual}, expected {expected}")]
    FeatureWidth { index: usize, expected: usize, actual: usize },

    #[error("example {index}: label vector has width {actual}, expected {expected}")]
    LabelWidth { index: usize, expected: usize, actual: usize },

    #[error("example {index}: label vector is not one-hot (sum = {sum})")]
    NotOneHot { index: usize, sum: f32 },

    #[error("document tag '{0}' is not in the tag list")]
    UnknownTag(String),

    #[error("{kind} list is not strictly sorted at position {position} ('{entry}')")]
    UnsortedIndex { kind: &'static str, position: usize, entry: String },

    #[error("artifact mismatch: {0}")]
    ArtifactMismatch(String),

    #[error("lexicon line {line}: {reason}")]
    Lexicon { line: usize, reason: String },
}
