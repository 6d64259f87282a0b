// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types that describe the training problem:
//
//   intent.rs        - intent records read from the dataset and
//                      the (tokens, tag) documents derived from them
//   feature_index.rs - the vocabulary and tag list that fix the
//                      position of every feature and label column
//   error.rs         - contract violations raised by the pipeline
//   traits.rs        - seams the application layer programs against
//
// Nothing in this layer touches burn, the filesystem or the CLI.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod error;

pub mod feature_index;

pub mod intent;

pub mod traits;
