// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
//   checkpoint.rs - artifact store: model weights (gzipped
//                   MessagePack), model/train configs and the
//                   words/classes lists, all under one directory
//
//   metrics.rs    - per-epoch loss/accuracy CSV log
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Training artifacts on disk
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
