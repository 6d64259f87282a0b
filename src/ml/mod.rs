// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// All burn modules and the optimisation loop live here.
//
//   model.rs   - the intent classifier:
//                dense(128, relu) → dropout(0.5)
//                → dense(64, relu) → dropout(0.5)
//                → dense(tags, softmax)
//
//   trainer.rs - mini-batch Nesterov SGD with per-step
//                learning-rate decay, per-epoch metrics and
//                the final model save
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Feed-forward intent classifier
pub mod model;

/// Training loop
pub mod trainer;
