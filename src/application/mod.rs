// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers; no ML math, no printing.
//
//   train_use_case.rs   - intents file → trained model + artifacts
//   inspect_use_case.rs - consistency check of a results directory
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Artifact verification workflow
pub mod inspect_use_case;
