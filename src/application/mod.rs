// ============================================================
// Layer 2 — Application Layer
// ============================================================
// One use case per CLI subcommand. The use cases own the
// orchestration — which layers get called, in which order —
// but contain no ML math, no file-format knowledge, and no
// clap types.
//
//   train_use_case.rs    — archive → fold loop → checkpoints
//   evaluate_use_case.rs — checkpoint → held-out metrics
//
// Reference: Rust Book §7 (Modules)

/// Full nested cross-validation training run
pub mod train_use_case;

/// Score a saved checkpoint on one partition group
pub mod evaluate_use_case;
