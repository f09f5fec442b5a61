// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   run_dir.rs    — Output directory layout
//                   Creates the timestamped run directory and
//                   one partition_{i} subdirectory per inner
//                   fold. The timestamp makes every invocation
//                   land in its own directory.
//
//   checkpoint.rs — Saving and loading model weights
//                   Uses Burn's CompactRecorder to serialise
//                   model parameters to disk. Also saves/loads
//                   TrainConfig as JSON so evaluation can
//                   rebuild the model.
//
//   metrics.rs    — Training metrics logging
//                   Writes epoch-level metrics (loss, accuracy,
//                   learning rate) to a CSV file per fold for
//                   later analysis and plotting.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file checkpoints for S3 cloud storage)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Timestamped run directory and per-fold subdirectories
pub mod run_dir;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Per-epoch metrics CSV logger
pub mod metrics;
