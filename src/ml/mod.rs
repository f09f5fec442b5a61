// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the data layer's Dataset/Batcher impls.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without a GPU
//   - The network topology is clearly separated from
//     archive loading and application logic
//
// What's in this layer:
//
//   model.rs     — The 1D convolutional classifier
//                  A fixed stack with fixed hyperparameters:
//                  • Conv1d (same padding, Kaiming-normal init)
//                  • Batch normalisation after every block
//                  • Global average pooling over the length axis
//                  • Two dense blocks and a sigmoid output unit
//                  • Dropout between all blocks
//
//   trainer.rs   — The per-fold training loop
//                  Handles forward pass, loss computation,
//                  backward pass, Adam step, per-epoch metrics,
//                  and best-checkpoint saving
//
//   schedule.rs  — Epoch-level training controls
//                  Early stopping and learning-rate reduction
//                  on validation-loss plateau
//
//   evaluator.rs — The evaluation engine
//                  Loads a fold checkpoint and reports loss and
//                  accuracy on one partition group
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Ioffe & Szegedy (2015) Batch Normalization
//            Lin et al. (2014) Network in Network (global pooling)

/// 1D convolutional classifier architecture
pub mod model;

/// Per-fold training loop with validation and checkpointing
pub mod trainer;

/// Early stopping and LR-on-plateau state machines
pub mod schedule;

/// Evaluation engine — loads a checkpoint and scores one partition
pub mod evaluator;
