// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// SequenceExamples into GPU-ready tensors.
//
// How batching works here:
//   Input:  Vec of N examples, each with seq_len * alphabet
//           one-hot features
//   Output: SequenceBatch with a [N, seq_len, alphabet] float
//           tensor and a [N] integer label tensor
//
//   We flatten all features into one long Vec, then reshape:
//   [e1_p1c1, e1_p1c2, ..., e1_pScA, e2_p1c1, ...] → [N, S, A]
//
// Why is this easy here?
//   Every sequence in the archive has the same fixed length,
//   so no padding or length bookkeeping is needed — the flat
//   Vec always divides evenly into [N, S, A].
//
// The tensor stays channels-last here, matching the archive
// layout; the model transposes to channels-first for Conv1d.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::example::SequenceExample;

// ─── SequenceBatch ────────────────────────────────────────────────────────────
/// A batch of examples ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// One-hot features — shape: [batch_size, seq_len, alphabet]
    pub features: Tensor<B, 3>,

    /// Binary class labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── SequenceBatcher ──────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct GPU/CPU, plus the fixed feature
/// dimensions needed for the reshape.
#[derive(Clone, Debug)]
pub struct SequenceBatcher<B: Backend> {
    /// The device to create tensors on (e.g. GPU index 0)
    pub device: B::Device,

    /// Fixed sequence length of every example
    pub seq_len: usize,

    /// Number of one-hot channels per position
    pub alphabet_size: usize,
}

impl<B: Backend> SequenceBatcher<B> {
    /// Create a new batcher for the given device and dimensions
    pub fn new(device: B::Device, seq_len: usize, alphabet_size: usize) -> Self {
        Self { device, seq_len, alphabet_size }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes SequenceBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch.
impl<B: Backend> Batcher<SequenceExample, SequenceBatch<B>> for SequenceBatcher<B> {
    fn batch(&self, items: Vec<SequenceExample>) -> SequenceBatch<B> {
        let batch_size = items.len();

        // Flatten all features into one Vec<f32>, example by example
        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|e| e.features.iter().copied())
            .collect();

        // Labels are one scalar per example (Burn uses i32 for Int tensors)
        let labels_flat: Vec<i32> = items
            .iter()
            .map(|e| e.label as i32)
            .collect();

        // Tensor::from_floats creates a 1D tensor from a slice,
        // then .reshape() gives it the [batch, seq, alphabet] shape
        let features = Tensor::<B, 1>::from_floats(
            features_flat.as_slice(), &self.device,
        ).reshape([batch_size, self.seq_len, self.alphabet_size]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels_flat.as_slice(), &self.device,
        );

        SequenceBatch { features, labels }
    }
}
