// ============================================================
// Layer 3 — SequenceExample Domain Type
// ============================================================
// Represents a single training example: one fixed-length
// one-hot encoded sequence, its binary class label, and the
// cross-validation group it was assigned to when the archive
// was built.
//
// The features are stored as a flat Vec<f32> in row-major
// [position][channel] order, e.g. for a 600-position sequence
// over a 4-letter alphabet the Vec has 2400 entries and
// position p, channel c lives at index p * 4 + c. The batcher
// reshapes this into a [batch, seq_len, alphabet] tensor —
// the domain layer never sees tensors.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One labelled example from the dataset archive.
/// The fold id is carried with the example so splitting into
/// train/validation sets is a pure filter over a Vec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceExample {
    /// Flattened one-hot features, [position][channel] order
    pub features: Vec<f32>,

    /// Binary classification target — 0 or 1
    pub label: u8,

    /// Cross-validation group id this example belongs to
    pub fold: usize,
}

impl SequenceExample {
    /// Create a new SequenceExample
    pub fn new(features: Vec<f32>, label: u8, fold: usize) -> Self {
        Self { features, label, fold }
    }

    /// Returns true for the positive class
    pub fn is_positive(&self) -> bool {
        self.label != 0
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_positive() {
        assert!(SequenceExample::new(vec![0.0; 8], 1, 0).is_positive());
        assert!(!SequenceExample::new(vec![0.0; 8], 0, 3).is_positive());
    }
}
