use burn::data::dataset::Dataset;

use crate::domain::example::SequenceExample;

/// In-memory dataset over the examples of one train or
/// validation split. Implements Burn's Dataset trait so the
/// DataLoader can call .get(index) and .len() on it.
pub struct SequenceDataset {
    examples: Vec<SequenceExample>,
}

impl SequenceDataset {
    pub fn new(examples: Vec<SequenceExample>) -> Self {
        Self { examples }
    }

    pub fn example_count(&self) -> usize {
        self.examples.len()
    }

    /// Number of positive-class examples — logged at the start
    /// of each fold so class imbalance is visible in the run log.
    pub fn positive_count(&self) -> usize {
        self.examples.iter().filter(|e| e.is_positive()).count()
    }
}

impl Dataset<SequenceExample> for SequenceDataset {
    fn get(&self, index: usize) -> Option<SequenceExample> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn example(label: u8) -> SequenceExample {
        SequenceExample::new(vec![0.0; 4], label, 0)
    }

    #[test]
    fn test_get_and_len() {
        let ds = SequenceDataset::new(vec![example(0), example(1)]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().label, 1);
        assert!(ds.get(2).is_none());
    }

    #[test]
    fn test_positive_count() {
        let ds = SequenceDataset::new(vec![example(0), example(1), example(1)]);
        assert_eq!(ds.positive_count(), 2);
    }
}
