// ============================================================
// Layer 4 — Dataset Archive Loader
// ============================================================
// Loads the compressed .npz archive the preprocessing pipeline
// produces. An .npz file is a ZIP of .npy arrays; ndarray-npy
// parses it into typed ndarray arrays.
//
// The archive holds three named arrays:
//
//   X.npy         — f32, shape [n, seq_len, alphabet]
//                   one-hot encoded sequences, channels last
//   cl.npy        — i64, shape [n]
//                   binary class labels (0 or 1)
//   partition.npy — i64, shape [n]
//                   cross-validation group id per example
//
// Invariant: all three arrays share the same leading (example)
// dimension. The loader refuses the archive otherwise — a
// mismatch means the arrays were built from different example
// sets and every downstream index would be silently wrong.
//
// Unlike numpy's load(), ndarray-npy is statically typed: the
// dtypes above are required, and a differently-typed archive
// fails with a deserialisation error naming the entry.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs::File, path::PathBuf};
use ndarray::{Array1, Array3, Axis};
use ndarray_npy::NpzReader;

use crate::domain::example::SequenceExample;
use crate::domain::traits::ExampleSource;

/// The three arrays of a dataset archive, still in ndarray form.
/// Kept as arrays (rather than examples) so shape checks can be
/// expressed once, against the arrays themselves.
pub struct SequenceArchive {
    /// One-hot features, [example, position, channel]
    pub features: Array3<f32>,

    /// Binary class label per example
    pub labels: Array1<i64>,

    /// Cross-validation group id per example
    pub folds: Array1<i64>,
}

impl SequenceArchive {
    /// Number of examples (the shared leading dimension)
    pub fn example_count(&self) -> usize {
        self.features.len_of(Axis(0))
    }

    /// Sequence length the archive was encoded with
    pub fn seq_len(&self) -> usize {
        self.features.len_of(Axis(1))
    }

    /// Alphabet size (number of one-hot channels)
    pub fn alphabet_size(&self) -> usize {
        self.features.len_of(Axis(2))
    }

    /// Check the cross-array invariants. Called by the loader;
    /// public so tests can exercise it on synthetic arrays.
    pub fn validate(&self) -> Result<()> {
        let n = self.example_count();

        if self.labels.len() != n || self.folds.len() != n {
            bail!(
                "archive arrays disagree on example count: X has {}, cl has {}, partition has {}",
                n,
                self.labels.len(),
                self.folds.len()
            );
        }

        if let Some(&bad) = self.labels.iter().find(|&&l| l != 0 && l != 1) {
            bail!("label vector 'cl' must be binary (0/1), found {}", bad);
        }

        if let Some(&bad) = self.folds.iter().find(|&&f| f < 0) {
            bail!("partition vector contains negative group id {}", bad);
        }

        Ok(())
    }

    /// Flatten the arrays into per-example domain values.
    /// Row-major iteration over each [seq_len, alphabet] slice
    /// matches the [position][channel] layout SequenceExample
    /// documents.
    pub fn into_examples(self) -> Vec<SequenceExample> {
        let n = self.example_count();
        let mut examples = Vec::with_capacity(n);

        for i in 0..n {
            let features: Vec<f32> = self
                .features
                .index_axis(Axis(0), i)
                .iter()
                .copied()
                .collect();

            examples.push(SequenceExample::new(
                features,
                self.labels[i] as u8,
                self.folds[i] as usize,
            ));
        }

        examples
    }
}

/// Loads a SequenceArchive from an .npz file on disk.
pub struct NpzArchiveLoader {
    /// Path to the .npz archive
    path: PathBuf,
}

impl NpzArchiveLoader {
    /// Create a loader pointed at an .npz file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the archive, keeping the ndarray form.
    pub fn load(&self) -> Result<SequenceArchive> {
        let file = File::open(&self.path)
            .with_context(|| format!("cannot open dataset archive '{}'", self.path.display()))?;

        let mut npz = NpzReader::new(file)
            .with_context(|| format!("'{}' is not a readable .npz archive", self.path.display()))?;

        // np.savez stores each keyword argument as '<name>.npy'
        let features: Array3<f32> = npz
            .by_name("X.npy")
            .context("archive entry 'X' missing or not a 3-D f32 array")?;
        let labels: Array1<i64> = npz
            .by_name("cl.npy")
            .context("archive entry 'cl' missing or not a 1-D i64 array")?;
        let folds: Array1<i64> = npz
            .by_name("partition.npy")
            .context("archive entry 'partition' missing or not a 1-D i64 array")?;

        let archive = SequenceArchive { features, labels, folds };
        archive.validate()?;

        tracing::info!(
            "Loaded archive '{}': {} examples, seq_len={}, alphabet={}",
            self.path.display(),
            archive.example_count(),
            archive.seq_len(),
            archive.alphabet_size(),
        );

        Ok(archive)
    }
}

/// Implement the ExampleSource trait so the application layer
/// can load examples without knowing about .npz internals
impl ExampleSource for NpzArchiveLoader {
    fn load_all(&self) -> Result<Vec<SequenceExample>> {
        Ok(self.load()?.into_examples())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};
    use ndarray_npy::NpzWriter;
    use std::fs::File;

    fn tiny_archive(n: usize) -> SequenceArchive {
        SequenceArchive {
            features: Array3::zeros((n, 5, 4)),
            labels: Array1::zeros(n),
            folds: Array1::zeros(n),
        }
    }

    #[test]
    fn test_validate_accepts_matching_lengths() {
        assert!(tiny_archive(3).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        let mut archive = tiny_archive(3);
        archive.labels = Array1::zeros(2);
        assert!(archive.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_binary_labels() {
        let mut archive = tiny_archive(2);
        archive.labels[1] = 7;
        assert!(archive.validate().is_err());
    }

    #[test]
    fn test_into_examples_preserves_order_and_layout() {
        let mut archive = tiny_archive(2);
        archive.features[[1, 0, 2]] = 1.0;
        archive.labels[1] = 1;
        archive.folds[1] = 4;

        let examples = archive.into_examples();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].label, 0);
        assert_eq!(examples[1].fold, 4);
        // position 0, channel 2 → flat index 0 * 4 + 2
        assert_eq!(examples[1].features[2], 1.0);
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.npz");

        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("X.npy", &Array3::<f32>::zeros((4, 5, 4))).unwrap();
        npz.add_array("cl.npy", &Array1::<i64>::from(vec![0, 1, 1, 0])).unwrap();
        npz.add_array("partition.npy", &Array1::<i64>::from(vec![0, 1, 2, 5])).unwrap();
        npz.finish().unwrap();

        let archive = NpzArchiveLoader::new(&path).load().unwrap();
        assert_eq!(archive.example_count(), 4);
        assert_eq!(archive.seq_len(), 5);
        assert_eq!(archive.alphabet_size(), 4);

        let examples = archive.into_examples();
        assert_eq!(examples[3].fold, 5);
        assert!(examples[1].is_positive());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = NpzArchiveLoader::new("/nonexistent/archive.npz");
        assert!(loader.load().is_err());
    }
}
