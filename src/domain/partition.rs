// ============================================================
// Layer 3 — Fold Partition Scheme
// ============================================================
// The dataset archive assigns every example to one of six
// disjoint groups (0..=5). Group 5 is the outer test set:
// it is never touched during training or model selection.
//
// The remaining five groups form the inner cross-validation:
// each of groups 0..=4 serves exactly once as the validation
// set while the other four are the training set. This is the
// standard nested cross-validation layout — the outer group
// gives an unbiased performance estimate after all model
// selection on the inner folds is done.
//
//   group:      0     1     2     3     4     5
//   fold 0:    val  train train train train  (held out)
//   fold 1:   train  val  train train train  (held out)
//   ...
//   fold 4:   train train train train  val   (held out)
//
// The scheme is fixed data, not behaviour — which groups exist
// and which one is held out is decided when the archive is
// built, so this type only encodes the enumeration.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// The fixed partitioning scheme over cross-validation groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldScheme {
    /// Total number of disjoint groups in the archive
    pub num_groups: usize,

    /// Group id reserved as the untouched outer test set
    pub held_out: usize,
}

impl Default for FoldScheme {
    /// Six groups, group 5 held out — the layout the archives
    /// in this project are built with.
    fn default() -> Self {
        Self { num_groups: 6, held_out: 5 }
    }
}

impl FoldScheme {
    /// Create a scheme with `num_groups` groups, holding `held_out` out.
    ///
    /// # Panics
    /// Panics if `held_out` is not a valid group id, or if fewer
    /// than two inner groups would remain (no train/val split possible).
    pub fn new(num_groups: usize, held_out: usize) -> Self {
        assert!(
            held_out < num_groups,
            "held_out group {} out of range ({} groups)",
            held_out,
            num_groups
        );
        assert!(
            num_groups >= 3,
            "need at least 3 groups for a train/val/held-out layout, got {}",
            num_groups
        );
        Self { num_groups, held_out }
    }

    /// All group ids that take part in the inner cross-validation,
    /// i.e. every group except the held-out one, in ascending order.
    pub fn inner_folds(&self) -> Vec<usize> {
        (0..self.num_groups).filter(|&g| g != self.held_out).collect()
    }

    /// The training groups for one inner fold: every inner group
    /// except the one currently serving as validation.
    ///
    /// # Panics
    /// Panics if `val_fold` is the held-out group or out of range —
    /// both indicate a bug in the caller's fold loop.
    pub fn train_groups(&self, val_fold: usize) -> Vec<usize> {
        assert!(
            val_fold < self.num_groups && val_fold != self.held_out,
            "group {} cannot serve as validation",
            val_fold
        );
        self.inner_folds().into_iter().filter(|&g| g != val_fold).collect()
    }

    /// Returns true if `group` is the untouched outer test set
    pub fn is_held_out(&self, group: usize) -> bool {
        group == self.held_out
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme_has_five_inner_folds() {
        let scheme = FoldScheme::default();
        assert_eq!(scheme.inner_folds(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_each_inner_fold_validates_exactly_once() {
        // The fold loop iterates inner_folds() — every non-held-out
        // group must appear exactly once as validation.
        let scheme = FoldScheme::default();
        let folds = scheme.inner_folds();
        for g in 0..scheme.num_groups {
            let count = folds.iter().filter(|&&f| f == g).count();
            if scheme.is_held_out(g) {
                assert_eq!(count, 0);
            } else {
                assert_eq!(count, 1);
            }
        }
    }

    #[test]
    fn test_train_and_val_are_disjoint_and_cover_inner_groups() {
        let scheme = FoldScheme::default();
        for val_fold in scheme.inner_folds() {
            let train = scheme.train_groups(val_fold);

            // Validation group never appears in its own training set
            assert!(!train.contains(&val_fold));

            // Held-out group never appears anywhere
            assert!(!train.contains(&scheme.held_out));

            // Together they cover exactly the inner groups
            let mut covered = train.clone();
            covered.push(val_fold);
            covered.sort_unstable();
            assert_eq!(covered, scheme.inner_folds());
        }
    }

    #[test]
    fn test_is_held_out() {
        let scheme = FoldScheme::default();
        assert!(scheme.is_held_out(5));
        assert!(!scheme.is_held_out(0));
    }

    #[test]
    #[should_panic]
    fn test_held_out_cannot_validate() {
        FoldScheme::default().train_groups(5);
    }
}
