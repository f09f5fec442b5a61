// ============================================================
// Layer 4 — Fold Splitter
// ============================================================
// Splits the loaded examples into a training set and a
// validation set for one inner cross-validation fold.
//
// Unlike a random split, the assignment here is fixed data:
// every example carries the group id it was given when the
// archive was built, so the split is a pure filter —
//
//   validation = examples whose fold == val_fold
//   training   = examples whose fold is one of the other
//                inner groups
//   held out   = examples in the outer test group, excluded
//                from both sets
//
// Determinism matters: the same archive and the same fold id
// always produce the same split, so runs are reproducible and
// no example ever leaks between train and validation.
//
// Reference: Rust Book §13 (Iterators and Closures)

use crate::domain::example::SequenceExample;
use crate::domain::partition::FoldScheme;

/// Partition `examples` into (train, validation) sets for the
/// fold where `val_fold` serves as validation.
///
/// Examples belonging to the scheme's held-out group — or to a
/// group id the scheme doesn't know — end up in neither set.
pub fn split_by_fold(
    examples: Vec<SequenceExample>,
    scheme:   &FoldScheme,
    val_fold: usize,
) -> (Vec<SequenceExample>, Vec<SequenceExample>) {
    let train_groups = scheme.train_groups(val_fold);

    let mut train = Vec::new();
    let mut val   = Vec::new();

    for example in examples {
        if example.fold == val_fold {
            val.push(example);
        } else if train_groups.contains(&example.fold) {
            train.push(example);
        }
        // held-out / unknown groups fall through
    }

    tracing::debug!(
        "Fold {}: {} training, {} validation examples",
        val_fold,
        train.len(),
        val.len(),
    );

    (train, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// One tiny example per call, tagged with a fold id
    fn example(fold: usize) -> SequenceExample {
        SequenceExample::new(vec![0.0; 4], 0, fold)
    }

    /// Two examples in each of the six groups
    fn two_per_group() -> Vec<SequenceExample> {
        (0..6).flat_map(|g| vec![example(g), example(g)]).collect()
    }

    #[test]
    fn test_split_sizes() {
        let scheme = FoldScheme::default();
        let (train, val) = split_by_fold(two_per_group(), &scheme, 2);
        // 4 training groups * 2 examples, 1 validation group * 2
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
    }

    #[test]
    fn test_validation_and_train_are_disjoint() {
        let scheme = FoldScheme::default();
        let (train, val) = split_by_fold(two_per_group(), &scheme, 0);
        assert!(val.iter().all(|e| e.fold == 0));
        assert!(train.iter().all(|e| e.fold != 0));
    }

    #[test]
    fn test_held_out_group_is_excluded() {
        let scheme = FoldScheme::default();
        for val_fold in scheme.inner_folds() {
            let (train, val) = split_by_fold(two_per_group(), &scheme, val_fold);
            assert!(train.iter().all(|e| e.fold != 5));
            assert!(val.iter().all(|e| e.fold != 5));
        }
    }

    #[test]
    fn test_together_cover_exactly_the_inner_groups() {
        let scheme = FoldScheme::default();
        let (train, val) = split_by_fold(two_per_group(), &scheme, 3);
        let mut folds: Vec<usize> = train.iter().chain(val.iter()).map(|e| e.fold).collect();
        folds.sort_unstable();
        folds.dedup();
        assert_eq!(folds, scheme.inner_folds());
    }

    #[test]
    fn test_random_fold_assignment_partitions_every_example() {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        let examples: Vec<SequenceExample> =
            (0..200).map(|_| example(rng.gen_range(0..6))).collect();
        let held_out = examples.iter().filter(|e| e.fold == 5).count();

        let scheme = FoldScheme::default();
        let (train, val) = split_by_fold(examples, &scheme, 4);

        // Every example is in exactly one of train / val / excluded
        assert_eq!(train.len() + val.len() + held_out, 200);
    }

    #[test]
    fn test_empty_input() {
        let scheme = FoldScheme::default();
        let (train, val) = split_by_fold(Vec::new(), &scheme, 1);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }
}
