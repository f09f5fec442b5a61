// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Loads a fold's best checkpoint and scores it on one partition
// group — by default the held-out outer test group, which no
// training or model selection ever touched.
//
// Steps:
//   Step 1: Rebuild model from checkpoint  (Layer 5 - ml)
//   Step 2: Load the .npz archive          (Layer 4 - data)
//   Step 3: Select the requested partition
//   Step 4: Report loss and accuracy
//
// Reference: Burn Book §5 (Records)

use anyhow::{bail, Result};

use crate::data::archive::NpzArchiveLoader;
use crate::domain::traits::ExampleSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::evaluator::{EvaluationReport, Evaluator};
use crate::ml::trainer::select_device;

pub struct EvaluateUseCase {
    checkpoint_dir: String,
    dataset:        String,
    partition:      usize,
    gpu:            i32,
}

impl EvaluateUseCase {
    pub fn new(
        checkpoint_dir: impl Into<String>,
        dataset:        impl Into<String>,
        partition:      usize,
        gpu:            i32,
    ) -> Self {
        Self {
            checkpoint_dir: checkpoint_dir.into(),
            dataset:        dataset.into(),
            partition,
            gpu,
        }
    }

    /// Run the evaluation and return the report.
    pub fn execute(&self) -> Result<EvaluationReport> {
        // ── Step 1: Rebuild the model from the checkpoint ─────────────────────
        let device = select_device(self.gpu);
        let ckpt_manager = CheckpointManager::new(&self.checkpoint_dir);
        let evaluator = Evaluator::from_checkpoint(&ckpt_manager, device)?;

        // ── Step 2: Load the archive ──────────────────────────────────────────
        let examples = NpzArchiveLoader::new(&self.dataset).load_all()?;

        // ── Step 3: Select the requested partition group ──────────────────────
        let selected: Vec<_> = examples
            .into_iter()
            .filter(|e| e.fold == self.partition)
            .collect();

        if selected.is_empty() {
            bail!(
                "archive '{}' has no examples in partition {}",
                self.dataset,
                self.partition
            );
        }
        tracing::info!(
            "Evaluating partition {} ({} examples)",
            self.partition,
            selected.len()
        );

        // ── Step 4: Score ─────────────────────────────────────────────────────
        evaluator.evaluate(&selected)
    }
}
