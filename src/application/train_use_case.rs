// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full nested cross-validation run in order:
//
//   Step 1: Load the .npz archive         (Layer 4 - data)
//   Step 2: Check shapes against config   (Layer 4 - data)
//   Step 3: Create the run directory      (Layer 6 - infra)
//   Step 4: For each inner fold:
//             split train/validation      (Layer 4 - data)
//             build datasets              (Layer 4 - data)
//             train + checkpoint best     (Layer 5 - ml)
//   Step 5: Save the final model          (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    archive::NpzArchiveLoader,
    dataset::SequenceDataset,
    splitter::split_by_fold,
};
use crate::domain::partition::FoldScheme;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    run_dir::RunDirectory,
};
use crate::ml::trainer::{run_training, select_device};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for
// evaluation. The CLI can override the common fields; the
// plateau/early-stopping thresholds keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset:        String,
    pub gpu:            i32,
    pub prefix:         String,
    pub seq_len:        usize,
    pub alphabet_size:  usize,
    pub num_filters:    usize,
    pub kernel_size:    usize,
    pub hidden_dim:     usize,
    pub bottleneck_dim: usize,
    pub dropout:        f64,
    pub lr:             f64,
    pub weight_decay:   f64,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub patience:       usize,
    pub min_delta:      f64,
    pub lr_factor:      f64,
    pub lr_patience:    usize,
    pub lr_min_delta:   f64,
    pub min_lr:         f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset:        String::new(),
            gpu:            -1,
            prefix:         "folder_train".to_string(),
            seq_len:        600,
            alphabet_size:  4,
            num_filters:    128,
            kernel_size:    10,
            hidden_dim:     128,
            bottleneck_dim: 2,
            dropout:        0.1,
            lr:             1e-4,
            weight_decay:   1e-4,
            batch_size:     64,
            epochs:         150,
            patience:       15,
            min_delta:      0.0,
            lr_factor:      0.1,
            lr_patience:    5,
            lr_min_delta:   1e-4,
            min_lr:         0.0,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full nested cross-validation.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training run end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset archive ──────────────────────────────────
        tracing::info!("Loading dataset archive '{}'", cfg.dataset);
        let archive = NpzArchiveLoader::new(&cfg.dataset).load()?;

        // ── Step 2: Check archive shapes against the config ───────────────────
        // A disagreement would only surface as a reshape panic deep
        // inside the batcher — fail here with a readable message.
        if archive.seq_len() != cfg.seq_len || archive.alphabet_size() != cfg.alphabet_size {
            bail!(
                "archive features are [{}, {}] per example but the model expects [{}, {}]",
                archive.seq_len(),
                archive.alphabet_size(),
                cfg.seq_len,
                cfg.alphabet_size,
            );
        }

        // ── Step 3: Create the timestamped run directory ──────────────────────
        let run_dir = RunDirectory::create(&cfg.prefix)?;
        let root_ckpt = CheckpointManager::new(run_dir.root());
        root_ckpt.save_config(cfg)?;

        let device = select_device(cfg.gpu);
        tracing::info!("Using WGPU device: {:?}", device);

        let examples = archive.into_examples();
        let scheme = FoldScheme::default();

        // ── Step 4: Inner cross-validation loop ───────────────────────────────
        // Each non-held-out group serves once as validation.
        // The held-out group never enters any split.
        let mut last_model = None;

        for val_fold in scheme.inner_folds() {
            let fold_dir = run_dir.fold_dir(val_fold)?;
            let ckpt_manager = CheckpointManager::new(&fold_dir);
            // Each fold directory is self-contained: config + weights
            ckpt_manager.save_config(cfg)?;
            let metrics = MetricsLogger::new(&fold_dir)?;

            let (train_examples, val_examples) =
                split_by_fold(examples.clone(), &scheme, val_fold);

            let train_dataset = SequenceDataset::new(train_examples);
            let val_dataset   = SequenceDataset::new(val_examples);
            tracing::info!(
                "Fold {}: {} train ({} positive), {} validation ({} positive)",
                val_fold,
                train_dataset.example_count(),
                train_dataset.positive_count(),
                val_dataset.example_count(),
                val_dataset.positive_count(),
            );

            let model = run_training(
                cfg, val_fold,
                train_dataset, val_dataset,
                &ckpt_manager, &metrics,
                device.clone(),
            )?;
            last_model = Some(model);
        }

        // ── Step 5: Save the final model at the run root ──────────────────────
        // The weights the last fold's loop ended with, kept besides
        // the per-fold best checkpoints.
        if let Some(model) = last_model {
            root_ckpt.save_final_model(&model)?;
            println!("Saved model to disk");
        }

        Ok(())
    }
}
