// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved per fold directory:
//   1. model_best.mpk.gz   — weights at the best validation loss
//   2. best_epoch.json     — which epoch produced those weights
//   3. train_config.json   — architecture + hyperparameters
//
// Why save the config separately?
//   When loading for evaluation, we need to know the exact
//   architecture (filters, kernel size, etc.) to rebuild the
//   model before loading the weights into it. Without the
//   config, we can't reconstruct the model.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if architecture doesn't match
//
// The best checkpoint is a single file that gets overwritten
// whenever the validation loss improves — only the best-so-far
// weights are kept per fold. The run directory additionally
// holds model_final.mpk.gz, the weights of the last fold at
// the epoch its loop stopped.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde_json;

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::ConvNet;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    /// Path to the directory where checkpoints are stored
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Overwrite the best-so-far weights for this fold.
    ///
    /// Uses Burn's CompactRecorder which:
    ///   1. Calls model.into_record() to extract all parameters
    ///   2. Serialises to MessagePack binary format
    ///   3. Compresses with gzip
    ///   4. Writes to {dir}/model_best.mpk.gz
    pub fn save_best_model<B: AutodiffBackend>(
        &self,
        model: &ConvNet<B>,
        epoch: usize,
    ) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join("model_best");

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        // Record which epoch these weights came from
        let epoch_path = self.dir.join("best_epoch.json");
        fs::write(&epoch_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write best_epoch.json")?;

        tracing::debug!("Saved best checkpoint (epoch {})", epoch);
        Ok(())
    }

    /// Save the final model — the weights the fold loop ended
    /// with, independent of validation performance.
    pub fn save_final_model<B: AutodiffBackend>(&self, model: &ConvNet<B>) -> Result<()> {
        let path = self.dir.join("model_final");

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save final model to '{}'", path.display())
            })?;

        tracing::debug!("Saved final model");
        Ok(())
    }

    /// Load the best-checkpoint weights into `model`.
    ///
    /// The model parameter must have the correct architecture
    /// (matching the saved checkpoint) or loading will fail.
    pub fn load_best_model<B: Backend>(
        &self,
        model:  ConvNet<B>,
        device: &B::Device,
    ) -> Result<ConvNet<B>> {
        let path = self.dir.join("model_best");

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        // load_record() returns a new model with the loaded weights
        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    ///
    /// This must be called before training starts so the
    /// evaluator can reconstruct the exact model architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");

        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    ///
    /// Called by the Evaluator to know what model architecture
    /// was used during training so it can rebuild the same model.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'evaluate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Read best_epoch.json and return the epoch number.
    /// Returns an error if no checkpoint has been saved yet.
    pub fn best_epoch(&self) -> Result<usize> {
        let path = self.dir.join("best_epoch.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'best_epoch.json'. \
                 Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(tmp.path().join("fold"));

        let cfg = TrainConfig::default();
        ckpt.save_config(&cfg).unwrap();

        let loaded = ckpt.load_config().unwrap();
        assert_eq!(loaded.seq_len, cfg.seq_len);
        assert_eq!(loaded.num_filters, cfg.num_filters);
        assert_eq!(loaded.lr, cfg.lr);
    }

    #[test]
    fn test_best_epoch_requires_a_checkpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(tmp.path().join("fold"));
        assert!(ckpt.best_epoch().is_err());
    }
}
