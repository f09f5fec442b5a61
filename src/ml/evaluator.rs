// ============================================================
// Layer 5 — Evaluator
// ============================================================
use anyhow::{bail, Result};
use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::batcher::SequenceBatcher;
use crate::domain::example::SequenceExample;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{ConvNet, ConvNetConfig};

type InferBackend = burn::backend::Wgpu;

/// Loss and accuracy over one set of examples.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub examples: usize,
    pub loss:     f64,
    pub accuracy: f64,
}

pub struct Evaluator {
    model:      ConvNet<InferBackend>,
    batcher:    SequenceBatcher<InferBackend>,
    batch_size: usize,
}

impl Evaluator {
    /// Rebuild the model from the checkpoint directory's saved
    /// config and load the best weights into it.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        device:       burn::backend::wgpu::WgpuDevice,
    ) -> Result<Self> {
        let cfg = ckpt_manager.load_config()?;

        // Dropout 0.0 — evaluation never drops activations
        let model_cfg = ConvNetConfig::new(
            cfg.seq_len, cfg.alphabet_size, cfg.num_filters,
            cfg.kernel_size, cfg.hidden_dim, cfg.bottleneck_dim, 0.0,
        );
        let model: ConvNet<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_best_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint (best epoch {})", ckpt_manager.best_epoch()?);

        let batcher =
            SequenceBatcher::<InferBackend>::new(device, cfg.seq_len, cfg.alphabet_size);

        Ok(Self { model, batcher, batch_size: cfg.batch_size })
    }

    /// Score a set of examples: mean binary cross-entropy and
    /// the fraction predicted correctly at a 0.5 threshold.
    pub fn evaluate(&self, examples: &[SequenceExample]) -> Result<EvaluationReport> {
        if examples.is_empty() {
            bail!("no examples to evaluate");
        }

        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;

        for chunk in examples.chunks(self.batch_size) {
            let batch = self.batcher.batch(chunk.to_vec());
            let probs = self.model.forward(batch.features);

            let bce = burn::nn::loss::BinaryCrossEntropyLossConfig::new()
                .init(&probs.device());
            loss_sum += bce
                .forward(probs.clone(), batch.labels.clone())
                .into_scalar()
                .elem::<f64>();
            batches += 1;

            let predicted = probs.greater_equal_elem(0.5).int();
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        Ok(EvaluationReport {
            examples: examples.len(),
            loss:     loss_sum / batches as f64,
            accuracy: correct as f64 / examples.len() as f64,
        })
    }
}
