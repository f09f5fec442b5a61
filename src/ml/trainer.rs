// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop for one cross-validation fold,
// using Burn's DataLoader and Adam.
//
// Key Burn 0.13 insight:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns model on MyInnerBackend (Wgpu)
//   - Validation batcher must also use MyInnerBackend
//   - BatchNorm switches to running statistics and Dropout
//     becomes a no-op on the inner backend, so validation is
//     deterministic
//
// The learning rate is a plain f64 handed to Optimizer::step
// every batch — which is exactly what lets ReduceLrOnPlateau
// work without touching the optimizer state.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SequenceBatcher, dataset::SequenceDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{ConvNet, ConvNetConfig};
use crate::ml::schedule::{EarlyStopping, ReduceLrOnPlateau};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Map the --gpu flag onto a wgpu device: a non-negative index
/// selects that discrete GPU, -1 selects the CPU.
pub fn select_device(gpu: i32) -> burn::backend::wgpu::WgpuDevice {
    if gpu >= 0 {
        burn::backend::wgpu::WgpuDevice::DiscreteGpu(gpu as usize)
    } else {
        burn::backend::wgpu::WgpuDevice::Cpu
    }
}

/// Train a fresh model on one fold's train/validation split.
/// The best checkpoint (by validation loss) lands in the fold's
/// checkpoint directory; the returned model carries the weights
/// of the epoch the loop stopped at.
pub fn run_training(
    cfg:           &TrainConfig,
    fold:          usize,
    train_dataset: SequenceDataset,
    val_dataset:   SequenceDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<ConvNet<MyBackend>> {

    // ── Build a fresh model for this fold ─────────────────────────────────────
    let model_cfg = ConvNetConfig::new(
        cfg.seq_len, cfg.alphabet_size, cfg.num_filters,
        cfg.kernel_size, cfg.hidden_dim, cfg.bottleneck_dim, cfg.dropout,
    );
    let mut model: ConvNet<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Fold {}: model ready ({} filters, kernel {})",
        fold, cfg.num_filters, cfg.kernel_size,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    // L2 regularisation is expressed as decoupled weight decay
    // on the optimiser.
    let optim_cfg = AdamConfig::new()
        .with_epsilon(1e-8)
        .with_weight_decay(Some(WeightDecayConfig::new(cfg.weight_decay)));
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher =
        SequenceBatcher::<MyBackend>::new(device.clone(), cfg.seq_len, cfg.alphabet_size);
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher =
        SequenceBatcher::<MyInnerBackend>::new(device.clone(), cfg.seq_len, cfg.alphabet_size);
    let val_loader = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    // ── Epoch-level training controls ─────────────────────────────────────────
    let mut early_stopping = EarlyStopping::new(cfg.patience, cfg.min_delta);
    let mut lr_reducer =
        ReduceLrOnPlateau::new(cfg.lr_factor, cfg.lr_patience, cfg.lr_min_delta, cfg.min_lr);
    let mut lr            = cfg.lr;
    let mut best_val_loss = f64::INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.features, batch.labels);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → ConvNet<MyInnerBackend>
        // dropout disabled, batch norm on running statistics
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let probs = model_valid.forward(batch.features);

            let bce = burn::nn::loss::BinaryCrossEntropyLossConfig::new()
                .init(&probs.device());
            let batch_loss: f64 = bce
                .forward(probs.clone(), batch.labels.clone())
                .into_scalar()
                .elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            // Threshold the probability at 0.5 for the predicted class
            let predicted = probs.greater_equal_elem(0.5).int();

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches   > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Fold {} | Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}% | lr={:e}",
            fold, epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0, lr,
        );

        let epoch_metrics = EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc, lr);
        metrics.log(&epoch_metrics)?;

        // ── Best-checkpoint saving ────────────────────────────────────────────
        if epoch_metrics.is_improvement(best_val_loss) {
            best_val_loss = avg_val_loss;
            ckpt_manager.save_best_model(&model, epoch)?;
            tracing::info!("Fold {}: new best val_loss={:.4} at epoch {}", fold, avg_val_loss, epoch);
        }

        // ── Plateau handling and early stopping ───────────────────────────────
        lr = lr_reducer.observe(avg_val_loss, lr);

        if early_stopping.observe(avg_val_loss) {
            tracing::info!(
                "Fold {}: early stopping at epoch {} (best val_loss={:.4})",
                fold, epoch, early_stopping.best_loss(),
            );
            break;
        }
    }

    tracing::info!("Fold {}: training complete (best val_loss={:.4})", fold, best_val_loss);
    Ok(model)
}
