// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `evaluate`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// A missing --dataset therefore prints the usage message and
// exits non-zero before any code here runs.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run nested cross-validation training on a dataset archive
    Train(TrainArgs),

    /// Score a saved checkpoint on one partition group
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// npz file with input data (arrays X, cl, partition)
    #[arg(short, long)]
    pub dataset: String,

    /// The GPU number, -1 indicates CPU
    #[arg(short, long, default_value_t = -1)]
    pub gpu: i32,

    /// Prefix of the output folder where the models are saved
    #[arg(short, long, default_value = "folder_train")]
    pub prefix: String,

    /// Number of positions per input sequence
    #[arg(long, default_value_t = 600)]
    pub seq_len: usize,

    /// Number of one-hot channels per position
    #[arg(long, default_value_t = 4)]
    pub alphabet_size: usize,

    /// Number of convolution filters
    #[arg(long, default_value_t = 128)]
    pub num_filters: usize,

    /// Width of the convolution kernel in positions
    #[arg(long, default_value_t = 10)]
    pub kernel_size: usize,

    /// Width of the first dense layer
    #[arg(long, default_value_t = 128)]
    pub hidden_dim: usize,

    /// Width of the bottleneck dense layer before the output unit
    #[arg(long, default_value_t = 2)]
    pub bottleneck_dim: usize,

    /// Dropout probability — randomly zeroes activations during
    /// training to prevent overfitting
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-4)]
    pub lr: f64,

    /// Decoupled weight decay applied by the Adam optimiser
    #[arg(long, default_value_t = 1e-4)]
    pub weight_decay: f64,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Maximum number of epochs per fold
    #[arg(long, default_value_t = 150)]
    pub epochs: usize,

    /// Early stopping: stale epochs tolerated before the fold stops
    #[arg(long, default_value_t = 15)]
    pub patience: usize,

    /// Plateau: multiplier applied to the learning rate
    #[arg(long, default_value_t = 0.1)]
    pub lr_factor: f64,

    /// Plateau: stale epochs tolerated before the rate is reduced
    #[arg(long, default_value_t = 5)]
    pub lr_patience: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types. Thresholds the
/// CLI doesn't expose (min_delta, lr_min_delta, min_lr) keep
/// their config defaults.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset:        a.dataset,
            gpu:            a.gpu,
            prefix:         a.prefix,
            seq_len:        a.seq_len,
            alphabet_size:  a.alphabet_size,
            num_filters:    a.num_filters,
            kernel_size:    a.kernel_size,
            hidden_dim:     a.hidden_dim,
            bottleneck_dim: a.bottleneck_dim,
            dropout:        a.dropout,
            lr:             a.lr,
            weight_decay:   a.weight_decay,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            patience:       a.patience,
            lr_factor:      a.lr_factor,
            lr_patience:    a.lr_patience,
            ..TrainConfig::default()
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// npz file with input data (arrays X, cl, partition)
    #[arg(short, long)]
    pub dataset: String,

    /// A fold's checkpoint directory (e.g. run_.../partition_0)
    #[arg(long)]
    pub checkpoint_dir: String,

    /// Partition group to score — defaults to the held-out test group
    #[arg(long, default_value_t = 5)]
    pub partition: usize,

    /// The GPU number, -1 indicates CPU
    #[arg(short, long, default_value_t = -1)]
    pub gpu: i32,
}
