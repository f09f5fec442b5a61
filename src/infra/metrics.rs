// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch,
// one file per fold directory.
//
// Why log metrics to CSV?
//   - Easy to open in a spreadsheet or pandas
//   - Can plot learning curves to diagnose training issues
//   - Provides a permanent record of each fold's run
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: average binary cross-entropy on training set
//   - val_loss:   average binary cross-entropy on validation set
//   - val_acc:    fraction of validation examples classified
//                 correctly at a 0.5 threshold
//   - lr:         learning rate in effect during the epoch
//
// Output file: partition_{i}/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,val_loss,val_acc,lr
//   1,0.693100,0.689200,0.531000,1e-4
//   2,0.671400,0.664300,0.572000,1e-4
//   ...
//
// How to read the metrics:
//   - Loss should decrease each epoch (model is learning)
//   - If val_loss increases while train_loss decreases → overfitting
//   - A drop in lr marks a plateau the reducer reacted to
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average binary cross-entropy over all training batches
    /// Lower is better. Random initialisation gives ~ln(2)
    pub train_loss: f64,

    /// Average binary cross-entropy on the validation set
    /// Should track train_loss — divergence indicates overfitting
    pub val_loss: f64,

    /// Fraction of validation examples classified correctly
    /// Range: [0.0, 1.0] — 0.5 is chance level for balanced data
    pub val_acc: f64,

    /// Learning rate in effect during this epoch
    pub lr: f64,
}

impl EpochMetrics {
    /// Create a new EpochMetrics record
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64, val_acc: f64, lr: f64) -> Self {
        Self { epoch, train_loss, val_loss, val_acc, lr }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Write CSV header only if file is new
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,val_acc,lr")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:e}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.val_acc,
            m.lr,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 0.65, 0.62, 0.6, 1e-4);
        // 0.62 < 0.70 → this is an improvement
        assert!(m.is_improvement(0.70));
        // 0.62 is NOT less than 0.60 → not an improvement
        assert!(!m.is_improvement(0.60));
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(tmp.path().join("partition_0")).unwrap();

        logger.log(&EpochMetrics::new(1, 0.69, 0.68, 0.55, 1e-4)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.66, 0.65, 0.58, 1e-4)).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,val_loss,val_acc,lr");
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
    }
}
