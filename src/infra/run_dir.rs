// ============================================================
// Layer 6 — Run Directory
// ============================================================
// Every invocation writes into its own directory named
// {prefix}_{YYYYmmdd-HHMMSS}, e.g.
//
//   folder_train_20260807-153012/
//     train_config.json
//     partition_0/ … partition_4/
//     model_final.mpk.gz
//
// The timestamp makes run directories unique per invocation;
// if two runs race within the same second, the second
// create_dir fails and the error propagates rather than
// silently mixing two runs' outputs into one directory.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

/// The output directory of one training invocation.
pub struct RunDirectory {
    /// The created {prefix}_{timestamp} directory
    root: PathBuf,
}

impl RunDirectory {
    /// Create the timestamped run directory under `prefix`.
    /// The prefix may contain a path ("runs/experiment3"); its
    /// parent directories must already exist.
    pub fn create(prefix: &str) -> Result<Self> {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let root = PathBuf::from(format!("{prefix}_{timestamp}"));

        fs::create_dir(&root)
            .with_context(|| format!("cannot create run directory '{}'", root.display()))?;

        tracing::info!("Created run directory '{}'", root.display());
        Ok(Self { root })
    }

    /// The run directory itself
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create and return the subdirectory for one inner fold
    pub fn fold_dir(&self, fold: usize) -> Result<PathBuf> {
        let dir = self.root.join(format!("partition_{fold}"));

        fs::create_dir(&dir)
            .with_context(|| format!("cannot create fold directory '{}'", dir.display()))?;

        Ok(dir)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_uses_prefix_and_timestamp() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().join("myrun");
        let run = RunDirectory::create(prefix.to_str().unwrap()).unwrap();

        assert!(run.root().is_dir());

        let name = run.root().file_name().unwrap().to_str().unwrap();
        // myrun_YYYYmmdd-HHMMSS
        assert!(name.starts_with("myrun_"));
        assert_eq!(name.len(), "myrun_".len() + 15);
    }

    #[test]
    fn test_fold_dir_naming() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().join("run");
        let run = RunDirectory::create(prefix.to_str().unwrap()).unwrap();

        let dir = run.fold_dir(3).unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("partition_3"));
    }

    #[test]
    fn test_fold_dir_twice_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = tmp.path().join("run");
        let run = RunDirectory::create(prefix.to_str().unwrap()).unwrap();

        run.fold_dir(0).unwrap();
        assert!(run.fold_dir(0).is_err());
    }
}
