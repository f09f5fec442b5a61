// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - NpzArchiveLoader implements ExampleSource
//   - A future Hdf5Loader could also implement ExampleSource
//   - The application layer only sees ExampleSource
//     and works with both without any changes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::example::SequenceExample;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can load the full set of labelled examples
/// (features + label + fold id) from a dataset archive.
///
/// Implementations:
///   - NpzArchiveLoader → loads from a compressed .npz archive
pub trait ExampleSource {
    /// Load every example in the archive.
    /// Returns an error if the archive is missing, malformed,
    /// or violates the shared-leading-dimension invariant.
    fn load_all(&self) -> Result<Vec<SequenceExample>>;
}
