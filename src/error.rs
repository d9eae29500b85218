//! Error taxonomy for the consistency-checking engine
//!
//! Every variant is fatal: the first one raised anywhere in a traversal pass
//! aborts that pass and is returned to the caller. The only non-fatal outcome
//! in the engine is the lenient-mode unreferenced-resource warning, which is
//! logged instead of raised.

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the repository checks
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    ManifestDecode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing or invalid field '{field}' in {}", path.display())]
    FieldExtraction { path: PathBuf, field: &'static str },

    #[error("{path} is not valid")]
    UnresolvedSourcePath { path: String },

    #[error("{path} does not contain a 'kustomization.yaml' file")]
    MissingKustomization { path: String },

    #[error("resource is not referenced in {}: {name}", path.display())]
    DanglingResource { path: PathBuf, name: String },

    #[error("kustomize build failed for {}: {message}", path.display())]
    BuildFailed { path: PathBuf, message: String },
}

/// Result type for check operations
pub type CheckResult<T> = Result<T, CheckError>;
