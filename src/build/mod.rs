//! Overlay-build collaborator
//!
//! The engine treats building as a black box: a runner either succeeds or
//! fails with a message. [`KustomizeCli`] is the production runner; tests
//! substitute their own.

mod kustomize;

pub use kustomize::KustomizeCli;

use std::path::Path;

use crate::store::VirtualTree;

/// Failure reported by a build runner, carrying the collaborator's message
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BuildFailure(pub String);

/// Black-box overlay-build capability
#[cfg_attr(test, mockall::automock)]
pub trait BuildRunner {
    /// Build the directory at `path` inside the virtual tree
    fn build(&self, tree: &VirtualTree, path: &Path) -> Result<(), BuildFailure>;
}
