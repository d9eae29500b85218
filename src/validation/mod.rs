//! Repository consistency checks
//!
//! Two passes over the repository: the application pass resolves every
//! Application/ApplicationSet source path to a real component, the component
//! pass checks every kustomization directory for resource completeness and
//! build correctness. Both are depth-first, synchronous, and abort on the
//! first fatal error.

mod apps;
mod components;
pub mod manifest;
mod resources;

pub use manifest::{Kustomization, Manifest, classify, lookup_kustomization_file};

use std::path::{Path, PathBuf};

use crate::build::BuildRunner;
use crate::error::{CheckError, CheckResult};
use crate::logging::Logger;
use crate::store::{FileStore, VirtualTree};

/// How the completeness checker treats files a manifest does not reference
///
/// A dangling resource is suspicious but not necessarily a broken
/// deployment, so warning is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnreferencedPolicy {
    /// Log a warning and keep scanning
    #[default]
    Warn,
    /// Abort the pass with [`CheckError::DanglingResource`]
    Fail,
}

/// Orchestrates the application and component passes
///
/// Holds only borrowed collaborators; every check run constructs its state
/// fresh and nothing persists across invocations.
pub struct Checker<'a> {
    store: &'a dyn FileStore,
    builder: &'a dyn BuildRunner,
    logger: &'a dyn Logger,
    policy: UnreferencedPolicy,
}

impl<'a> Checker<'a> {
    pub fn new(
        store: &'a dyn FileStore,
        builder: &'a dyn BuildRunner,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            store,
            builder,
            logger,
            policy: UnreferencedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnreferencedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Directory mechanics shared by both passes: completeness check, then
    /// build unless the directory is a base layer
    fn check_directory(
        &self,
        base_dir: &Path,
        tree: &VirtualTree,
        dir: &Path,
    ) -> CheckResult<()> {
        let Some(kpath) = lookup_kustomization_file(self.store, dir) else {
            return Ok(());
        };
        self.logger.debug(
            "found kustomization file",
            &[("path", kpath.display().to_string())],
        );
        self.check_resources(base_dir, &kpath)?;
        if dir.file_name().is_some_and(|name| name == "base") {
            // base layers lack the values only an overlay provides
            return Ok(());
        }
        self.check_build(base_dir, tree, dir)
    }

    fn check_build(&self, base_dir: &Path, tree: &VirtualTree, dir: &Path) -> CheckResult<()> {
        self.logger.debug(
            "checking kustomize build",
            &[("path", dir.display().to_string())],
        );
        self.builder
            .build(tree, dir)
            .map_err(|failure| CheckError::BuildFailed {
                path: relative_to_base(base_dir, dir),
                message: failure.to_string(),
            })
    }
}

/// A path relative to the repository base directory, for error reporting
fn relative_to_base(base_dir: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base_dir).unwrap_or(path).to_path_buf()
}
