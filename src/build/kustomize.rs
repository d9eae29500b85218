//! Build runner shelling out to the kustomize binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use super::{BuildFailure, BuildRunner};
use crate::store::VirtualTree;

/// Runs `kustomize build` against a staged copy of the virtual tree
///
/// The tree is materialized under a temporary directory with its structure
/// preserved relative to the tree root, so overlays referencing `../base`
/// build exactly as they would in the repository.
#[derive(Debug, Clone)]
pub struct KustomizeCli {
    binary: PathBuf,
}

impl KustomizeCli {
    /// Locate the kustomize binary on PATH
    pub fn discover() -> Result<Self> {
        let binary = which::which("kustomize").context("kustomize binary not found on PATH")?;
        tracing::debug!("using kustomize binary at {}", binary.display());
        Ok(Self { binary })
    }

    /// Use an explicit kustomize binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn stage(&self, tree: &VirtualTree, staging: &Path) -> Result<(), BuildFailure> {
        for dir in tree.dirs() {
            let target = map_into(tree.root(), &dir, staging)?;
            fs::create_dir_all(&target).map_err(|err| {
                BuildFailure(format!("failed to stage {}: {err}", target.display()))
            })?;
        }
        for (file, data) in tree.files() {
            let target = map_into(tree.root(), &file, staging)?;
            fs::write(&target, data).map_err(|err| {
                BuildFailure(format!("failed to stage {}: {err}", target.display()))
            })?;
        }
        Ok(())
    }
}

/// Map a tree path onto the staging directory
fn map_into(root: &Path, path: &Path, staging: &Path) -> Result<PathBuf, BuildFailure> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| BuildFailure(format!("{} is outside the build tree", path.display())))?;
    Ok(staging.join(rel))
}

impl BuildRunner for KustomizeCli {
    fn build(&self, tree: &VirtualTree, path: &Path) -> Result<(), BuildFailure> {
        let staging = tempfile::tempdir()
            .map_err(|err| BuildFailure(format!("failed to create staging directory: {err}")))?;
        self.stage(tree, staging.path())?;

        let target = map_into(tree.root(), path, staging.path())?;
        let output = Command::new(&self.binary)
            .arg("build")
            .arg(&target)
            .output()
            .map_err(|err| {
                BuildFailure(format!("failed to run {}: {err}", self.binary.display()))
            })?;
        if !output.status.success() {
            return Err(BuildFailure(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }
}
