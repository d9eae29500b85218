//! Application pass
//!
//! Walks each application root, resolves the source path declared by every
//! Application and ApplicationSet to a real component directory, and runs
//! the shared directory checks along the way.

use std::path::Path;

use super::{Checker, Manifest, manifest};
use crate::error::{CheckError, CheckResult};
use crate::store::{FileStore, VirtualTree};

impl Checker<'_> {
    /// Walk each application root and validate every Application/ApplicationSet
    ///
    /// Roots are joined to `base_dir`. The first fatal error anywhere aborts
    /// the whole pass.
    pub fn check_applications(&self, base_dir: &Path, apps: &[String]) -> CheckResult<()> {
        for root in apps {
            let path = base_dir.join(root);
            self.logger.info(
                "checking Applications and ApplicationSets",
                &[("path", path.display().to_string())],
            );
            let tree = VirtualTree::mirror(self.store, &path)?;
            self.store.walk(&path, &mut |entry, is_dir| {
                if is_dir {
                    self.logger.debug(
                        "checking contents",
                        &[("path", entry.display().to_string())],
                    );
                    return self.check_directory(base_dir, &tree, entry);
                }
                if entry.extension().and_then(|e| e.to_str()) == Some("yaml") {
                    let data = self
                        .store
                        .read(entry)
                        .map_err(|source| CheckError::StoreRead {
                            path: entry.to_path_buf(),
                            source,
                        })?;
                    match manifest::classify(entry, &data)? {
                        Manifest::Application { source_path }
                        | Manifest::ApplicationSet { source_path } => {
                            return self.check_source_path(base_dir, &source_path);
                        }
                        Manifest::Kustomization(_) | Manifest::Unrecognized => {}
                    }
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Resolve a declared source path against the base directory
    ///
    /// The joined path must name a listable directory holding one of the
    /// recognized kustomization files.
    fn check_source_path(&self, base_dir: &Path, source_path: &str) -> CheckResult<()> {
        let resolved = base_dir.join(source_path);
        if self.store.read_dir(&resolved).is_err() {
            return Err(CheckError::UnresolvedSourcePath {
                path: source_path.to_string(),
            });
        }
        if manifest::lookup_kustomization_file(self.store, &resolved).is_none() {
            return Err(CheckError::MissingKustomization {
                path: source_path.to_string(),
            });
        }
        self.logger
            .debug("source path is valid", &[("path", source_path.to_string())]);
        Ok(())
    }
}
