//! Component pass
//!
//! Walks each component root and runs the shared directory checks on every
//! directory holding a kustomization file. Files are never classified here;
//! that is the application pass's job.

use std::path::Path;

use super::Checker;
use crate::error::CheckResult;
use crate::store::{FileStore, VirtualTree};

impl Checker<'_> {
    /// Walk each component root and validate every kustomization directory
    pub fn check_components(&self, base_dir: &Path, components: &[String]) -> CheckResult<()> {
        for root in components {
            let path = base_dir.join(root);
            self.logger
                .info("checking components", &[("path", root.to_string())]);
            let tree = VirtualTree::mirror(self.store, &path)?;
            self.store.walk(&path, &mut |entry, is_dir| {
                if !is_dir {
                    return Ok(());
                }
                self.check_directory(base_dir, &tree, entry)
            })?;
        }
        Ok(())
    }
}
