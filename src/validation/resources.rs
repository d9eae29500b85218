//! Resource completeness checking
//!
//! Diffs a kustomization manifest's declared resources, generator file
//! sources, patches and transformers against the files actually present in
//! its directory, and reports the files nothing references.

use std::path::Path;

use super::manifest::{self, Kustomization};
use super::{Checker, UnreferencedPolicy, relative_to_base};
use crate::error::{CheckError, CheckResult};
use crate::store::FileStore;

impl Checker<'_> {
    /// Check that every file next to the manifest is referenced by it
    pub(crate) fn check_resources(&self, base_dir: &Path, kpath: &Path) -> CheckResult<()> {
        self.logger.debug(
            "checking kustomization resources",
            &[("path", kpath.display().to_string())],
        );
        let data = self
            .store
            .read(kpath)
            .map_err(|source| CheckError::StoreRead {
                path: kpath.to_path_buf(),
                source,
            })?;
        let kustomization = manifest::decode_kustomization(kpath, &data)?;

        let dir = kpath.parent().unwrap_or_else(|| Path::new(""));
        let entries = self
            .store
            .read_dir(dir)
            .map_err(|source| CheckError::StoreRead {
                path: dir.to_path_buf(),
                source,
            })?;
        let own_name = kpath.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        for entry in entries {
            let name = entry.name.as_str();
            if entry.is_dir || name.starts_with('_') {
                continue;
            }
            // the manifest itself never counts, under any of its spellings
            if name == own_name || name == "kustomization.yaml" {
                continue;
            }
            let ext = Path::new(name).extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yaml" | "yml")) {
                continue;
            }
            if is_referenced(&kustomization, name) {
                continue;
            }
            let rel = relative_to_base(base_dir, kpath);
            match self.policy {
                UnreferencedPolicy::Warn => self.logger.warn(
                    "resource is not referenced",
                    &[
                        ("path", rel.display().to_string()),
                        ("resource", name.to_string()),
                    ],
                ),
                UnreferencedPolicy::Fail => {
                    return Err(CheckError::DanglingResource {
                        path: rel,
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Whether any declared entry of the manifest accounts for the file name
fn is_referenced(kustomization: &Kustomization, name: &str) -> bool {
    if kustomization
        .resources
        .iter()
        .any(|entry| file_entry_matches(entry, name))
    {
        return true;
    }
    let mut generator_files = kustomization
        .config_map_generator
        .iter()
        .chain(&kustomization.secret_generator)
        .flat_map(|generator| &generator.files);
    if generator_files.any(|source| file_source_matches(source, name)) {
        return true;
    }
    if kustomization
        .patches_strategic_merge
        .iter()
        .any(|entry| file_entry_matches(entry, name))
    {
        return true;
    }
    if kustomization
        .patches
        .iter()
        .filter_map(|patch| patch.path.as_deref())
        .any(|entry| file_entry_matches(entry, name))
    {
        return true;
    }
    kustomization
        .transformers
        .iter()
        .any(|entry| file_entry_matches(entry, name))
}

/// Plain list entries match by file name; entries naming directories,
/// parent-relative paths or remote refs never match a sibling file
fn file_entry_matches(entry: &str, name: &str) -> bool {
    let cleaned = entry.strip_prefix("./").unwrap_or(entry);
    if cleaned.contains("://") || cleaned.contains('/') {
        return false;
    }
    cleaned == name
}

/// Generator file sources match whole, or by the suffix after the last `=`
/// (the `alias=file` form)
fn file_source_matches(source: &str, name: &str) -> bool {
    match source.rfind('=') {
        Some(idx) if idx > 0 => &source[idx + 1..] == name,
        _ => source == name,
    }
}
