//! Real-filesystem store

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use super::{DirEntry, FileStore, WalkVisitor};
use crate::error::{CheckError, CheckResult};

/// [`FileStore`] backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(&self, root: &Path, visit: &mut WalkVisitor<'_>) -> CheckResult<()> {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                CheckError::StoreRead {
                    path,
                    source: err.into(),
                }
            })?;
            visit(entry.path(), entry.file_type().is_dir())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_visits_sorted_depth_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/inner.yaml"), "x: 1").unwrap();
        fs::write(dir.path().join("a.yaml"), "x: 1").unwrap();

        let store = DiskStore::new();
        let mut seen = Vec::new();
        store
            .walk(dir.path(), &mut |path, is_dir| {
                seen.push((
                    path.strip_prefix(dir.path()).unwrap().to_path_buf(),
                    is_dir,
                ));
                Ok(())
            })
            .unwrap();

        let names: Vec<String> = seen
            .iter()
            .map(|(p, _)| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["", "a.yaml", "b", "b/inner.yaml"]);
        assert!(seen[0].1);
        assert!(!seen[1].1);
    }

    #[test]
    fn test_walk_missing_root_is_store_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new();
        let err = store
            .walk(&dir.path().join("absent"), &mut |_, _| Ok(()))
            .unwrap_err();
        assert!(matches!(err, CheckError::StoreRead { .. }));
    }

    #[test]
    fn test_read_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.yaml"), "").unwrap();
        fs::write(dir.path().join("a.yaml"), "").unwrap();
        fs::create_dir(dir.path().join("m")).unwrap();

        let store = DiskStore::new();
        let entries = store.read_dir(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.yaml", "m", "z.yaml"]);
    }
}
