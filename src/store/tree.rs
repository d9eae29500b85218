//! Isolated mirror of a store subtree
//!
//! The build collaborator runs against a [`VirtualTree`] instead of the
//! backing store, so builds can never touch the real repository. Directory
//! structure is preserved exactly: overlays resolve relative references such
//! as `../base` against it.

use std::io;
use std::path::{Path, PathBuf};

use super::{DirEntry, FileStore, MemoryStore, WalkVisitor};
use crate::error::{CheckError, CheckResult};

/// In-memory copy of every directory and file under one root
#[derive(Debug, Clone)]
pub struct VirtualTree {
    root: PathBuf,
    store: MemoryStore,
}

impl VirtualTree {
    /// Mirror the subtree rooted at `root` out of the backing store
    ///
    /// Fails on the first unreadable entry; a partial tree is never returned.
    pub fn mirror(store: &dyn FileStore, root: &Path) -> CheckResult<Self> {
        let mut mirrored = MemoryStore::new();
        store.walk(root, &mut |path, is_dir| {
            if is_dir {
                mirrored.add_dir(path);
            } else {
                let data = store.read(path).map_err(|source| CheckError::StoreRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                mirrored.add_file(path, data);
            }
            Ok(())
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            store: mirrored,
        })
    }

    /// The root the tree was mirrored from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every directory in the tree, sorted, root first
    pub fn dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        // walk over a complete mirror cannot fail
        let _ = self.store.walk(&self.root, &mut |path, is_dir| {
            if is_dir {
                dirs.push(path.to_path_buf());
            }
            Ok(())
        });
        dirs
    }

    /// Every file in the tree with its contents, sorted by path
    pub fn files(&self) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files = Vec::new();
        let _ = self.store.walk(&self.root, &mut |path, is_dir| {
            if !is_dir {
                if let Ok(data) = self.store.read(path) {
                    files.push((path.to_path_buf(), data));
                }
            }
            Ok(())
        });
        files
    }
}

impl FileStore for VirtualTree {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.store.read(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.store.read_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.store.exists(path)
    }

    fn walk(&self, root: &Path, visit: &mut WalkVisitor<'_>) -> CheckResult<()> {
        self.store.walk(root, visit)
    }
}
