//! Capability interface over the backing file store
//!
//! The engine never touches a concrete storage medium directly: every check
//! runs against a [`FileStore`], so the same code serves a real repository
//! on disk ([`DiskStore`]) and an in-memory fixture ([`MemoryStore`]).

mod disk;
mod memory;
mod tree;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use tree::VirtualTree;

use std::io;
use std::path::Path;

use crate::error::{CheckError, CheckResult};

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Visitor invoked for every entry of a walk; returning an error stops the walk
pub type WalkVisitor<'a> = dyn FnMut(&Path, bool) -> CheckResult<()> + 'a;

/// Read-only access to a file tree
///
/// `walk` is depth-first pre-order in a deterministic (name-sorted) order;
/// the root directory itself is visited first. Unreadable entries abort the
/// walk with [`CheckError::StoreRead`], as does the first visitor error.
pub trait FileStore {
    /// Read the raw bytes of a file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// List a directory, sorted by entry name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Whether a file or directory exists at the path
    fn exists(&self, path: &Path) -> bool;

    /// Walk the subtree rooted at `root`, visiting every directory and file
    fn walk(&self, root: &Path, visit: &mut WalkVisitor<'_>) -> CheckResult<()>;
}

/// Depth-first walk implemented over `read_dir`, shared by the in-memory stores
pub(crate) fn walk_sorted<S: FileStore + ?Sized>(
    store: &S,
    root: &Path,
    visit: &mut WalkVisitor<'_>,
) -> CheckResult<()> {
    let entries = store.read_dir(root).map_err(|source| CheckError::StoreRead {
        path: root.to_path_buf(),
        source,
    })?;
    visit(root, true)?;
    for entry in entries {
        let path = root.join(&entry.name);
        if entry.is_dir {
            walk_sorted(store, &path, visit)?;
        } else {
            visit(&path, false)?;
        }
    }
    Ok(())
}
