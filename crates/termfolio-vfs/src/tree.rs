//! The filesystem tree: lookup and listing over the fixed node hierarchy.

use alloc::string::String;

use crate::error::VfsError;
use crate::path::{canonical, resolve_segments};
use crate::types::{DirNode, Node};

/// A successfully resolved path: the canonical path string plus the node
/// it names. Borrowing the node keeps resolution read-only; callers commit
/// any session updates (cwd, previous cwd) only after this exists.
#[derive(Debug, PartialEq)]
pub struct Resolved<'a> {
    /// Canonical path (`~` or `~/a/b`)
    pub path: String,
    /// The resolved node
    pub node: &'a Node,
}

/// The immutable-shape filesystem tree.
///
/// Built once at session start; nothing in the shell mutates it. The root
/// is always a directory, enforced by the constructor signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Wrap a root directory.
    pub fn new(root: DirNode) -> Self {
        Self {
            root: Node::Directory(root),
        }
    }

    /// The root node (always a directory).
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Walk a segment list from the root.
    ///
    /// Every non-final segment must name a directory child; a file child
    /// is accepted only as the final segment.
    pub fn lookup_segments(&self, segments: &[String]) -> Result<&Node, VfsError> {
        let mut current = &self.root;
        for segment in segments {
            let dir = current.as_directory().ok_or(VfsError::NotADirectory)?;
            current = dir.children.get(segment).ok_or(VfsError::NotFound)?;
        }
        Ok(current)
    }

    /// Resolve a path expression against a current directory and walk to
    /// the node it names.
    pub fn resolve(&self, expr: &str, cwd: &str) -> Result<Resolved<'_>, VfsError> {
        let segments = resolve_segments(expr, cwd);
        let node = self.lookup_segments(&segments)?;
        Ok(Resolved {
            path: canonical(&segments),
            node,
        })
    }
}
