//! Termfolio Virtual Filesystem
//!
//! The VFS layer provides the in-memory filesystem the shell runs against:
//!
//! - **Types**: Node, Mode, LocalizedLines for filesystem metadata and content
//! - **Path**: Path expression resolution against a current directory
//! - **Perms**: Owner/group/other rwx permission evaluation
//! - **Tree**: The immutable-shape node tree with lookup and listing
//! - **Bootstrap**: The fixed portfolio tree built at session start
//!
//! # Design Principles
//!
//! 1. **Fixed shape**: The tree is built once at startup and never resized.
//!    Mutation-style commands at the shell layer validate and report without
//!    touching the structure.
//! 2. **Total resolution**: Resolving a path always terminates and never
//!    mutates caller state; callers commit directory changes only after a
//!    successful resolve.
//! 3. **Locale-variant leaves**: File content carries one line set per
//!    supported locale; selection happens at read time.
//! 4. **No clocks**: Timestamps are fixed metadata; nothing in this crate
//!    reads time.

#![no_std]
extern crate alloc;

pub mod bootstrap;
pub mod error;
pub mod path;
pub mod perms;
pub mod tree;
pub mod types;

// Convenient re-exports at crate root
pub use bootstrap::portfolio_tree;
pub use error::VfsError;
pub use path::{canonical, resolve_segments, split_last, ROOT};
pub use perms::{check, ActorRef};
pub use tree::{Resolved, Tree};
pub use types::{AccessKind, DirNode, FileNode, Locale, LocalizedLines, Mode, Node, PermClass};
