//! Error types for the VFS layer.

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Errors from VFS operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VfsError {
    /// Path not found
    NotFound,

    /// A non-final path segment matched a file
    NotADirectory,

    /// A file operation matched a directory
    IsADirectory,

    /// Permission denied
    PermissionDenied,

    /// Invalid path format
    InvalidPath(String),

    /// Invalid permission mode string
    InvalidMode(String),
}

impl VfsError {
    /// Create an invalid path error with message.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid mode error for the offending string.
    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode(mode.into())
    }

    /// Check if this is a "not found" family error (absence or type
    /// mismatch, which the shell reports the same way).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VfsError::NotFound | VfsError::NotADirectory | VfsError::IsADirectory
        )
    }

    /// Check if this is a permission error.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, VfsError::PermissionDenied)
    }
}

impl core::fmt::Display for VfsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VfsError::NotFound => write!(f, "No such file or directory"),
            VfsError::NotADirectory => write!(f, "Not a directory"),
            VfsError::IsADirectory => write!(f, "Is a directory"),
            VfsError::PermissionDenied => write!(f, "Permission denied"),
            VfsError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            VfsError::InvalidMode(mode) => write!(f, "invalid mode: '{}'", mode),
        }
    }
}
