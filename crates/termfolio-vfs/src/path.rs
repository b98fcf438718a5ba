//! Path expression resolution for the VFS layer.
//!
//! Turns a path expression (absolute, relative, `~`-rooted, with `..`/`.`)
//! plus a current-directory context into a canonical segment list. This
//! stage is purely textual and total: walking the tree and failing on
//! missing names happens in [`crate::tree::Tree`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The root sentinel. Canonical paths render as `~` or `~/a/b`.
pub const ROOT: &str = "~";

/// Resolve a path expression against a canonical current directory into
/// the segment list below root.
///
/// - Expressions starting with `/` or `~` resolve from the root.
/// - `..` pops one segment and is a no-op at the root.
/// - `.` and empty segments (repeated separators) are discarded.
/// - `~` anywhere but the first logical segment is an ordinary name.
///
/// This never fails and never consults the tree; an expression naming a
/// nonexistent entry resolves textually and is rejected by the lookup.
pub fn resolve_segments(expr: &str, cwd: &str) -> Vec<String> {
    let (mut out, rest) = if expr == ROOT {
        (Vec::new(), "")
    } else if let Some(rest) = expr.strip_prefix("~/") {
        (Vec::new(), rest)
    } else if let Some(rest) = expr.strip_prefix('/') {
        (Vec::new(), rest)
    } else {
        (segments_of(cwd), expr)
    };

    for seg in rest.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            name => out.push(name.to_string()),
        }
    }
    out
}

/// Render a segment list as a canonical path string.
pub fn canonical(segments: &[String]) -> String {
    if segments.is_empty() {
        String::from(ROOT)
    } else {
        let mut path = String::from(ROOT);
        for seg in segments {
            path.push('/');
            path.push_str(seg);
        }
        path
    }
}

/// Split an expression at its final separator: `(directory part, last name)`.
///
/// Used by completion and by the simulated create commands, which resolve
/// the parent and treat the final component as the new name.
pub fn split_last(expr: &str) -> (Option<&str>, &str) {
    match expr.rsplit_once('/') {
        Some(("", name)) => (Some("/"), name),
        Some((parent, name)) => (Some(parent), name),
        None => (None, expr),
    }
}

/// Segments of a canonical path (`~`, `~/a/b`).
fn segments_of(cwd: &str) -> Vec<String> {
    cwd.split('/')
        .filter(|s| !s.is_empty() && *s != ROOT)
        .map(ToString::to_string)
        .collect()
}
