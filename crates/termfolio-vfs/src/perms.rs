//! Permission evaluation for the VFS layer.
//!
//! Classic rwx-triplet semantics: the actor is matched to exactly one
//! column (owner, then group, then other - first match wins, never
//! additive) and the bit for the requested access kind decides.

use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::types::{AccessKind, Node, PermClass};

/// The identity a permission check runs as.
#[derive(Clone, Copy, Debug)]
pub struct ActorRef<'a> {
    /// Username
    pub name: &'a str,
    /// Group memberships
    pub groups: &'a BTreeSet<String>,
    /// Elevated privilege bypasses all checks
    pub privileged: bool,
}

/// Check whether the actor may access the node with the given kind.
///
/// Deterministic and pure in the node's mode/owner/group and the actor's
/// identity; calling it has no side effects on either.
pub fn check(node: &Node, actor: &ActorRef<'_>, kind: AccessKind) -> bool {
    if actor.privileged {
        return true;
    }

    let class = if actor.name == node.owner() {
        PermClass::Owner
    } else if actor.groups.contains(node.group()) {
        PermClass::Group
    } else {
        PermClass::Other
    };

    let allowed = node.mode().allows(class, kind);
    if !allowed {
        log::debug!(
            "permission denied: actor={} class={:?} kind={:?} mode={}",
            actor.name,
            class,
            kind,
            node.mode()
        );
    }
    allowed
}
