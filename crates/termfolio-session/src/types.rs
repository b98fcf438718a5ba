//! Vocabulary types for the session layer.

use serde::{Deserialize, Serialize};

/// Session feature gate.
///
/// Independent of the permission model: while `Restricted`, a fixed set of
/// directory names and commands is invisible and rejected exactly as if it
/// did not exist. The transition to `Full` happens once and never reverses
/// within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureLevel {
    /// Initial state: browsing only, gated names hidden
    #[default]
    Restricted,
    /// Everything visible and usable
    Full,
}

impl FeatureLevel {
    /// Check if this is the full feature set.
    pub fn is_full(&self) -> bool {
        matches!(self, FeatureLevel::Full)
    }
}
