//! The single mutable session.
//!
//! # Invariants
//!
//! - `cwd` always names a resolvable directory; callers commit a new value
//!   only after resolution succeeded (`set_cwd` trusts its input).
//! - `history` is append-only and never contains a secret line.
//! - `auth` is `Some` exactly while a privilege-escalation secret is
//!   awaited; while it is, `echo_suppressed()` is true.
//! - `feature_level` moves Restricted→Full at most once.

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use termfolio_vfs::bootstrap::VISITOR_GROUP;
use termfolio_vfs::{ActorRef, Locale, ROOT};

use crate::auth::AuthChallenge;
use crate::types::FeatureLevel;

/// The visiting actor every session starts as.
pub const GUEST_ACTOR: &str = "guest";

/// Session state for one interactive shell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Actor username
    actor: String,

    /// Actor group memberships
    groups: BTreeSet<String>,

    /// Elevated privilege (set by the auth flow, bypasses permissions)
    privileged: bool,

    /// Current directory (canonical, always a directory)
    cwd: String,

    /// Directory before the last `cd`, for `cd -`
    previous_cwd: Option<String>,

    /// Submitted command lines, append-only
    history: Vec<String>,

    /// Arrow-key position within `history`; `None` = not navigating
    history_cursor: Option<usize>,

    /// Pending privilege-escalation challenge
    pub(crate) auth: Option<AuthChallenge>,

    /// Restricted/full feature gate
    feature_level: FeatureLevel,

    /// Content locale for `cat` and friends
    locale: Locale,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create the initial session: guest actor at the root, restricted.
    pub fn new() -> Self {
        let mut groups = BTreeSet::new();
        groups.insert(String::from(GUEST_ACTOR));
        groups.insert(String::from(VISITOR_GROUP));
        Self {
            actor: String::from(GUEST_ACTOR),
            groups,
            privileged: false,
            cwd: String::from(ROOT),
            previous_cwd: None,
            history: Vec::new(),
            history_cursor: None,
            auth: None,
            feature_level: FeatureLevel::Restricted,
            locale: Locale::En,
        }
    }

    /// Reset to the initial welcome state (logout). The tree is untouched.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ========== Identity ==========

    /// Base actor name (unchanged by elevation).
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Name shown by `whoami` and the prompt: `root` while privileged.
    pub fn display_actor(&self) -> &str {
        if self.privileged {
            "root"
        } else {
            &self.actor
        }
    }

    /// Group memberships.
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Whether the session is elevated.
    pub fn privileged(&self) -> bool {
        self.privileged
    }

    pub(crate) fn set_privileged(&mut self, privileged: bool) {
        self.privileged = privileged;
    }

    /// The identity permission checks run as.
    pub fn actor_ref(&self) -> ActorRef<'_> {
        ActorRef {
            name: &self.actor,
            groups: &self.groups,
            privileged: self.privileged,
        }
    }

    // ========== Location ==========

    /// Current directory (canonical).
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Directory before the last `cd`.
    pub fn previous_cwd(&self) -> Option<&str> {
        self.previous_cwd.as_deref()
    }

    /// Commit a directory change. The caller has already resolved `path`
    /// to a directory.
    pub fn set_cwd(&mut self, path: impl Into<String>) {
        let path = path.into();
        if path != self.cwd {
            self.previous_cwd = Some(core::mem::replace(&mut self.cwd, path));
        }
    }

    /// Swap current and previous directory (`cd -`). Returns the new
    /// current directory, or `None` when there is no previous one.
    pub fn swap_cwd(&mut self) -> Option<&str> {
        let previous = self.previous_cwd.take()?;
        self.previous_cwd = Some(core::mem::replace(&mut self.cwd, previous));
        Some(&self.cwd)
    }

    // ========== History ==========

    /// Append a submitted line and reset the navigation cursor.
    pub fn record_history(&mut self, line: &str) {
        self.history.push(line.to_string());
        self.history_cursor = None;
    }

    /// All submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Move the cursor one entry back (arrow-up). Returns the line now
    /// under the cursor.
    pub fn history_prev(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let next = match self.history_cursor {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_cursor = Some(next);
        self.history.get(next).map(String::as_str)
    }

    /// Move the cursor one entry forward (arrow-down). Walking past the
    /// newest entry clears the cursor and returns `None` (empty input).
    pub fn history_next(&mut self) -> Option<&str> {
        let i = self.history_cursor?;
        if i + 1 < self.history.len() {
            self.history_cursor = Some(i + 1);
            self.history.get(i + 1).map(String::as_str)
        } else {
            self.history_cursor = None;
            None
        }
    }

    // ========== Presentation state ==========

    /// Content locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch the content locale. Pure session state; the tree is shared.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Feature gate level.
    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    /// Flip Restricted→Full. Returns `true` on the transition, `false`
    /// when already full (the gate never re-locks).
    pub fn unlock_features(&mut self) -> bool {
        if self.feature_level.is_full() {
            false
        } else {
            self.feature_level = FeatureLevel::Full;
            log::debug!("feature gate unlocked");
            true
        }
    }

    /// Whether the next submitted line must not be echoed or recorded
    /// (a secret is being awaited).
    pub fn echo_suppressed(&self) -> bool {
        self.auth.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.actor(), "guest");
        assert_eq!(session.display_actor(), "guest");
        assert_eq!(session.cwd(), "~");
        assert!(session.previous_cwd().is_none());
        assert!(!session.privileged());
        assert_eq!(session.feature_level(), FeatureLevel::Restricted);
        assert_eq!(session.locale(), Locale::En);
        assert!(!session.echo_suppressed());
    }

    #[test]
    fn test_cwd_swap_roundtrip() {
        let mut session = Session::new();
        session.set_cwd("~/about");
        session.set_cwd("~/skills");
        assert_eq!(session.swap_cwd(), Some("~/about"));
        assert_eq!(session.cwd(), "~/about");
        assert_eq!(session.swap_cwd(), Some("~/skills"));
        assert_eq!(session.cwd(), "~/skills");
    }

    #[test]
    fn test_swap_without_previous() {
        let mut session = Session::new();
        assert_eq!(session.swap_cwd(), None);
        assert_eq!(session.cwd(), "~");
    }

    #[test]
    fn test_history_cursor_walk() {
        let mut session = Session::new();
        session.record_history("ls");
        session.record_history("cd about");
        session.record_history("cat bio.txt");

        assert_eq!(session.history_prev(), Some("cat bio.txt"));
        assert_eq!(session.history_prev(), Some("cd about"));
        assert_eq!(session.history_prev(), Some("ls"));
        // pinned at the oldest entry
        assert_eq!(session.history_prev(), Some("ls"));

        assert_eq!(session.history_next(), Some("cd about"));
        assert_eq!(session.history_next(), Some("cat bio.txt"));
        // walking past the newest clears the cursor
        assert_eq!(session.history_next(), None);
        assert_eq!(session.history_next(), None);
    }

    #[test]
    fn test_new_entry_resets_cursor() {
        let mut session = Session::new();
        session.record_history("ls");
        assert_eq!(session.history_prev(), Some("ls"));
        session.record_history("pwd");
        assert_eq!(session.history_prev(), Some("pwd"));
    }

    #[test]
    fn test_unlock_is_one_way_and_idempotent() {
        let mut session = Session::new();
        assert!(session.unlock_features());
        assert!(!session.unlock_features());
        assert_eq!(session.feature_level(), FeatureLevel::Full);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = Session::new();
        session.set_cwd("~/about");
        session.record_history("ls");
        session.set_locale(Locale::Zh);
        session.unlock_features();
        session.set_privileged(true);

        session.reset();
        assert_eq!(session.cwd(), "~");
        assert!(session.history().is_empty());
        assert_eq!(session.locale(), Locale::En);
        assert_eq!(session.feature_level(), FeatureLevel::Restricted);
        assert!(!session.privileged());
    }
}
