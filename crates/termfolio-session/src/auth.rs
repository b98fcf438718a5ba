//! The privilege-escalation challenge.
//!
//! State machine: `Anonymous → AwaitingSecret → {Elevated, Anonymous}`.
//! Entering the challenge stores the requested command line verbatim; the
//! secret submission itself is never echoed or recorded. Three consecutive
//! failures clear the challenge including the pending command, so a later
//! correct secret does nothing without a fresh `sudo`.

use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// The fixed secret. A didactic simulation, not a security boundary.
pub const SUDO_SECRET: &str = "hunter2";

/// Consecutive failures before lockout.
pub const MAX_ATTEMPTS: u32 = 3;

/// A pending privilege-escalation challenge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthChallenge {
    /// The command line to run once elevation succeeds
    pub pending_command: String,
    /// Wrong secrets submitted so far
    pub attempts: u32,
}

/// Result of submitting a secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Secret matched: the session is now privileged and the stored
    /// command should be dispatched immediately.
    Granted {
        /// The originally requested command line
        command: String,
    },
    /// Secret rejected; the challenge stays open.
    Rejected {
        /// Attempts remaining before lockout
        attempts_left: u32,
    },
    /// Third failure: challenge cleared, pending command dropped.
    LockedOut,
}

impl Session {
    /// Whether a secret is currently awaited.
    pub fn challenge_active(&self) -> bool {
        self.auth.is_some()
    }

    /// Enter `AwaitingSecret`, storing the requested command line.
    /// A challenge already in flight is replaced.
    pub fn begin_challenge(&mut self, command: &str) {
        log::debug!("auth challenge opened for: {}", command);
        self.auth = Some(AuthChallenge {
            pending_command: command.to_string(),
            attempts: 0,
        });
    }

    /// Abort the challenge without consuming an attempt (interrupt).
    pub fn abort_challenge(&mut self) -> bool {
        self.auth.take().is_some()
    }

    /// Submit a secret line. Returns `None` when no challenge is pending.
    pub fn submit_secret(&mut self, secret: &str) -> Option<AuthOutcome> {
        let challenge = self.auth.as_mut()?;

        if secret == SUDO_SECRET {
            let command = challenge.pending_command.clone();
            self.auth = None;
            self.set_privileged(true);
            log::debug!("auth granted, dispatching stored command");
            return Some(AuthOutcome::Granted { command });
        }

        challenge.attempts += 1;
        if challenge.attempts >= MAX_ATTEMPTS {
            self.auth = None;
            log::debug!("auth locked out after {} attempts", MAX_ATTEMPTS);
            Some(AuthOutcome::LockedOut)
        } else {
            let attempts_left = MAX_ATTEMPTS - challenge.attempts;
            Some(AuthOutcome::Rejected { attempts_left })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_elevates_and_returns_command() {
        let mut session = Session::new();
        session.begin_challenge("cat sys/daemon.cfg");
        assert!(session.challenge_active());
        assert!(session.echo_suppressed());

        let outcome = session.submit_secret(SUDO_SECRET);
        assert_eq!(
            outcome,
            Some(AuthOutcome::Granted {
                command: String::from("cat sys/daemon.cfg")
            })
        );
        assert!(session.privileged());
        assert!(!session.challenge_active());
    }

    #[test]
    fn test_rejection_counts_down() {
        let mut session = Session::new();
        session.begin_challenge("ls sys");

        assert_eq!(
            session.submit_secret("password"),
            Some(AuthOutcome::Rejected { attempts_left: 2 })
        );
        assert_eq!(
            session.submit_secret("letmein"),
            Some(AuthOutcome::Rejected { attempts_left: 1 })
        );
        assert!(session.challenge_active());
        assert!(!session.privileged());
    }

    #[test]
    fn test_lockout_clears_pending_command() {
        let mut session = Session::new();
        session.begin_challenge("ls sys");

        session.submit_secret("a");
        session.submit_secret("b");
        assert_eq!(session.submit_secret("c"), Some(AuthOutcome::LockedOut));

        assert!(!session.challenge_active());
        // the correct secret now falls on deaf ears
        assert_eq!(session.submit_secret(SUDO_SECRET), None);
        assert!(!session.privileged());
    }

    #[test]
    fn test_abort_consumes_no_attempt() {
        let mut session = Session::new();
        session.begin_challenge("ls sys");
        assert!(session.abort_challenge());
        assert!(!session.challenge_active());
        assert!(!session.abort_challenge());
    }
}
