//! The shell: one session, one tree, one result history.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use termfolio_session::{AuthOutcome, Session};
use termfolio_vfs::{portfolio_tree, Tree};

use crate::record::ResultRecord;
use crate::sequencer::Sequencer;

/// Host name shown in the prompt.
pub const HOST_NAME: &str = "folio";

/// One submitted line and everything it produced. Sequencer steps append
/// to the entry their chain was scheduled from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    /// The line as echoed (empty for suppressed secret submissions)
    pub line: String,
    /// Output records, in display order
    pub records: Vec<ResultRecord>,
}

/// The engine behind one interactive session.
pub struct Shell {
    pub(crate) tree: Tree,
    pub(crate) session: Session,
    pub(crate) sequencer: Sequencer,
    pub(crate) entries: Vec<Entry>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Create a shell over the fixed portfolio tree.
    pub fn new() -> Self {
        Self {
            tree: portfolio_tree(),
            session: Session::new(),
            sequencer: Sequencer::new(),
            entries: Vec::new(),
        }
    }

    /// Read-only session state for the presentation layer.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The filesystem tree (read-only; nothing ever mutates it).
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The result history, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The prompt: `{actor}@{host}:{cwd}$`, actor shown as `root` while
    /// privileged.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$",
            self.session.display_actor(),
            HOST_NAME,
            self.session.cwd()
        )
    }

    /// Execute one submitted line. Synchronous; returns the first batch of
    /// records (also appended to the result history). Animated follow-up
    /// arrives through [`Shell::tick`].
    ///
    /// While a secret is awaited the line is consumed by the challenge and
    /// is neither echoed nor recorded in history.
    pub fn execute(&mut self, line: &str, now_ms: u64) -> Vec<ResultRecord> {
        if self.session.challenge_active() {
            return self.handle_secret(line, now_ms);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        self.session.record_history(trimmed);
        log::debug!("execute: {}", trimmed);

        // Handlers that schedule chains target the entry about to be
        // pushed, i.e. index entries.len() at dispatch time.
        let records = self.dispatch_line(trimmed, now_ms);
        self.entries.push(Entry {
            line: String::from(trimmed),
            records: records.clone(),
        });
        records
    }

    fn handle_secret(&mut self, line: &str, now_ms: u64) -> Vec<ResultRecord> {
        let records = match self.session.submit_secret(line.trim()) {
            Some(AuthOutcome::Granted { command }) => {
                // privilege takes effect within the same user action
                self.dispatch_line(&command, now_ms)
            }
            Some(AuthOutcome::Rejected { .. }) => vec![
                ResultRecord::error("Sorry, try again."),
                ResultRecord::info(format!(
                    "[sudo] password for {}:",
                    self.session.actor()
                )),
            ],
            Some(AuthOutcome::LockedOut) => {
                vec![ResultRecord::error("sudo: 3 incorrect password attempts")]
            }
            // challenge_active() was checked by the caller
            None => Vec::new(),
        };
        self.entries.push(Entry {
            line: String::new(),
            records: records.clone(),
        });
        records
    }

    /// Fire any sequencer steps due at `now_ms`, appending their records
    /// to the entries their chains belong to. Returns whether anything
    /// changed (so a host knows to re-render).
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let fired = self.sequencer.poll(now_ms);
        if fired.is_empty() {
            return false;
        }
        for step in fired {
            match self.entries.get_mut(step.entry) {
                Some(entry) => entry.records.extend(step.records),
                None => log::warn!("sequencer step for missing entry {}", step.entry),
            }
        }
        true
    }

    /// When the next sequencer step comes due, if any; lets a host sleep
    /// exactly as long as needed.
    pub fn next_due(&self) -> Option<u64> {
        self.sequencer.next_due()
    }

    /// Ctrl-C equivalent. Clears the pending input line (the host's job)
    /// and aborts an open auth challenge; a running sequencer chain is
    /// deliberately left to finish.
    pub fn interrupt(&mut self) -> Vec<ResultRecord> {
        if self.session.abort_challenge() {
            let records = vec![ResultRecord::info("^C")];
            self.entries.push(Entry {
                line: String::new(),
                records: records.clone(),
            });
            records
        } else {
            Vec::new()
        }
    }

    /// Arrow-up: walk the history cursor back. Returns the line to place
    /// in the input buffer.
    pub fn history_prev(&mut self) -> Option<&str> {
        self.session.history_prev()
    }

    /// Arrow-down: walk the history cursor forward. `None` means the
    /// cursor walked past the newest entry and the input should clear.
    pub fn history_next(&mut self) -> Option<&str> {
        self.session.history_next()
    }

    /// Logout: reset session and history to the initial welcome state.
    /// The tree is shared, fixed, and survives.
    pub fn reset(&mut self) {
        self.session.reset();
        self.sequencer = Sequencer::new();
        self.entries.clear();
    }
}
