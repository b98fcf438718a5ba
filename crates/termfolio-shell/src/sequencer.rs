//! The scripted sequencer: delayed multi-step output.
//!
//! A handler schedules a chain of steps, each delayed relative to the
//! completion of the previous one. The host pumps [`Sequencer::poll`] with
//! its current time; due steps fire strictly in scheduled order no matter
//! how late or bursty the polling is, because the queue is the order and
//! each step re-anchors the next one's delay. Fired steps carry the index
//! of the result-history entry they belong to, so animated output lands on
//! the command that started it rather than on whatever came after.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::record::ResultRecord;

/// One step of a chain: records to append after a relative delay.
#[derive(Clone, Debug)]
pub struct Step {
    /// Delay after the previous step completes (ms)
    pub delay_ms: u64,
    /// Records appended when the step fires
    pub records: Vec<ResultRecord>,
}

impl Step {
    /// Create a step.
    pub fn new(delay_ms: u64, records: Vec<ResultRecord>) -> Self {
        Self { delay_ms, records }
    }
}

/// A step that came due.
#[derive(Clone, Debug)]
pub struct Fired {
    /// Result-history entry the records belong to
    pub entry: usize,
    /// Records to append
    pub records: Vec<ResultRecord>,
}

#[derive(Clone, Debug)]
struct PendingStep {
    entry: usize,
    delay_ms: u64,
    records: Vec<ResultRecord>,
}

/// The step queue. Single-writer: all mutation happens through the shell
/// on the one cooperative host loop.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    queue: VecDeque<PendingStep>,
    /// Completion time of the most recently fired step (or the time the
    /// current chain was scheduled)
    anchor_ms: u64,
}

impl Sequencer {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no steps are pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue a chain of steps for the given result-history entry.
    ///
    /// A chain scheduled while another is still running queues behind it;
    /// steps never interleave across chains.
    pub fn schedule_chain(&mut self, now_ms: u64, entry: usize, steps: Vec<Step>) {
        if self.queue.is_empty() {
            self.anchor_ms = now_ms;
        }
        for step in steps {
            self.queue.push_back(PendingStep {
                entry,
                delay_ms: step.delay_ms,
                records: step.records,
            });
        }
    }

    /// When the next step comes due, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.queue
            .front()
            .map(|step| self.anchor_ms + step.delay_ms)
    }

    /// Fire every step due at `now_ms`, strictly in order. A late poll
    /// catches up: each fired step anchors the next one at its own due
    /// time, so relative spacing within a chain is preserved.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Fired> {
        let mut fired = Vec::new();
        loop {
            let due = match self.queue.front() {
                Some(step) => self.anchor_ms + step.delay_ms,
                None => break,
            };
            if now_ms < due {
                break;
            }
            self.anchor_ms = due;
            if let Some(step) = self.queue.pop_front() {
                fired.push(Fired {
                    entry: step.entry,
                    records: step.records,
                });
            }
        }
        fired
    }
}
