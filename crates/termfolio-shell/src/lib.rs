//! Termfolio Shell
//!
//! The dispatcher tier of the termfolio core. One [`Shell`] owns the fixed
//! filesystem tree, the mutable session, the result history, and the
//! scripted sequencer, and exposes the whole engine to a presentation
//! layer through a handful of calls:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     presentation layer                     │
//! │        (browser shell in production, tools/repl here)      │
//! └───────┬──────────────────────┬──────────────────┬──────────┘
//!         │ execute(line, now)   │ tick(now)        │ prompt(),
//!         ▼                      ▼                  │ complete(),
//! ┌──────────────────┐   ┌──────────────────┐       │ session queries
//! │    dispatcher    │   │    sequencer     │       ▼
//! │  parse → gate →  │   │  delay-chained   │   read-only
//! │  auth → handler  │   │  step queue      │   state
//! └───┬──────────┬───┘   └──────────────────┘
//!     ▼          ▼
//!  vfs tree   session
//! ```
//!
//! `execute` is synchronous and returns the first batch of records; any
//! animated follow-up arrives through `tick`, which appends to the entry
//! the chain was scheduled from. All timestamps come in from the host -
//! nothing in this crate reads a clock.

#![no_std]
extern crate alloc;

pub mod command;
pub mod dispatch;
pub mod record;
pub mod scripts;
pub mod sequencer;
pub mod shell;
pub mod time;

// Convenient re-exports at crate root
pub use command::{Command, ParseError};
pub use record::{ListingEntry, Payload, RecordKind, ResultRecord};
pub use sequencer::{Fired, Sequencer, Step};
pub use shell::{Entry, Shell, HOST_NAME};
