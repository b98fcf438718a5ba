//! Termfolio Session Layer
//!
//! One mutable [`Session`] exists per shell instance and carries everything
//! that changes while the filesystem tree does not:
//!
//! - **Identity**: actor name, group memberships, privilege flag
//! - **Location**: current and previous directory
//! - **History**: submitted lines plus the arrow-key cursor
//! - **Auth**: the pending privilege-escalation challenge, if any
//! - **Presentation state**: locale and the restricted/full feature gate
//!
//! Every mutation happens through a named method; handlers never reach into
//! fields. Nothing here reads a clock or generates randomness.

#![no_std]
extern crate alloc;

pub mod auth;
pub mod session;
pub mod types;

// Convenient re-exports at crate root
pub use auth::{AuthChallenge, AuthOutcome, MAX_ATTEMPTS, SUDO_SECRET};
pub use session::{Session, GUEST_ACTOR};
pub use types::FeatureLevel;
