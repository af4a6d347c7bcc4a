//! Example MapReduce jobs built on the engine's [`Job`] contract.
//!
//! These are ordinary library types; each binary under `src/app/` wires one
//! of them to a [`JobConfig`] and runs it.
//!
//! [`Job`]: crate::job::Job
//! [`JobConfig`]: crate::job::JobConfig

pub mod ratings;
pub mod wc;
