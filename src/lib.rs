//! A single-machine batch MapReduce engine.
//!
//! Jobs implement the [`Job`] contract: a mapper turning one input record
//! into zero or more key-value pairs, and a reducer folding all values for
//! one key into a single output value. The engine drives a job over a
//! line-oriented input file, groups mapped pairs by key, reduces each group,
//! and writes tab-separated results to an output stream.
//!
//! Two interchangeable execution strategies are provided: a strictly
//! sequential one, and a parallel one that fans map and reduce work across
//! a fixed pool of worker threads. Both produce the same result set; only
//! line order may differ.
//!
//! # Example
//!
//! ```no_run
//! use mrlocal::workload::wc::WordCount;
//! use mrlocal::{engine, JobConfig, Mode};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = JobConfig::new("if-kipling.txt").workers(8);
//! let mut job = WordCount::new();
//! engine::run(&mut job, &config, Mode::Parallel, &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod emitter;
pub mod engine;
pub mod error;
pub mod job;
pub mod source;
pub mod workload;

pub use engine::Mode;
pub use error::{Error, Phase, Result};
pub use job::{Job, JobConfig, MapOutput, DEFAULT_WORKERS};
