//! The contract a concrete MapReduce job implements, and per-run
//! configuration.

use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;

/// Worker count used when the caller does not pick one.
pub const DEFAULT_WORKERS: usize = 4;

/// The output of one mapper invocation.
///
/// The outer [`anyhow::Result`] accounts for errors that arise while
/// creating the iterator (e.g. a record that fails to parse). The iterator
/// itself lazily yields the pairs mapped from a single record; it may
/// borrow both the job and the record it was produced from.
pub type MapOutput<'a, K, V> = anyhow::Result<Box<dyn Iterator<Item = (K, V)> + 'a>>;

/// A batch MapReduce job.
///
/// The engine calls `setup` once, maps every input record, groups the
/// mapped pairs by key, calls `reduce` once per distinct key, and calls
/// `cleanup` once. Jobs run by the parallel engine must be `Sync`: workers
/// share the job by immutable reference, so any state populated by `setup`
/// is read-only for the rest of the run.
pub trait Job {
    type Key: Eq + Hash + Display + Send;
    type Value: Send;
    type Output: Display + Send;

    /// Maps one input record to zero or more key-value pairs.
    ///
    /// A job may skip records it considers malformed by returning an empty
    /// iterator; returning an error aborts the whole run.
    fn map<'a>(&'a self, record: &'a str) -> MapOutput<'a, Self::Key, Self::Value>;

    /// Folds all values collected for `key` into a single output value.
    ///
    /// Called exactly once per distinct key, with the key's complete value
    /// collection. Must not depend on which worker runs it or in which
    /// order keys are reduced.
    fn reduce(&self, key: &Self::Key, values: Vec<Self::Value>) -> anyhow::Result<Self::Output>;

    /// Runs once, single-threaded, before any record is mapped.
    fn setup(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs once, single-threaded, after all reducing completes.
    fn cleanup(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Configuration for one run of a job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Path to the line-oriented input file.
    pub input: PathBuf,
    /// Size of the worker pool; ignored by the sequential engine.
    pub workers: usize,
    /// Whether `cleanup` still runs when a stage fails. Off by default:
    /// an aborted run then leaves the job exactly as the failure found it.
    pub cleanup_on_failure: bool,
}

impl JobConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            workers: DEFAULT_WORKERS,
            cleanup_on_failure: false,
        }
    }

    /// Sets the worker pool size, clamped to at least one worker.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn cleanup_on_failure(mut self, enabled: bool) -> Self {
        self.cleanup_on_failure = enabled;
        self
    }
}
