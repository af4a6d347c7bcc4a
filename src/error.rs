//! Engine error types.
//!
//! Job code reports failures as [`anyhow::Error`]; the engine wraps them
//! into the typed kinds below so callers can tell an unreadable input apart
//! from a failing stage. Any failure aborts the whole run: the engine never
//! emits partial output.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path could not be opened for reading.
    #[error("input not found: `{}`", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a record or writing a result line failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The job's `setup` hook failed; the run aborts before any mapping.
    #[error("setup failed")]
    Setup(#[source] anyhow::Error),

    /// The mapper failed on a record (sequential mode).
    #[error("mapper failed")]
    Mapper(#[source] anyhow::Error),

    /// The reducer failed for a key (sequential mode).
    #[error("reducer failed for key `{key}`")]
    Reducer {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A parallel worker failed; results from the other workers of the same
    /// run are discarded.
    #[error("worker {worker} failed during the {phase} phase")]
    Worker {
        worker: usize,
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },

    /// The job's `cleanup` hook failed after reducing completed.
    #[error("cleanup failed")]
    Cleanup(#[source] anyhow::Error),
}

/// The parallel phase a worker was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Map,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Map => write!(f, "map"),
            Phase::Reduce => write!(f, "reduce"),
        }
    }
}
