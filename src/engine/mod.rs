//! The execution engine: shared shuffle logic and the two coordinators.

pub mod chunk;
pub mod parallel;
pub mod sequential;

use std::hash::Hash;
use std::io::Write;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::emitter;
use crate::error::{Error, Result};
use crate::job::{Job, JobConfig};

/// Which coordinator drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Single thread of control, fully deterministic output order.
    Sequential,
    /// Map and reduce work fanned across a fixed pool of worker threads.
    Parallel,
}

/// Runs `job` over the configured input and writes results to `out`.
///
/// Lifecycle: `setup`, mapping, grouping, reducing, `cleanup`, emission.
/// A failure in any stage aborts the run with nothing emitted; `cleanup`
/// still runs on such an abort only when the config asks for it.
pub fn run<J, W>(job: &mut J, config: &JobConfig, mode: Mode, out: &mut W) -> Result<()>
where
    J: Job + Sync,
    W: Write,
{
    job.setup().map_err(Error::Setup)?;

    let outcome = match mode {
        Mode::Sequential => sequential::execute(&*job, config),
        Mode::Parallel => parallel::execute(&*job, config),
    };
    let reduced = match outcome {
        Ok(reduced) => reduced,
        Err(err) => {
            if config.cleanup_on_failure {
                if let Err(cleanup_err) = job.cleanup() {
                    warn!("cleanup after aborted run failed: {cleanup_err:#}");
                }
            }
            return Err(err);
        }
    };

    job.cleanup().map_err(Error::Cleanup)?;
    info!(keys = reduced.len(), "run complete");
    emitter::emit(out, &reduced)
}

/// The shuffle stage: groups mapped pairs into an append-only multimap.
///
/// The first encounter of a key creates its value list, later encounters
/// append. The key set and each key's value multiset depend only on the
/// multiset of input pairs; value order within a key follows encounter
/// order, and key order follows first-encounter order.
pub fn group<K, V>(pairs: Vec<(K, V)>) -> IndexMap<K, Vec<V>>
where
    K: Eq + Hash,
{
    let mut grouped: IndexMap<K, Vec<V>> = IndexMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}
