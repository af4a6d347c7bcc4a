//! Sequential coordinator: one thread of control, no partitioning.

use tracing::debug;

use crate::engine::group;
use crate::error::{Error, Result};
use crate::job::{Job, JobConfig};
use crate::source::LineSource;

/// Maps, groups, and reduces the whole input on the calling thread.
///
/// Records stream straight from the line source into the mapper; the run
/// never holds the raw input in memory. Output order equals the grouping's
/// first-encounter key order, so the same input always produces the same
/// lines in the same order.
pub fn execute<J: Job>(job: &J, config: &JobConfig) -> Result<Vec<(J::Key, J::Output)>> {
    let source = LineSource::open(&config.input)?;

    let mut mapped = Vec::new();
    for record in source {
        let record = record?;
        let pairs = job.map(&record).map_err(Error::Mapper)?;
        mapped.extend(pairs);
    }
    debug!(pairs = mapped.len(), "map stage complete");

    let grouped = group(mapped);
    debug!(keys = grouped.len(), "shuffle complete");

    let mut reduced = Vec::with_capacity(grouped.len());
    for (key, values) in grouped {
        match job.reduce(&key, values) {
            Ok(value) => reduced.push((key, value)),
            Err(source) => {
                return Err(Error::Reducer {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
    Ok(reduced)
}
