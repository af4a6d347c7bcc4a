//! Parallel coordinator: fans map and reduce work across a fixed pool of
//! worker threads.
//!
//! Each phase partitions its work units into contiguous chunks, one per
//! worker, and collects chunk results over a channel in completion order.
//! Leaving the thread scope joins every worker, so a phase only ends once
//! all of its workers have returned: a full barrier. The shuffle runs on
//! the coordinator thread between the two phases and never sees a partial
//! map result.
//!
//! Workers share only the job itself, by immutable reference, and their own
//! chunk. They never communicate with each other.

use std::thread;

use anyhow::Context;
use crossbeam_channel::Receiver;
use tracing::debug;

use crate::engine::{chunk, group};
use crate::error::{Error, Phase, Result};
use crate::job::{Job, JobConfig};
use crate::source::LineSource;

/// Runs the map and reduce phases of one job across `config.workers`
/// threads.
pub fn execute<J>(job: &J, config: &JobConfig) -> Result<Vec<(J::Key, J::Output)>>
where
    J: Job + Sync,
{
    let records = LineSource::open(&config.input)?.drain()?;
    let mapped = map_phase(job, records, config.workers)?;

    // Barrier: every map result is in hand before any reduce work exists.
    let grouped = group(mapped);
    let entries: Vec<_> = grouped.into_iter().collect();

    reduce_phase(job, entries, config.workers)
}

fn map_phase<J>(job: &J, records: Vec<String>, workers: usize) -> Result<Vec<(J::Key, J::Value)>>
where
    J: Job + Sync,
{
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let total = records.len();
    let chunks = chunk::partition(records, workers);
    debug!(records = total, workers = chunks.len(), "dispatching map phase");

    let (tx, rx) = crossbeam_channel::unbounded();
    thread::scope(|scope| {
        for (worker, records) in chunks.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                // The receiver outlives every worker, so send cannot fail.
                let _ = tx.send((worker, map_chunk(job, records)));
            });
        }
        drop(tx);
        collect(&rx, Phase::Map)
    })
}

fn map_chunk<J: Job>(job: &J, records: &[String]) -> anyhow::Result<Vec<(J::Key, J::Value)>> {
    let mut mapped = Vec::new();
    for record in records {
        mapped.extend(job.map(record)?);
    }
    Ok(mapped)
}

fn reduce_phase<J>(
    job: &J,
    entries: Vec<(J::Key, Vec<J::Value>)>,
    workers: usize,
) -> Result<Vec<(J::Key, J::Output)>>
where
    J: Job + Sync,
{
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    let total = entries.len();
    let chunks = chunk::partition(entries, workers);
    debug!(keys = total, workers = chunks.len(), "dispatching reduce phase");

    let (tx, rx) = crossbeam_channel::unbounded();
    thread::scope(|scope| {
        for (worker, entries) in chunks.into_iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send((worker, reduce_chunk(job, entries)));
            });
        }
        drop(tx);
        collect(&rx, Phase::Reduce)
    })
}

fn reduce_chunk<J: Job>(
    job: &J,
    entries: Vec<(J::Key, Vec<J::Value>)>,
) -> anyhow::Result<Vec<(J::Key, J::Output)>> {
    let mut reduced = Vec::with_capacity(entries.len());
    for (key, values) in entries {
        let value = job
            .reduce(&key, values)
            .with_context(|| format!("reducer failed for key `{key}`"))?;
        reduced.push((key, value));
    }
    Ok(reduced)
}

/// Concatenates chunk results in worker-completion order.
///
/// Drains the channel until every worker has reported, then either returns
/// the combined results or the first failure observed. Partial results from
/// the other workers of a failed phase are dropped here.
fn collect<T>(rx: &Receiver<(usize, anyhow::Result<Vec<T>>)>, phase: Phase) -> Result<Vec<T>> {
    let mut collected = Vec::new();
    let mut failure = None;
    for (worker, result) in rx.iter() {
        match result {
            Ok(mut part) => collected.append(&mut part),
            Err(source) => {
                if failure.is_none() {
                    failure = Some(Error::Worker {
                        worker,
                        phase,
                        source,
                    });
                }
            }
        }
    }
    match failure {
        Some(err) => Err(err),
        None => Ok(collected),
    }
}
