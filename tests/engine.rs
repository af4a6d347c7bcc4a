//! End-to-end runs of the engine over real input files, in both execution
//! modes and at several worker counts.

use std::fs;
use std::iter;
use std::path::PathBuf;

use mrlocal::workload::ratings::MovieRatings;
use mrlocal::workload::wc::WordCount;
use mrlocal::{engine, Error, Job, JobConfig, MapOutput, Mode, Phase};

fn write_input(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Runs the job and returns the emitted lines, sorted so assertions do not
/// depend on output order.
fn run_to_lines<J: Job + Sync>(job: &mut J, config: &JobConfig, mode: Mode) -> Vec<String> {
    let mut out = Vec::new();
    engine::run(job, config, mode, &mut out).expect("run should succeed");
    let text = String::from_utf8(out).expect("utf-8 output");
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    lines.sort();
    lines
}

#[test]
fn word_count_worked_example() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "input.txt", "the cat sat\nthe dog sat\n");
    let expected = vec!["cat\t1", "dog\t1", "sat\t2", "the\t2"];

    let sequential = run_to_lines(
        &mut WordCount::new(),
        &JobConfig::new(&input),
        Mode::Sequential,
    );
    assert_eq!(sequential, expected);

    for workers in [1, 2, 8] {
        let parallel = run_to_lines(
            &mut WordCount::new(),
            &JobConfig::new(&input).workers(workers),
            Mode::Parallel,
        );
        assert_eq!(parallel, expected, "workers={workers}");
    }
}

#[test]
fn keyed_averaging_worked_example() {
    let dir = tempfile::tempdir().expect("tempdir");
    let movies = write_input(
        &dir,
        "movies.txt",
        "{\"id\": 1, \"name\": \"a\"}\n{\"id\": 2, \"name\": \"b\"}\n",
    );
    let ratings = write_input(
        &dir,
        "ratings.txt",
        "{\"movie_id\": 1, \"rating\": 10}\n\
         {\"movie_id\": 1, \"rating\": 20}\n\
         {\"movie_id\": 2, \"rating\": 5}\n",
    );
    let expected = vec!["a\t15", "b\t5"];

    for mode in [Mode::Sequential, Mode::Parallel] {
        let lines = run_to_lines(
            &mut MovieRatings::new(&movies),
            &JobConfig::new(&ratings).workers(2),
            mode,
        );
        assert_eq!(lines, expected, "mode={mode:?}");
    }
}

#[test]
fn sequential_and_parallel_agree_on_larger_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text: String = (0..200)
        .map(|i| format!("alpha w{} w{} w{}\n", i % 7, i % 13, i % 2))
        .collect();
    let input = write_input(&dir, "input.txt", &text);

    let reference = run_to_lines(
        &mut WordCount::new(),
        &JobConfig::new(&input),
        Mode::Sequential,
    );
    assert!(reference.contains(&"alpha\t200".to_string()));

    for workers in [1, 2, 3, 8] {
        let parallel = run_to_lines(
            &mut WordCount::new(),
            &JobConfig::new(&input).workers(workers),
            Mode::Parallel,
        );
        assert_eq!(parallel, reference, "workers={workers}");
    }
}

#[test]
fn runs_are_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "input.txt", "a b a\nc b a\n");
    let config = JobConfig::new(&input).workers(3);

    let first = run_to_lines(&mut WordCount::new(), &config, Mode::Parallel);
    let second = run_to_lines(&mut WordCount::new(), &config, Mode::Parallel);
    assert_eq!(first, second);
}

/// Counts lifecycle hook invocations; maps nothing.
struct Lifecycle {
    setups: usize,
    cleanups: usize,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            setups: 0,
            cleanups: 0,
        }
    }
}

impl Job for Lifecycle {
    type Key = String;
    type Value = u64;
    type Output = u64;

    fn map<'a>(&'a self, _record: &'a str) -> MapOutput<'a, String, u64> {
        Ok(Box::new(iter::empty()))
    }

    fn reduce(&self, _key: &String, values: Vec<u64>) -> anyhow::Result<u64> {
        Ok(values.into_iter().sum())
    }

    fn setup(&mut self) -> anyhow::Result<()> {
        self.setups += 1;
        Ok(())
    }

    fn cleanup(&mut self) -> anyhow::Result<()> {
        self.cleanups += 1;
        Ok(())
    }
}

#[test]
fn empty_input_still_runs_setup_and_cleanup_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "empty.txt", "");

    for mode in [Mode::Sequential, Mode::Parallel] {
        let mut job = Lifecycle::new();
        let mut out = Vec::new();
        engine::run(&mut job, &JobConfig::new(&input), mode, &mut out)
            .expect("empty input is a successful run");
        assert!(out.is_empty(), "mode={mode:?}");
        assert_eq!(job.setups, 1, "mode={mode:?}");
        assert_eq!(job.cleanups, 1, "mode={mode:?}");
    }
}

#[test]
fn nonexistent_input_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.txt");

    for mode in [Mode::Sequential, Mode::Parallel] {
        let mut out = Vec::new();
        let err = engine::run(&mut WordCount::new(), &JobConfig::new(&missing), mode, &mut out)
            .err()
            .expect("must fail");
        assert!(matches!(err, Error::InputNotFound { .. }), "mode={mode:?}");
        assert!(out.is_empty(), "mode={mode:?}");
    }
}

/// A reducer that always fails.
struct BrokenReducer;

impl Job for BrokenReducer {
    type Key = String;
    type Value = u64;
    type Output = u64;

    fn map<'a>(&'a self, record: &'a str) -> MapOutput<'a, String, u64> {
        Ok(Box::new(
            record.split_whitespace().map(|word| (word.to_string(), 1)),
        ))
    }

    fn reduce(&self, _key: &String, _values: Vec<u64>) -> anyhow::Result<u64> {
        anyhow::bail!("reducer always fails")
    }
}

#[test]
fn failing_reducer_aborts_with_nothing_emitted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "input.txt", "a b\nc d\n");

    let mut out = Vec::new();
    let err = engine::run(
        &mut BrokenReducer,
        &JobConfig::new(&input),
        Mode::Sequential,
        &mut out,
    )
    .err()
    .expect("must fail");
    assert!(matches!(err, Error::Reducer { .. }));
    assert!(out.is_empty());

    let mut out = Vec::new();
    let err = engine::run(
        &mut BrokenReducer,
        &JobConfig::new(&input).workers(2),
        Mode::Parallel,
        &mut out,
    )
    .err()
    .expect("must fail");
    assert!(matches!(
        err,
        Error::Worker {
            phase: Phase::Reduce,
            ..
        }
    ));
    assert!(out.is_empty());
}

/// Cleanup counting for aborted runs.
struct BrokenMapper {
    cleanups: usize,
}

impl Job for BrokenMapper {
    type Key = String;
    type Value = u64;
    type Output = u64;

    fn map<'a>(&'a self, _record: &'a str) -> MapOutput<'a, String, u64> {
        anyhow::bail!("mapper always fails")
    }

    fn reduce(&self, _key: &String, values: Vec<u64>) -> anyhow::Result<u64> {
        Ok(values.into_iter().sum())
    }

    fn cleanup(&mut self) -> anyhow::Result<()> {
        self.cleanups += 1;
        Ok(())
    }
}

#[test]
fn cleanup_on_failure_is_opt_in() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "input.txt", "a b\n");

    let mut job = BrokenMapper { cleanups: 0 };
    let mut out = Vec::new();
    engine::run(&mut job, &JobConfig::new(&input), Mode::Sequential, &mut out)
        .err()
        .expect("must fail");
    assert_eq!(job.cleanups, 0);

    let mut job = BrokenMapper { cleanups: 0 };
    let mut out = Vec::new();
    engine::run(
        &mut job,
        &JobConfig::new(&input).cleanup_on_failure(true),
        Mode::Sequential,
        &mut out,
    )
    .err()
    .expect("must fail");
    assert_eq!(job.cleanups, 1);
    assert!(out.is_empty());
}
