//! A MapReduce-compatible implementation of word count.
//!

use anyhow::Result;
use regex::Regex;

use crate::job::{Job, MapOutput};

/// Counts occurrences of each word in the input.
///
/// A word is a run of word characters or apostrophes, so contractions like
/// `don't` count as one word.
pub struct WordCount {
    word: Regex,
}

impl WordCount {
    pub fn new() -> Self {
        Self {
            word: Regex::new(r"[\w']+").expect("static word pattern"),
        }
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self::new()
    }
}

impl Job for WordCount {
    type Key = String;
    type Value = u64;
    type Output = u64;

    fn map<'a>(&'a self, record: &'a str) -> MapOutput<'a, String, u64> {
        Ok(Box::new(
            self.word
                .find_iter(record)
                .map(|word| (word.as_str().to_string(), 1)),
        ))
    }

    fn reduce(&self, _key: &String, values: Vec<u64>) -> Result<u64> {
        Ok(values.into_iter().sum())
    }
}
