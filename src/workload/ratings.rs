//! Averages per-movie ratings, reporting each movie by title.
//!

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::job::{Job, MapOutput};

/// One row of the movie reference table.
#[derive(Debug, Deserialize)]
struct Movie {
    id: u64,
    name: String,
}

/// One rating record from the input.
#[derive(Debug, Deserialize)]
struct Rating {
    movie_id: u64,
    rating: f64,
}

/// Computes the mean rating per movie.
///
/// `setup` loads the JSON-lines movie table into an id-to-title map; the
/// mapper keys each rating by title, so reducers never consult the table
/// and workers only ever read it. Ratings whose id is missing from the
/// table are skipped.
pub struct MovieRatings {
    movies_path: PathBuf,
    titles: HashMap<u64, String>,
}

impl MovieRatings {
    pub fn new(movies_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            titles: HashMap::new(),
        }
    }
}

impl Job for MovieRatings {
    type Key = String;
    type Value = f64;
    type Output = f64;

    fn setup(&mut self) -> Result<()> {
        let file = File::open(&self.movies_path)
            .with_context(|| format!("cannot open movie table `{}`", self.movies_path.display()))?;
        for line in BufReader::new(file).lines() {
            let movie: Movie = serde_json::from_str(&line?)?;
            self.titles.insert(movie.id, movie.name);
        }
        Ok(())
    }

    fn map<'a>(&'a self, record: &'a str) -> MapOutput<'a, String, f64> {
        let entry: Rating = serde_json::from_str(record)?;
        match self.titles.get(&entry.movie_id) {
            Some(title) => Ok(Box::new(iter::once((title.clone(), entry.rating)))),
            None => Ok(Box::new(iter::empty())),
        }
    }

    fn reduce(&self, _key: &String, values: Vec<f64>) -> Result<f64> {
        let count = values.len().max(1);
        Ok(values.iter().sum::<f64>() / count as f64)
    }
}
