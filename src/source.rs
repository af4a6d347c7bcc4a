//! Line-oriented input for a single run.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{Error, Result};

/// A finite, single-pass stream of input records.
///
/// Each record is one line of the input with its terminator stripped. The
/// underlying file handle is scoped to this value and released when it is
/// dropped, on every exit path.
pub struct LineSource {
    lines: Lines<BufReader<File>>,
}

impl LineSource {
    /// Opens `path` for record-by-record reading.
    ///
    /// Fails with [`Error::InputNotFound`] if the path does not exist or
    /// cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Drains the remaining records into memory.
    ///
    /// Used by the parallel engine, which needs the full record set up
    /// front to partition it into worker chunks.
    pub fn drain(self) -> Result<Vec<String>> {
        Ok(self.lines.collect::<io::Result<Vec<_>>>()?)
    }
}

impl Iterator for LineSource {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}
