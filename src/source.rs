//! Forward-only line cursor shared by the header classifier and the phase
//! table builder.
//!
//! Both stages pull from the same cursor, so the phase builder continues
//! exactly where the classifier stopped. Lines are yielded trimmed and
//! numbered from 1.
//!
//! Readers are decoded as UTF-8 line by line. Acquisition software often
//! writes Windows-1252 author names and project paths, so invalid bytes are
//! replaced with U+FFFD instead of failing the read.

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A trimmed line and its 1-based position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

pub struct LineCursor<'a> {
    lines: Box<dyn Iterator<Item = io::Result<String>> + 'a>,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    /// Wrap any fallible line iterator, such as `BufRead::lines()`
    pub fn new<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = io::Result<String>>,
        I::IntoIter: 'a,
    {
        Self {
            lines: Box::new(lines.into_iter()),
            consumed: 0,
        }
    }

    pub fn from_reader<R: BufRead + 'a>(mut reader: R) -> Self {
        let mut buffer = Vec::new();
        Self::new(std::iter::from_fn(move || {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => None,
                Ok(_) => Some(Ok(String::from_utf8_lossy(&buffer).into_owned())),
                Err(e) => Some(Err(e)),
            }
        }))
    }

    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.lines().map(|line| Ok(line.to_string())))
    }

    /// Pull the next line, or `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                self.consumed += 1;
                Ok(Some(Line {
                    number: self.consumed,
                    text: line.trim().to_string(),
                }))
            }
            None => Ok(None),
        }
    }

    /// Number of lines pulled so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl LineCursor<'static> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl std::fmt::Debug for LineCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineCursor")
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}
