use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::PathBuf;

/// Sequential access to named line-delimited record files.
///
/// Every call to [`RecordSource::records`] starts again from the first line.
pub trait RecordSource {
    type Reader: BufRead;

    fn open(&self, name: &str) -> Result<Self::Reader>;

    fn records<T: DeserializeOwned>(&self, name: &str) -> Result<RecordStream<Self::Reader, T>> {
        let reader = self.open(name)?;
        Ok(RecordStream::new(name, reader))
    }
}

/// JSONL files in one directory
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RecordSource for DirSource {
    type Reader = BufReader<File>;

    fn open(&self, name: &str) -> Result<Self::Reader> {
        let path = self.dir.join(name);
        let file = File::open(&path).with_context(|| format!("Failed to open: {:?}", path))?;
        Ok(BufReader::new(file))
    }
}

/// Forward-only decoder yielding one record per non-blank line.
///
/// Decoding stops at the first unreadable or malformed line; that error is
/// yielded once and the stream is then exhausted.
pub struct RecordStream<B, T> {
    name: String,
    lines: Lines<B>,
    line_no: usize,
    failed: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<B: BufRead, T: DeserializeOwned> RecordStream<B, T> {
    pub fn new(name: impl Into<String>, reader: B) -> Self {
        Self {
            name: name.into(),
            lines: reader.lines(),
            line_no: 0,
            failed: false,
            _marker: PhantomData,
        }
    }
}

impl<B: BufRead, T: DeserializeOwned> Iterator for RecordStream<B, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err::<T, _>(e).with_context(|| {
                        format!("Failed to read line {} of {}", self.line_no, self.name)
                    }));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let parsed = serde_json::from_str(trimmed).with_context(|| {
                format!("Failed to parse record at line {} of {}", self.line_no, self.name)
            });
            if parsed.is_err() {
                self.failed = true;
            }
            return Some(parsed);
        }
    }
}
