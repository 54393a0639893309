//! Buffered, chunked upserts.
//!
//! Rows are produced one at a time by a transform callback and written in
//! batches of at most `batch_size`, so the writer never holds more than one
//! batch regardless of input size.

use anyhow::Result;
use tracing::trace;

use super::repository::{Integrity, Repository};
use crate::config::DEFAULT_BATCH_SIZE;

/// Outcome of streaming one source through a transform into a repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCount {
    /// Rows handed to the repository
    pub written: u64,
    /// Records the transform declined (orphans)
    pub skipped: u64,
}

/// Bounded row buffer in front of a repository
pub struct BatchWriter<'s, S, R> {
    sink: &'s mut S,
    buffer: Vec<R>,
    batch_size: usize,
    integrity: Integrity,
    flushes: u64,
}

impl<'s, S, R> BatchWriter<'s, S, R>
where
    S: Repository<R>,
{
    pub fn new(sink: &'s mut S, batch_size: usize, integrity: Integrity) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            sink,
            buffer: Vec::with_capacity(batch_size.min(DEFAULT_BATCH_SIZE)),
            batch_size,
            integrity,
            flushes: 0,
        }
    }

    /// Buffer a row, flushing once the batch is full
    pub fn push(&mut self, row: R) -> Result<()> {
        self.buffer.push(row);
        if self.buffer.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.flushes += 1;
        trace!(batch = self.flushes, rows = self.buffer.len(), "Flushing batch");
        self.sink.upsert(&self.buffer, self.integrity)?;
        self.buffer.clear();
        Ok(())
    }

    /// Flush the tail and return the number of batches written
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        Ok(self.flushes)
    }
}

/// Stream `records` through `transform` into `sink`.
///
/// A transform returning `None` marks the record as skipped. The first
/// record error or write error aborts the stream.
pub fn stream_upsert<S, I, T, R, F>(
    sink: &mut S,
    records: I,
    batch_size: usize,
    integrity: Integrity,
    mut transform: F,
    mut on_progress: impl FnMut(u64),
) -> Result<StreamCount>
where
    S: Repository<R>,
    I: IntoIterator<Item = Result<T>>,
    F: FnMut(T) -> Option<R>,
{
    let mut writer = BatchWriter::new(sink, batch_size, integrity);
    let mut count = StreamCount::default();

    for record in records {
        match transform(record?) {
            Some(row) => {
                writer.push(row)?;
                count.written += 1;
                on_progress(count.written);
            }
            None => count.skipped += 1,
        }
    }

    writer.finish()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct Recorder {
        batches: Vec<Vec<u32>>,
        modes: Vec<Integrity>,
        fail_on_batch: Option<usize>,
    }

    impl Repository<u32> for Recorder {
        fn upsert(&mut self, rows: &[u32], integrity: Integrity) -> Result<()> {
            if self.fail_on_batch == Some(self.batches.len()) {
                return Err(anyhow!("constraint violation"));
            }
            self.batches.push(rows.to_vec());
            self.modes.push(integrity);
            Ok(())
        }
    }

    fn numbers(n: u32) -> impl Iterator<Item = Result<u32>> {
        (1..=n).map(Ok)
    }

    #[test]
    fn test_batches_never_exceed_batch_size() {
        let mut sink = Recorder::default();
        let count = stream_upsert(
            &mut sink,
            numbers(2_503),
            100,
            Integrity::Enforced,
            Some,
            |_| {},
        )
        .unwrap();

        assert_eq!(count.written, 2_503);
        assert_eq!(count.skipped, 0);
        assert_eq!(sink.batches.len(), 26);
        assert!(sink.batches.iter().all(|b| b.len() <= 100));
        assert_eq!(sink.batches.last().unwrap().len(), 3);
    }

    #[test]
    fn test_skipped_records_are_counted_not_written() {
        let mut sink = Recorder::default();
        let count = stream_upsert(
            &mut sink,
            numbers(10),
            4,
            Integrity::Enforced,
            |n| (n % 2 == 0).then_some(n),
            |_| {},
        )
        .unwrap();

        assert_eq!(count, StreamCount { written: 5, skipped: 5 });
        let written: Vec<u32> = sink.batches.concat();
        assert_eq!(written, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_source_order_is_preserved() {
        let mut sink = Recorder::default();
        stream_upsert(&mut sink, numbers(7), 3, Integrity::Enforced, Some, |_| {}).unwrap();
        assert_eq!(sink.batches, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_record_error_aborts_stream() {
        let mut sink = Recorder::default();
        let records = vec![Ok(1), Ok(2), Err(anyhow!("bad line")), Ok(4)];
        let result = stream_upsert(&mut sink, records, 10, Integrity::Enforced, Some, |_| {});

        assert!(result.is_err());
        assert!(sink.batches.is_empty(), "nothing flushed before the error");
    }

    #[test]
    fn test_write_error_surfaces() {
        let mut sink = Recorder {
            fail_on_batch: Some(1),
            ..Default::default()
        };
        let result = stream_upsert(&mut sink, numbers(10), 3, Integrity::Enforced, Some, |_| {});

        assert!(result.is_err());
        assert_eq!(sink.batches.len(), 1);
    }

    #[test]
    fn test_integrity_mode_is_forwarded() {
        let mut sink = Recorder::default();
        stream_upsert(&mut sink, numbers(5), 2, Integrity::Suspended, Some, |_| {}).unwrap();
        assert!(sink.modes.iter().all(|m| *m == Integrity::Suspended));
    }

    #[test]
    fn test_huge_batch_size_only_holds_buffered_rows() {
        let mut sink = Recorder::default();
        let count = stream_upsert(
            &mut sink,
            numbers(3),
            usize::MAX / 2,
            Integrity::Enforced,
            Some,
            |_| {},
        )
        .unwrap();

        assert_eq!(count.written, 3);
        assert_eq!(sink.batches, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_empty_stream_writes_nothing() {
        let mut sink = Recorder::default();
        let count = stream_upsert(&mut sink, numbers(0), 10, Integrity::Enforced, Some, |_| {})
            .unwrap();
        assert_eq!(count, StreamCount::default());
        assert!(sink.batches.is_empty());
    }
}
