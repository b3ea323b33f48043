//! Output management module
//!
//! Workers never write single lines to the shared sink. Each worker
//! accumulates complete lines in a private [`LineBuffer`] and hands the
//! whole buffer to the [`SharedSink`] in one locked write, so output
//! from concurrent workers interleaves only at line-group boundaries,
//! never mid-line.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Buffered bytes a worker holds before pushing to the shared sink.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 1024;

/// The single shared output sink, guarded by one lock acquired only at
/// flush time.
pub struct SharedSink<W> {
    inner: Mutex<W>,
    bytes_written: AtomicU64,
}

impl<W: Write> SharedSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
            bytes_written: AtomicU64::new(0),
        }
    }

    /// Write one chunk of complete lines atomically.
    pub fn write_chunk(&self, chunk: &[u8]) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        let mut writer = self.inner.lock().unwrap();
        writer.write_all(chunk)?;
        self.bytes_written
            .fetch_add(chunk.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().unwrap().flush()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Recover the wrapped writer, e.g. to inspect test output.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap()
    }
}

/// One worker's private accumulation buffer.
///
/// Lines are flushed to the sink when the buffer grows past the
/// threshold and again when the worker's file is exhausted; a buffer
/// always holds whole lines, so no flush can tear a line.
pub struct LineBuffer<'a, W: Write> {
    sink: &'a SharedSink<W>,
    buf: String,
    threshold: usize,
    lines: u64,
}

impl<'a, W: Write> LineBuffer<'a, W> {
    pub fn new(sink: &'a SharedSink<W>, threshold: usize) -> Self {
        Self {
            sink,
            buf: String::with_capacity(threshold * 2),
            threshold,
            lines: 0,
        }
    }

    /// Append one output line (newline added here) and flush if the
    /// buffer has grown past the threshold.
    pub fn push_line(&mut self, line: &str) -> io::Result<()> {
        self.buf.push_str(line);
        self.buf.push('\n');
        self.lines += 1;
        if self.buf.len() >= self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Push whatever is buffered to the sink in one locked write.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.write_chunk(self.buf.as_bytes())?;
        self.buf.clear();
        Ok(())
    }

    pub fn lines_pushed(&self) -> u64 {
        self.lines
    }
}

impl<W: Write> Drop for LineBuffer<'_, W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lines_arrive_newline_terminated() {
        let sink = SharedSink::new(Vec::new());
        {
            let mut buf = LineBuffer::new(&sink, 1024);
            buf.push_line("cat 57").unwrap();
            buf.push_line("dog 3").unwrap();
            assert_eq!(buf.lines_pushed(), 2);
        }
        assert_eq!(sink.into_inner(), b"cat 57\ndog 3\n");
    }

    #[test]
    fn test_flush_below_threshold_only_on_drop() {
        let sink = SharedSink::new(Vec::new());
        let mut buf = LineBuffer::new(&sink, 1024);

        buf.push_line("cat 57").unwrap();
        assert_eq!(sink.bytes_written(), 0); // still buffered

        buf.flush().unwrap();
        assert_eq!(sink.bytes_written(), 7);
    }

    #[test]
    fn test_threshold_triggers_flush() {
        let sink = SharedSink::new(Vec::new());
        let mut buf = LineBuffer::new(&sink, 16);

        buf.push_line("aaaaaaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(sink.bytes_written(), 21);
    }

    #[test]
    fn test_empty_buffer_flush_writes_nothing() {
        let sink = SharedSink::new(Vec::new());
        let mut buf = LineBuffer::new(&sink, 16);

        buf.flush().unwrap();
        assert_eq!(sink.bytes_written(), 0);
    }

    #[test]
    fn test_concurrent_flushes_never_tear_lines() {
        let sink = SharedSink::new(Vec::new());

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let sink = &sink;
                scope.spawn(move || {
                    // Small threshold to force many interleaved flushes.
                    let mut buf = LineBuffer::new(sink, 64);
                    for i in 0..500 {
                        buf.push_line(&format!("worker{} line{} payload", worker, i))
                            .unwrap();
                    }
                });
            }
        });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let expected: HashSet<String> = (0..4)
            .flat_map(|w| (0..500).map(move |i| format!("worker{} line{} payload", w, i)))
            .collect();

        let got: Vec<&str> = out.lines().collect();
        assert_eq!(got.len(), 2000);
        for line in &got {
            assert!(expected.contains(*line), "torn or corrupted line: {line:?}");
        }

        // Per-worker line order survives interleaving.
        for worker in 0..4 {
            let prefix = format!("worker{} line", worker);
            let indices: Vec<usize> = got
                .iter()
                .enumerate()
                .filter(|(_, l)| l.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(indices.len(), 500);
            let lines_in_order: Vec<&str> = indices.iter().map(|&i| got[i]).collect();
            let expected_order: Vec<String> = (0..500)
                .map(|i| format!("worker{} line{} payload", worker, i))
                .collect();
            assert_eq!(lines_in_order, expected_order);
        }
    }
}
