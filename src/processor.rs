//! Core processing engine
//!
//! [`LineProcessor`] drives one input line through the filter chain and
//! assembles the projected output line. [`Scanner`] fans the numbered
//! corpus files out over a fixed-size rayon pool, one file per task,
//! and funnels accepted lines into the shared sink.

use crate::chain::FilterChain;
use crate::corpus::CorpusDescriptor;
use crate::output::{LineBuffer, SharedSink, DEFAULT_FLUSH_THRESHOLD};
use crate::progress::{create_files_progress_bar, ScanStats};
use crate::source::open_lines;

use rayon::prelude::*;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Tokenizes lines and runs them through a [`FilterChain`].
pub struct LineProcessor<'a> {
    chain: &'a FilterChain,
}

impl<'a> LineProcessor<'a> {
    pub fn new(chain: &'a FilterChain) -> Self {
        Self { chain }
    }

    /// Evaluate one line. Returns the output line (without trailing
    /// newline) or `None` when the line is rejected: blank, shorter
    /// than the chain, or refused by any filter. Rejection is silent
    /// and short-circuits at the first refusing position.
    pub fn process_line(&self, line: &str) -> Option<String> {
        let mut tokens = line.split_whitespace();
        let mut current = tokens.next()?;

        // Output tokens collect into a growable buffer; trailing fields
        // can be arbitrarily many.
        let mut selected: Vec<&str> = Vec::with_capacity(self.chain.len() + 1);

        for (i, stage) in self.chain.stages().iter().enumerate() {
            let kept = stage.filter.want(current)?;
            if stage.emit {
                selected.push(kept);
            }
            if i + 1 < self.chain.len() {
                current = tokens.next()?;
            }
        }

        // Everything past the chain (frequency counts and any further
        // fields) passes through unfiltered.
        selected.extend(tokens);

        Some(selected.join(" "))
    }
}

/// Scanner configuration beyond the chain itself.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-worker buffer size before a locked flush to the sink.
    pub flush_threshold: usize,
    /// Suppress the progress bar.
    pub quiet: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            quiet: true,
        }
    }
}

/// Parallel scanner over one corpus file set.
pub struct Scanner {
    chain: FilterChain,
    config: ScanConfig,
    stats: Arc<ScanStats>,
}

impl Scanner {
    pub fn new(chain: FilterChain, config: ScanConfig) -> Self {
        Self {
            chain,
            config,
            stats: Arc::new(ScanStats::new()),
        }
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn stats(&self) -> Arc<ScanStats> {
        Arc::clone(&self.stats)
    }

    /// Scan every numbered file of the descriptor. Files are
    /// independent tasks; lines within one file keep input order in the
    /// output, interleaving between files is unspecified. A file that
    /// cannot be opened contributes zero lines and is not an error.
    pub fn scan<W: Write + Send>(
        &self,
        descriptor: &CorpusDescriptor,
        sink: &SharedSink<W>,
    ) -> anyhow::Result<()> {
        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_files_progress_bar(descriptor.file_count as u64)
        };

        (0..descriptor.file_count)
            .into_par_iter()
            .try_for_each(|index| -> anyhow::Result<()> {
                let path = descriptor.path_for(index);
                self.scan_file(&path, sink)?;
                pb.inc(1);
                Ok(())
            })?;

        pb.finish_and_clear();
        sink.flush()?;
        Ok(())
    }

    /// Process one corpus file start to finish on the calling worker.
    fn scan_file<W: Write + Send>(
        &self,
        path: &Path,
        sink: &SharedSink<W>,
    ) -> anyhow::Result<()> {
        let source = match open_lines(path) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("cannot open {}: {}, skipping", path.display(), e);
                self.stats.add_missing_file();
                return Ok(());
            }
        };
        log::info!("scanning {}", path.display());

        let processor = LineProcessor::new(&self.chain);
        let mut buffer = LineBuffer::new(sink, self.config.flush_threshold);

        for line in source {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    // Treat a decode/read failure as end of this file,
                    // matching the missing-file policy.
                    log::warn!("read error in {}: {}", path.display(), e);
                    self.stats.add_read_error();
                    break;
                }
            };

            self.stats.add_line();
            match processor.process_line(&line) {
                Some(out) => {
                    buffer.push_line(&out)?;
                    self.stats.add_emitted();
                }
                None => self.stats.add_dropped(),
            }
        }

        buffer.flush()?;
        self.stats.complete_file();
        Ok(())
    }
}
