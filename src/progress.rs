//! Diagnostics and run statistics
//!
//! Everything here goes to stderr and is informational only; the
//! contract output stream stays on stdout untouched.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("{} {}", "✖".red(), text.red());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("{} {}", "⚠".yellow(), text.yellow());
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("{} {}", "ℹ".cyan(), text);
}

/// Progress bar over the corpus file count. Drawn on stderr.
pub fn create_files_progress_bar(total_files: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_files);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} files {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Run counters, shared across workers.
#[derive(Debug)]
pub struct ScanStats {
    files_scanned: AtomicU64,
    files_missing: AtomicU64,
    lines_read: AtomicU64,
    lines_emitted: AtomicU64,
    lines_dropped: AtomicU64,
    read_errors: AtomicU64,
    start_time: Instant,
}

impl ScanStats {
    pub fn new() -> Self {
        Self {
            files_scanned: AtomicU64::new(0),
            files_missing: AtomicU64::new(0),
            lines_read: AtomicU64::new(0),
            lines_emitted: AtomicU64::new(0),
            lines_dropped: AtomicU64::new(0),
            read_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn complete_file(&self) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_missing_file(&self) {
        self.files_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_line(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_emitted(&self) {
        self.lines_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_dropped(&self) {
        self.lines_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_files_scanned(&self) -> u64 {
        self.files_scanned.load(Ordering::Relaxed)
    }

    pub fn get_files_missing(&self) -> u64 {
        self.files_missing.load(Ordering::Relaxed)
    }

    pub fn get_lines_read(&self) -> u64 {
        self.lines_read.load(Ordering::Relaxed)
    }

    pub fn get_lines_emitted(&self) -> u64 {
        self.lines_emitted.load(Ordering::Relaxed)
    }

    pub fn get_lines_dropped(&self) -> u64 {
        self.lines_dropped.load(Ordering::Relaxed)
    }

    pub fn get_read_errors(&self) -> u64 {
        self.read_errors.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_lines_read() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print end-of-run counters. `bytes_written` comes from the sink.
    pub fn print_summary(&self, bytes_written: u64) {
        let missing = self.get_files_missing();
        let errors = self.get_read_errors();

        eprintln!();
        eprintln!(
            "  {} {}",
            "Files scanned:  ".green(),
            format_number(self.get_files_scanned())
        );
        if missing > 0 {
            eprintln!(
                "  {} {}",
                "Files missing:  ".yellow(),
                format_number(missing).yellow()
            );
        }
        eprintln!(
            "  {} {}",
            "Lines read:     ".green(),
            format_number(self.get_lines_read())
        );
        eprintln!(
            "  {} {}",
            "Lines emitted:  ".green().bold(),
            format_number(self.get_lines_emitted()).green().bold()
        );
        eprintln!(
            "  {} {}",
            "Lines dropped:  ".green(),
            format_number(self.get_lines_dropped())
        );
        if errors > 0 {
            eprintln!(
                "  {} {}",
                "Read errors:    ".red(),
                format_number(errors).red()
            );
        }
        eprintln!(
            "  {} {}",
            "Output written: ".green(),
            ByteSize(bytes_written)
        );
        eprintln!("  {} {:?}", "Duration:       ".green(), self.elapsed());
        eprintln!(
            "  {} {:.0} lines/sec",
            "Throughput:     ".green(),
            self.lines_per_second()
        );
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
