//! Command-line interface definition for ngram-grep
//!
//! Provides argument parsing for the corpus scanning tool. The filter
//! specification is a trailing variable-length argument list so the
//! `-LANG` selector and `%`/`@`/`*`/`?` prefixes reach the chain
//! parser untouched.

use clap::Parser;
use std::path::PathBuf;

/// Parallel filter/projection scanner for n-gram frequency corpora
///
/// Each filter argument handles one n-gram position; the number of
/// filter arguments selects which corpus order is scanned.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ngram-grep",
    version,
    about = "Parallel filter/projection scanner for n-gram frequency corpora",
    long_about = r#"
Scans the numbered files of an n-gram frequency corpus in parallel and
emits, for each line whose leading tokens satisfy the per-position
filter chain, the selected tokens plus all trailing fields (counts).

FILTER ARGUMENTS (one per n-gram position, order matters):
    -LANG       select the corpus language (not a filter position)
    @prefix     dictionary filter loaded from prefix.txt, emitted
    *           match anything, not emitted
    ?           match anything, emitted
    %pattern    anchored regex, not emitted
    pattern     anchored regex, emitted

EXAMPLES:
    # Bigrams starting with "The", print the second word and the count
    ngram-grep -- -EN %The ?

    # Trigrams whose middle word maps through verbs.txt
    ngram-grep -- %The @verbs ?

Patterns are anchored at the start of the token; "foo" matches
"foobar" but not "barfoo". Options must precede the filter list.
"#
)]
pub struct Args {
    /// JSON corpus table replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub corpus_table: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 't', long, value_name = "NUM", default_value_t = 3)]
    pub threads: usize,

    /// Per-worker output buffer before a locked flush (e.g. "1KB", "64KB")
    #[arg(long, value_name = "SIZE", default_value = "1KB")]
    pub buffer_size: String,

    /// Print run statistics to stderr when done
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - no progress bar
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Filter chain: optional -LANG selector followed by one filter per
    /// n-gram position
    #[arg(
        value_name = "FILTER",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub filters: Vec<String>,
}

impl Args {
    /// Parse the buffer size string to bytes.
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if size_str.ends_with("MB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024)
    } else if size_str.ends_with("KB") {
        (&size_str[..size_str.len() - 2], 1024)
    } else if size_str.ends_with('B') {
        (&size_str[..size_str.len() - 1], 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("64KB").unwrap(), 64 * 1024);
        assert_eq!(parse_size("2MB").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_size("512B").unwrap(), 512);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn test_filters_capture_hyphen_selector() {
        let args =
            Args::try_parse_from(["ngram-grep", "--", "-EN", "%The", "cat"]).unwrap();

        assert_eq!(args.filters, vec!["-EN", "%The", "cat"]);
        assert_eq!(args.threads, 3);
    }

    #[test]
    fn test_options_before_filters() {
        let args = Args::try_parse_from([
            "ngram-grep",
            "-t",
            "8",
            "--buffer-size",
            "64KB",
            "--stats",
            "%The",
            "?",
        ])
        .unwrap();

        assert_eq!(args.threads, 8);
        assert_eq!(args.parse_buffer_size().unwrap(), 64 * 1024);
        assert!(args.stats);
        assert_eq!(args.filters, vec!["%The", "?"]);
    }

    #[test]
    fn test_filters_required() {
        assert!(Args::try_parse_from(["ngram-grep"]).is_err());
    }
}
