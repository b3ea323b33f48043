//! # ngram-grep
//!
//! Parallel filter/projection scanner for Google-style n-gram
//! frequency corpora.
//!
//! A corpus is a set of numbered files whose lines look like
//! `word1 word2 … wordN count`. A run builds an ordered chain of
//! per-position word filters from the command line, picks the corpus
//! file set matching the chain length, and scans every file on a
//! fixed-size worker pool, emitting for each accepted line the tokens
//! the chain selects plus all trailing fields.
//!
//! ## Features
//!
//! - **Per-position filters**: anchored regex patterns, wildcards, and
//!   dictionary key→value translation
//! - **Output projection**: each chain position decides whether its
//!   token appears in the output line
//! - **Transparent decompression**: `.gz` and `.bz2` corpus files are
//!   decoded on the fly
//! - **Parallel scanning**: one file per task over a fixed rayon pool,
//!   with per-worker output buffering and atomic flushes
//!
//! ## Usage
//!
//! ```bash
//! # English bigrams starting with "The": print the second word + count
//! ngram-grep -- -EN %The ?
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use ngram_grep::chain::FilterChain;
//! use ngram_grep::corpus::CorpusTable;
//! use ngram_grep::output::SharedSink;
//! use ngram_grep::processor::{ScanConfig, Scanner};
//!
//! let table = CorpusTable::builtin();
//! let chain = FilterChain::from_args(&["-EN", "%The", "?"], &table.languages()).unwrap();
//! let descriptor = table.descriptor(chain.language(), chain.len()).unwrap().clone();
//!
//! let scanner = Scanner::new(chain, ScanConfig::default());
//! let sink = SharedSink::new(std::io::stdout());
//! scanner.scan(&descriptor, &sink).unwrap();
//! ```

pub mod chain;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod output;
pub mod processor;
pub mod progress;
pub mod source;

pub use chain::FilterChain;
pub use cli::Args;
pub use corpus::{CorpusDescriptor, CorpusTable};
pub use error::ConfigError;
pub use filter::WordFilter;
pub use processor::{ScanConfig, Scanner};
