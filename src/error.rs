//! Fatal configuration errors
//!
//! Everything here aborts the run before any corpus file is opened.
//! Recoverable conditions (malformed dictionary lines, missing corpus
//! files, short input lines) are handled in place and never reach this
//! type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the filter chain and resolving the
/// corpus descriptor.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No filter arguments were given, so there is nothing to scan.
    #[error("empty filter chain: at least one filter argument is required")]
    EmptyChain,

    /// More filter positions than any supported n-gram order.
    #[error("filter chain has {len} positions but the maximum supported n-gram order is {max}")]
    ChainTooLong { len: usize, max: usize },

    /// A `-LANG` selector that no corpus table row matches.
    #[error("unknown language selector '-{0}'")]
    UnknownLanguage(String),

    /// A filter argument that does not compile as a regular expression.
    #[error("invalid pattern '{pattern}'")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A `@prefix` dictionary file that cannot be read.
    #[error("cannot read dictionary file {path:?}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus table has no entry for this language/order pair.
    #[error("no corpus registered for language '{language}' at order {order}")]
    NoCorpus { language: String, order: usize },

    /// A `--corpus-table` file that cannot be read or parsed.
    #[error("cannot load corpus table {path:?}: {reason}")]
    Table { path: PathBuf, reason: String },
}
