//! Word filtering module
//!
//! A [`WordFilter`] decides the fate of a single token at one chain
//! position: pass it through, accept it by anchored pattern match, or
//! translate it through a dictionary.

use crate::error::ConfigError;
use ahash::RandomState;
use hashbrown::HashMap;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// A single-token decision unit.
///
/// The contract is `want(token) -> Option<replacement>`: `None` rejects
/// the whole line, `Some` yields the token to place in the output (the
/// input itself for `Passthrough` and `Pattern`, the mapped value for
/// `Dictionary`).
pub enum WordFilter {
    /// Accepts every token unchanged.
    Passthrough,
    /// Accepts tokens the pattern matches anchored at offset 0.
    /// Trailing unmatched characters are allowed.
    Pattern(Regex),
    /// Translates tokens through a key/value table; unknown keys reject.
    Dictionary(HashMap<String, String, RandomState>),
}

impl WordFilter {
    /// Compile a pattern filter. The user pattern is wrapped so the
    /// match is required to start at the beginning of the token, but
    /// not to consume all of it: `"foo"` accepts `"foobar"`.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            ConfigError::BadPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self::Pattern(regex))
    }

    /// Load a dictionary filter from `<prefix>.txt`.
    ///
    /// Each line holds a key and a value separated by whitespace.
    /// Lines missing the value column are logged and skipped; duplicate
    /// keys are resolved last-write-wins. An unreadable file is fatal.
    pub fn dictionary(prefix: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from(format!("{}.txt", prefix));
        let file = File::open(&path).map_err(|source| ConfigError::Dictionary {
            path: path.clone(),
            source,
        })?;
        log::info!("reading dictionary {:?}", path);

        let mut mapping = HashMap::with_hasher(RandomState::new());
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| ConfigError::Dictionary {
                path: path.clone(),
                source,
            })?;
            let mut cols = line.split_whitespace();
            let Some(key) = cols.next() else {
                continue;
            };
            match cols.next() {
                Some(value) => {
                    mapping.insert(key.to_string(), value.to_string());
                }
                None => {
                    log::warn!(
                        "{}:{}: no value column for key '{}', skipping",
                        path.display(),
                        lineno + 1,
                        key
                    );
                }
            }
        }
        Ok(Self::Dictionary(mapping))
    }

    /// Decide one token. `None` rejects the line this token came from.
    #[inline]
    pub fn want<'a>(&'a self, token: &'a str) -> Option<&'a str> {
        match self {
            Self::Passthrough => Some(token),
            Self::Pattern(regex) => regex.is_match(token).then_some(token),
            Self::Dictionary(mapping) => mapping.get(token).map(String::as_str),
        }
    }

    /// Number of entries in a dictionary filter, 0 for the other kinds.
    pub fn dictionary_len(&self) -> usize {
        match self {
            Self::Dictionary(mapping) => mapping.len(),
            _ => 0,
        }
    }
}

impl std::fmt::Debug for WordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passthrough => write!(f, "Passthrough"),
            Self::Pattern(regex) => write!(f, "Pattern({})", regex.as_str()),
            Self::Dictionary(mapping) => write!(f, "Dictionary({} entries)", mapping.len()),
        }
    }
}
