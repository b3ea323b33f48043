//! Corpus table module
//!
//! Static configuration mapping `(language, n-gram order)` to a set of
//! numbered corpus files. A compiled-in table covers the stock corpora;
//! `--corpus-table` swaps in a JSON file of the same shape so new
//! languages and orders need no code changes.

use crate::chain::MAX_ORDER;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One file set: a path template plus how many numbered files exist.
///
/// The template's `{}` placeholder is filled with the 4-digit
/// zero-padded file index; a template without a placeholder names a
/// single file regardless of index (vocab sets).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusDescriptor {
    pub path_template: String,
    pub file_count: u32,
}

impl CorpusDescriptor {
    pub fn path_for(&self, index: u32) -> PathBuf {
        if self.path_template.contains("{}") {
            PathBuf::from(
                self.path_template
                    .replacen("{}", &format!("{:04}", index), 1),
            )
        } else {
            PathBuf::from(&self.path_template)
        }
    }
}

/// All file sets for one language, indexed by order (slot 0 = unigram).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRow {
    pub language: String,
    pub orders: Vec<CorpusDescriptor>,
}

/// The full `(language, order)` table. Row order matters: the first
/// row is the default language when no selector flag is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusTable {
    rows: Vec<LanguageRow>,
}

impl CorpusTable {
    /// The compiled-in table for the stock German and English corpora.
    pub fn builtin() -> Self {
        let row = |language: &str, root: &str, ext: &str, counts: [u32; 5]| LanguageRow {
            language: language.to_string(),
            orders: (1..=MAX_ORDER)
                .map(|n| CorpusDescriptor {
                    path_template: if n == 1 {
                        format!("{root}/1gms/vocab.{ext}")
                    } else {
                        format!("{root}/{n}gms/{n}gm-{{}}.{ext}")
                    },
                    file_count: counts[n - 1],
                })
                .collect(),
        };
        Self {
            rows: vec![
                row(
                    "DE",
                    "/export/local/yannick/ngrams/GERMAN",
                    "bz2",
                    [1, 9, 16, 15, 11],
                ),
                row(
                    "EN",
                    "/export/local/yannick/ngrams/EN",
                    "gz",
                    [1, 31, 97, 131, 117],
                ),
            ],
        }
    }

    /// Load a table from a JSON file of the same shape as the built-in
    /// one. The file replaces the built-in table entirely.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|e| ConfigError::Table {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let table: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::Table {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if table.rows.is_empty() {
            return Err(ConfigError::Table {
                path: path.to_path_buf(),
                reason: "table has no language rows".to_string(),
            });
        }
        for row in &table.rows {
            if row.orders.len() > MAX_ORDER {
                return Err(ConfigError::Table {
                    path: path.to_path_buf(),
                    reason: format!(
                        "language '{}' declares {} orders, maximum is {}",
                        row.language,
                        row.orders.len(),
                        MAX_ORDER
                    ),
                });
            }
        }
        Ok(table)
    }

    /// Language names in table order; the first is the default.
    pub fn languages(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.language.clone()).collect()
    }

    /// Resolve the file set for a language at a 1-based order.
    pub fn descriptor(&self, language: &str, order: usize) -> Result<&CorpusDescriptor, ConfigError> {
        self.rows
            .iter()
            .find(|r| r.language == language)
            .and_then(|r| r.orders.get(order.wrapping_sub(1)))
            .ok_or_else(|| ConfigError::NoCorpus {
                language: language.to_string(),
                order,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_path_for_pads_index() {
        let desc = CorpusDescriptor {
            path_template: "/corpora/3gms/3gm-{}.gz".to_string(),
            file_count: 97,
        };

        assert_eq!(desc.path_for(0), PathBuf::from("/corpora/3gms/3gm-0000.gz"));
        assert_eq!(desc.path_for(42), PathBuf::from("/corpora/3gms/3gm-0042.gz"));
    }

    #[test]
    fn test_path_without_placeholder() {
        let desc = CorpusDescriptor {
            path_template: "/corpora/1gms/vocab.bz2".to_string(),
            file_count: 1,
        };

        assert_eq!(desc.path_for(0), PathBuf::from("/corpora/1gms/vocab.bz2"));
    }

    #[test]
    fn test_builtin_lookup() {
        let table = CorpusTable::builtin();

        assert_eq!(table.languages(), vec!["DE".to_string(), "EN".to_string()]);

        let bigrams = table.descriptor("EN", 2).unwrap();
        assert_eq!(bigrams.file_count, 31);
        assert!(bigrams.path_template.ends_with("2gms/2gm-{}.gz"));

        let vocab = table.descriptor("DE", 1).unwrap();
        assert_eq!(vocab.file_count, 1);
    }

    #[test]
    fn test_missing_entry_is_no_corpus() {
        let table = CorpusTable::builtin();

        assert!(matches!(
            table.descriptor("FR", 2),
            Err(ConfigError::NoCorpus { order: 2, .. })
        ));
    }

    #[test]
    fn test_table_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(
            br#"{"rows":[{"language":"XX","orders":[
                {"path_template":"/x/vocab.txt","file_count":1},
                {"path_template":"/x/2gm-{}.txt","file_count":4}
            ]}]}"#,
        )
        .unwrap();

        let table = CorpusTable::from_file(&path).unwrap();
        assert_eq!(table.languages(), vec!["XX".to_string()]);
        assert_eq!(table.descriptor("XX", 2).unwrap().file_count, 4);
        assert!(table.descriptor("XX", 3).is_err());
    }

    #[test]
    fn test_bad_table_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"not json").unwrap();

        assert!(matches!(
            CorpusTable::from_file(&path),
            Err(ConfigError::Table { .. })
        ));
        assert!(matches!(
            CorpusTable::from_file(&dir.path().join("absent.json")),
            Err(ConfigError::Table { .. })
        ));
    }
}
