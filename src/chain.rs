//! Filter chain construction
//!
//! Turns the flat list of command-line filter arguments into an ordered
//! sequence of per-position [`WordFilter`]s plus an output-selection
//! flag per position. The chain length fixes the n-gram order for the
//! whole run.

use crate::error::ConfigError;
use crate::filter::WordFilter;

/// Highest n-gram order any corpus table can carry.
pub const MAX_ORDER: usize = 5;

/// One chain position: the filter applied to the token at that
/// position, and whether the surviving token appears in the output.
#[derive(Debug)]
pub struct Stage {
    pub filter: WordFilter,
    pub emit: bool,
}

/// An ordered sequence of per-position filters with a selection mask,
/// built once at startup and read-only afterwards.
///
/// Argument syntax, in order:
///
/// | prefix | meaning                                   | emitted |
/// |--------|-------------------------------------------|---------|
/// | `-`    | language selector (not a chain position)  | n/a     |
/// | `@p`   | dictionary filter loaded from `p.txt`     | yes     |
/// | `*`    | passthrough                               | no      |
/// | `?`    | passthrough                               | yes     |
/// | `%re`  | anchored pattern                          | no      |
/// | other  | anchored pattern from the literal text    | yes     |
#[derive(Debug)]
pub struct FilterChain {
    stages: Vec<Stage>,
    language: String,
}

impl FilterChain {
    /// Build a chain from raw arguments. `languages` lists the corpus
    /// table's language names; the first entry is the default when no
    /// `-LANG` selector appears. An unrecognized selector is fatal
    /// rather than silently falling back to the default.
    pub fn from_args<S: AsRef<str>>(
        args: &[S],
        languages: &[String],
    ) -> Result<Self, ConfigError> {
        let mut stages = Vec::new();
        let mut language = languages
            .first()
            .cloned()
            .unwrap_or_default();

        for arg in args {
            let arg = arg.as_ref();
            if let Some(name) = arg.strip_prefix('-') {
                if !languages.iter().any(|l| l == name) {
                    return Err(ConfigError::UnknownLanguage(name.to_string()));
                }
                language = name.to_string();
            } else if let Some(prefix) = arg.strip_prefix('@') {
                stages.push(Stage {
                    filter: WordFilter::dictionary(prefix)?,
                    emit: true,
                });
            } else if arg.starts_with('*') {
                stages.push(Stage {
                    filter: WordFilter::Passthrough,
                    emit: false,
                });
            } else if arg.starts_with('?') {
                stages.push(Stage {
                    filter: WordFilter::Passthrough,
                    emit: true,
                });
            } else if let Some(pattern) = arg.strip_prefix('%') {
                stages.push(Stage {
                    filter: WordFilter::pattern(pattern)?,
                    emit: false,
                });
            } else {
                stages.push(Stage {
                    filter: WordFilter::pattern(arg)?,
                    emit: true,
                });
            }
        }

        if stages.is_empty() {
            return Err(ConfigError::EmptyChain);
        }
        if stages.len() > MAX_ORDER {
            return Err(ConfigError::ChainTooLong {
                len: stages.len(),
                max: MAX_ORDER,
            });
        }

        Ok(Self { stages, language })
    }

    /// Chain length, which equals the n-gram order being scanned.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stages in application order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The selected (or default) corpus language.
    pub fn language(&self) -> &str {
        &self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs() -> Vec<String> {
        vec!["DE".to_string(), "EN".to_string()]
    }

    #[test]
    fn test_language_flag_not_counted_in_length() {
        let chain = FilterChain::from_args(&["-EN", "%The", "cat"], &langs()).unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.language(), "EN");
        assert!(!chain.stages()[0].emit);
        assert!(chain.stages()[1].emit);
    }

    #[test]
    fn test_default_language_is_first_table_entry() {
        let chain = FilterChain::from_args(&["cat"], &langs()).unwrap();

        assert_eq!(chain.language(), "DE");
    }

    #[test]
    fn test_unknown_language_is_fatal() {
        let err = FilterChain::from_args(&["-FR", "cat"], &langs()).unwrap_err();

        assert!(matches!(err, ConfigError::UnknownLanguage(name) if name == "FR"));
    }

    #[test]
    fn test_star_and_question_are_passthrough() {
        let chain = FilterChain::from_args(&["*", "?"], &langs()).unwrap();

        assert!(matches!(chain.stages()[0].filter, WordFilter::Passthrough));
        assert!(!chain.stages()[0].emit);
        assert!(matches!(chain.stages()[1].filter, WordFilter::Passthrough));
        assert!(chain.stages()[1].emit);
    }

    #[test]
    fn test_percent_pattern_not_emitted() {
        let chain = FilterChain::from_args(&["%[0-9]+", "dog"], &langs()).unwrap();

        assert!(matches!(chain.stages()[0].filter, WordFilter::Pattern(_)));
        assert!(!chain.stages()[0].emit);
        assert!(matches!(chain.stages()[1].filter, WordFilter::Pattern(_)));
        assert!(chain.stages()[1].emit);
    }

    #[test]
    fn test_empty_chain_is_fatal() {
        assert!(matches!(
            FilterChain::from_args::<&str>(&[], &langs()),
            Err(ConfigError::EmptyChain)
        ));
        // A lone language flag still leaves the chain empty.
        assert!(matches!(
            FilterChain::from_args(&["-EN"], &langs()),
            Err(ConfigError::EmptyChain)
        ));
    }

    #[test]
    fn test_overlong_chain_is_fatal() {
        let args = ["?", "?", "?", "?", "?", "?"];

        assert!(matches!(
            FilterChain::from_args(&args, &langs()),
            Err(ConfigError::ChainTooLong { len: 6, max: 5 })
        ));
    }

    #[test]
    fn test_missing_dictionary_is_fatal() {
        assert!(matches!(
            FilterChain::from_args(&["@no_such_prefix_anywhere"], &langs()),
            Err(ConfigError::Dictionary { .. })
        ));
    }
}
