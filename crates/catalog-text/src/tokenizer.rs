//! Catalog text tokenizer.
//!
//! Pipeline: lowercase → word extraction with hyphenated compounds kept whole
//! (`4-conductor`, `uf-b`) → compound parts added alongside → union of raw and
//! Snowball-English stemmed forms.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Runs of word characters, joined by single internal hyphens.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:-\w+)*").expect("word pattern is valid"));

/// Owns the stemmer; build once and share.
pub struct Tokenizer {
    stemmer: Stemmer,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self { stemmer: Stemmer::create(Algorithm::English) }
    }

    /// Tokenize `text` into the set of unstemmed and stemmed terms.
    ///
    /// Total and deterministic: empty or punctuation-only input yields an empty set.
    ///
    /// ```
    /// use catalog_text::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("Testing 4-conductor");
    /// assert!(tokens.contains("testing"));
    /// assert!(tokens.contains("test"));
    /// assert!(tokens.contains("4-conductor"));
    /// ```
    pub fn tokenize(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut tokens = BTreeSet::new();
        for word in WORD.find_iter(&lowered).map(|m| m.as_str()) {
            self.insert(&mut tokens, word);
            if word.contains('-') {
                for part in word.split('-') {
                    self.insert(&mut tokens, part);
                }
            }
        }
        tokens
    }

    fn insert(&self, tokens: &mut BTreeSet<String>, word: &str) {
        let stemmed = self.stemmer.stem(word);
        if stemmed != word {
            tokens.insert(stemmed.into_owned());
        }
        tokens.insert(word.to_string());
    }
}
