//! Stop filter implementation.
//!
//! Marks common words (the "ignore list") so the substitution engine leaves them
//! untouched. Tokens are never removed: a stopped word still has to appear in the
//! reconstructed message.
//!
//! # Examples
//!
//! ```
//! use thesaurize::analysis::token::Token;
//! use thesaurize::analysis::token_filter::Filter;
//! use thesaurize::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::english();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("fox", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 3);
//! assert!(result[0].is_stopped());
//! assert!(!result[1].is_stopped());
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that marks ignore-listed words as stopped.
///
/// Membership is matched against the token's normalized (lowercased) text, so the
/// word list should be lowercase.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of words to leave alone
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter with an empty word list. Nothing is stopped.
    pub fn new() -> Self {
        Self::with_stop_words(HashSet::new())
    }

    /// Create a stop filter with the default English stop words.
    pub fn english() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.into().to_lowercase())
            .collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let filtered_tokens: Vec<Token> = tokens
            .map(|token| {
                if !token.is_stopped() && self.is_stop_word(&token.text) {
                    token.stop()
                } else {
                    token
                }
            })
            .collect();

        Box::new(filtered_tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter_marks_without_removing() {
        let filter = StopFilter::from_words(vec!["the", "and"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).collect();

        assert_eq!(result.len(), 3);
        assert!(!result[0].is_stopped());
        assert_eq!(result[1].text, "the");
        assert!(result[1].is_stopped());
        assert!(!result[2].is_stopped());
    }

    #[test]
    fn test_from_words_lowercases() {
        let filter = StopFilter::from_words(vec!["The", "AND"]);
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("and"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter_stops_nothing() {
        let filter = StopFilter::new();
        assert!(filter.is_empty());

        let result: Vec<Token> = filter
            .filter(Box::new(vec![Token::new("the", 0)].into_iter()))
            .collect();
        assert!(!result[0].is_stopped());
    }

    #[test]
    fn test_english_defaults() {
        let filter = StopFilter::english();
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("hello"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
