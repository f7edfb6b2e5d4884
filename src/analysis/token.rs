//! Token types and utilities for text analysis.
//!
//! A [`Token`] is one whitespace-delimited unit of a message, split into the
//! normalized word that gets looked up in the thesaurus and the decorations that
//! are needed to put the original surface form back together afterwards.
//!
//! ```text
//! Input unit: "\"Hello,"
//!
//!   pre_punctuation:  "\""
//!   text:             "hello"
//!   capitalization:   FirstLetter
//!   post_punctuation: ","
//! ```
//!
//! # Examples
//!
//! ```
//! use thesaurize::analysis::token::{Capitalization, Token};
//!
//! let token = Token::new("world", 1)
//!     .with_capitalization(Capitalization::FirstLetter)
//!     .with_post_punctuation("!");
//!
//! assert_eq!(token.decorate(), "World!");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capitalization pattern recorded for a token before it was lowercased.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capitalization {
    /// Left as written.
    #[default]
    None,
    /// First letter uppercased ("Hello").
    FirstLetter,
    /// Whole word uppercased ("HELLO", "NASA").
    AllUpper,
}

impl Capitalization {
    /// Reapply this capitalization pattern to a lowercase word.
    pub fn apply(&self, word: &str) -> String {
        match self {
            Capitalization::None => word.to_string(),
            Capitalization::FirstLetter => capitalize_first(word),
            Capitalization::AllUpper => word.to_uppercase(),
        }
    }
}

/// A token represents a single unit of text after tokenization.
///
/// Decorations default to empty strings; a plain lowercase word carries no
/// punctuation and [`Capitalization::None`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The normalized text of the token. Lowercased unless the capitalization is
    /// [`Capitalization::None`].
    pub text: String,

    /// The position of the token in the original message (0-based)
    pub position: usize,

    /// Capitalization pattern to reapply on reconstruction.
    pub capitalization: Capitalization,

    /// Leading run of non-word characters.
    pub pre_punctuation: String,

    /// Trailing run of non-word characters.
    pub post_punctuation: String,

    /// Whether this token has been marked as stopped by a filter. Stopped tokens are
    /// kept in the message but never substituted.
    pub stopped: bool,
}

impl Token {
    /// Create a new undecorated token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            ..Default::default()
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the normalized text is empty (a punctuation-only unit).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the capitalization pattern.
    pub fn with_capitalization(mut self, capitalization: Capitalization) -> Self {
        self.capitalization = capitalization;
        self
    }

    /// Set the leading punctuation.
    pub fn with_pre_punctuation<S: Into<String>>(mut self, punctuation: S) -> Self {
        self.pre_punctuation = punctuation.into();
        self
    }

    /// Set the trailing punctuation.
    pub fn with_post_punctuation<S: Into<String>>(mut self, punctuation: S) -> Self {
        self.post_punctuation = punctuation.into();
        self
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether any decoration was recorded for this token.
    pub fn is_decorated(&self) -> bool {
        self.capitalization != Capitalization::None
            || !self.pre_punctuation.is_empty()
            || !self.post_punctuation.is_empty()
    }

    /// The word with its capitalization reapplied, without punctuation.
    pub fn capitalized(&self) -> String {
        self.capitalization.apply(&self.text)
    }

    /// The full surface form: leading punctuation, capitalized word, trailing
    /// punctuation.
    pub fn decorate(&self) -> String {
        format!(
            "{}{}{}",
            self.pre_punctuation,
            self.capitalized(),
            self.post_punctuation
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Uppercase the first character of `word`, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.capitalization, Capitalization::None);
        assert!(token.pre_punctuation.is_empty());
        assert!(token.post_punctuation.is_empty());
        assert!(!token.stopped);
        assert!(!token.is_decorated());
    }

    #[test]
    fn test_capitalization_apply() {
        assert_eq!(Capitalization::None.apply("hello"), "hello");
        assert_eq!(Capitalization::FirstLetter.apply("hello"), "Hello");
        assert_eq!(Capitalization::AllUpper.apply("hello"), "HELLO");
        assert_eq!(Capitalization::FirstLetter.apply(""), "");
        assert_eq!(Capitalization::FirstLetter.apply("élan"), "Élan");
    }

    #[test]
    fn test_decorate() {
        let token = Token::new("hello", 0)
            .with_capitalization(Capitalization::FirstLetter)
            .with_pre_punctuation("\"")
            .with_post_punctuation(",\"");

        assert!(token.is_decorated());
        assert_eq!(token.capitalized(), "Hello");
        assert_eq!(token.decorate(), "\"Hello,\"");
    }

    #[test]
    fn test_token_stop() {
        let token = Token::new("the", 3).stop();
        assert!(token.is_stopped());
        assert_eq!(token.to_string(), "the");
    }
}
