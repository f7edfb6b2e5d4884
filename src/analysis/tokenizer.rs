//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of a substitution: they break a message into
//! [`Token`](crate::analysis::token::Token)s that remember how each unit was
//! decorated so that the message can be rebuilt after its words are replaced.
//!
//! # Available Tokenizers
//!
//! - [`decorating::DecoratingTokenizer`] - Splits on whitespace and records
//!   punctuation and capitalization for each unit
//!
//! # Examples
//!
//! ```
//! use thesaurize::analysis::tokenizer::Tokenizer;
//! use thesaurize::analysis::tokenizer::decorating::DecoratingTokenizer;
//!
//! let tokenizer = DecoratingTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].post_punctuation, "!");
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared between the
/// threads that serve substitution requests.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod decorating;

pub use decorating::DecoratingTokenizer;
