//! Token filter implementations for token transformation.
//!
//! Filters receive a stream of tokens and produce a new stream. They run between
//! tokenization and substitution.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Marks common words so substitution leaves them alone
//!
//! # Examples
//!
//! ```
//! use thesaurize::analysis::token::Token;
//! use thesaurize::analysis::token_filter::Filter;
//! use thesaurize::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::from_words(vec!["the"]);
//! let tokens = vec![Token::new("the", 0), Token::new("cat", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert!(filtered[0].is_stopped());
//! assert!(!filtered[1].is_stopped());
//! ```

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> TokenStream;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod stop;

pub use stop::StopFilter;
