//! Message metadata: a tokenized message that can be rebuilt under a length budget.

use std::fmt;

use crate::analysis::builder::ReversibleStringBuilder;
use crate::analysis::token::{IntoTokenStream, Token};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::{DecoratingTokenizer, Tokenizer};

/// Default maximum length of a reconstructed message, in bytes.
pub const DEFAULT_MAX_LENGTH: usize = 2000;

/// Appended in place of the tokens that did not fit.
pub const TRUNCATION_MARKER: &str = "...";

/// An ordered sequence of decorated tokens plus the length budget used when the
/// message is put back together.
///
/// # Examples
///
/// ```
/// use thesaurize::analysis::message::Message;
///
/// let mut message = Message::parse("Hi, my name is John.");
/// if let Some(last) = message.tokens_mut().last_mut() {
///     last.text = "jane".to_string();
/// }
///
/// assert_eq!(message.reconstruct(), "Hi, my name is Jane.");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    tokens: Vec<Token>,
    max_length: usize,
}

impl Message {
    /// Tokenize `text` with the [`DecoratingTokenizer`] using the default budget.
    pub fn parse(text: &str) -> Self {
        Self::from_tokens(DecoratingTokenizer::new().tokenize(text).collect())
    }

    /// Build a message from already decorated tokens.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Message {
            tokens,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Set the maximum reconstructed length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// The maximum reconstructed length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The tokens of this message.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mutable access to the tokens, used to substitute words in place.
    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the message has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Run the tokens through a filter.
    pub fn apply_filter(&mut self, filter: &dyn Filter) {
        let tokens = std::mem::take(&mut self.tokens);
        self.tokens = filter.filter(tokens.into_token_stream()).collect();
    }

    /// Rebuild the message text from its tokens.
    ///
    /// Tokens are written left to right separated by single spaces. A token that
    /// would bring the output to within [`TRUNCATION_MARKER`]'s length of the
    /// budget is retracted and replaced by the marker, and nothing after it is
    /// written.
    pub fn reconstruct(&self) -> String {
        let limit = self.max_length.saturating_sub(TRUNCATION_MARKER.len());
        let estimate = self
            .tokens
            .iter()
            .map(|t| t.len() + t.pre_punctuation.len() + t.post_punctuation.len() + 1)
            .sum::<usize>();
        let mut builder = ReversibleStringBuilder::with_capacity(estimate.min(self.max_length));

        for token in &self.tokens {
            builder.write(token.pre_punctuation.as_str());
            builder.write(token.capitalized());
            builder.write(token.post_punctuation.as_str());

            if builder.len() >= limit {
                builder.reverse(3);
                builder.write(TRUNCATION_MARKER);
                builder.write(" ");
                break;
            }

            builder.write(" ");
            builder.flush();
        }

        let mut output = builder.finish();
        if output.ends_with(' ') {
            output.pop();
        }
        output
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reconstruct())
    }
}
