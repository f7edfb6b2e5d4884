//! The substitution engine.
//!
//! Swaps every word of a message for a candidate from the synonym store while
//! keeping the original punctuation and capitalization.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use thesaurize::engine::SubstitutionEngine;
//! use thesaurize::store::{Lexeme, MemoryBackend, SynonymStore};
//!
//! let store = SynonymStore::new(Arc::new(MemoryBackend::new()));
//! let mut writer = store.batch_writer();
//! writer.add(Lexeme::Noun, "world", &["earth".to_string()]).unwrap();
//! writer.finish().unwrap();
//!
//! let engine = SubstitutionEngine::new(store);
//! assert_eq!(engine.transform("Hello, world!", false), "Hello, earth!");
//! ```

use crate::analysis::message::{DEFAULT_MAX_LENGTH, Message};
use crate::analysis::token_filter::StopFilter;
use crate::store::synonym::SynonymStore;

/// Replace words of `text` with candidates from `store`.
///
/// When `skip_common_words` is set, words on the built-in English ignore list are
/// kept as they are.
pub fn transform(text: &str, store: &SynonymStore, skip_common_words: bool) -> String {
    SubstitutionEngine::new(store.clone())
        .with_stop_filter(StopFilter::english())
        .transform(text, skip_common_words)
}

/// Substitution engine bound to one synonym store.
#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    store: SynonymStore,
    stop_filter: StopFilter,
    max_length: usize,
}

impl SubstitutionEngine {
    /// Create an engine with an empty ignore list and the default length budget.
    pub fn new(store: SynonymStore) -> Self {
        SubstitutionEngine {
            store,
            stop_filter: StopFilter::new(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Use `stop_filter` as the ignore list.
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.stop_filter = stop_filter;
        self
    }

    /// Set the maximum length of transformed messages.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// The synonym store.
    pub fn store(&self) -> &SynonymStore {
        &self.store
    }

    /// Transform `text`. Never fails: words the store cannot replace are kept.
    pub fn transform(&self, text: &str, skip_common_words: bool) -> String {
        let mut message = Message::parse(text).with_max_length(self.max_length);
        if skip_common_words {
            message.apply_filter(&self.stop_filter);
        }

        for token in message.tokens_mut() {
            if token.is_stopped() || token.is_empty() {
                continue;
            }
            token.text = self.store.best_candidate(&token.text);
        }

        message.reconstruct()
    }
}
