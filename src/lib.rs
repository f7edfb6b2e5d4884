//! # Thesaurize
//!
//! Rewrites text by swapping every word for a synonym while keeping its
//! punctuation and capitalization.
//!
//! ## Features
//!
//! - Decoration-preserving tokenizer and length-bounded reconstruction
//! - Categorized synonym store over a pluggable key-value backend
//! - Streaming loader for OpenOffice-style thesaurus archives
//! - Optional profanity filtering during loads
//!
//! ```
//! use std::sync::Arc;
//!
//! use thesaurize::engine;
//! use thesaurize::store::{Lexeme, MemoryBackend, SynonymStore};
//!
//! let store = SynonymStore::new(Arc::new(MemoryBackend::new()));
//! let mut writer = store.batch_writer();
//! writer.add(Lexeme::Adjective, "happy", &["glad".to_string()]).unwrap();
//! writer.finish().unwrap();
//!
//! assert_eq!(engine::transform("Happy days!", &store, false), "Glad days!");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod store;

pub mod prelude {
    pub use crate::analysis::{Capitalization, Message, Token};
    pub use crate::config::ThesaurizeConfig;
    pub use crate::engine::{SubstitutionEngine, transform};
    pub use crate::error::{Result, ThesaurizeError};
    pub use crate::loader::{LoadReport, load};
    pub use crate::store::{KvBackend, Lexeme, MemoryBackend, SynonymStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
