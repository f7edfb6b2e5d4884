//! Text analysis module for Thesaurize.
//!
//! This module turns free-form text into decorated tokens and back again:
//! tokenization, ignore-list filtering, and length-bounded reconstruction.

pub mod builder;
pub mod message;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use message::Message;
pub use token::{Capitalization, Token};
