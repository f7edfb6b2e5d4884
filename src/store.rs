//! Synonym storage for Thesaurize.
//!
//! The store is split in two layers: a small key-value abstraction with set
//! commands, pipelines and pub/sub ([`backend`], [`command`], [`memory`]), and the
//! categorized synonym store built on top of it ([`synonym`]).

pub mod backend;
pub mod command;
pub mod lexeme;
pub mod memory;
pub mod synonym;

pub use backend::{KvBackend, Subscription};
pub use command::{Command, Pipeline, Reply};
pub use lexeme::Lexeme;
pub use memory::MemoryBackend;
pub use synonym::{
    BatchSummary, BatchWriter, READY_PAYLOAD, ReadySubscription, STATUS_CHANNEL, SynonymStore,
};
