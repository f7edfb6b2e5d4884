//! The categorized synonym store.
//!
//! Synonyms live in one set per (lexeme, headword) pair under the key
//! `"{lexeme}:{headword}"`. Candidate lookups are a single transactional round
//! trip; bulk loads accumulate set unions into batches and announce completion on
//! the `status` channel.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::{Result, ThesaurizeError};
use crate::store::backend::{KvBackend, Subscription};
use crate::store::command::Pipeline;
use crate::store::lexeme::Lexeme;

/// Pub/sub channel that carries the readiness notification.
pub const STATUS_CHANNEL: &str = "status";

/// The only payload allowed on [`STATUS_CHANNEL`].
pub const READY_PAYLOAD: &str = "ready";

/// Prefix of the per-word access marker refreshed on every lookup.
pub const ACCESS_MARKER_PREFIX: &str = "best_word_single_";

/// Synonym store on top of a [`KvBackend`].
#[derive(Debug, Clone)]
pub struct SynonymStore {
    backend: Arc<dyn KvBackend>,
    config: StoreConfig,
}

impl SynonymStore {
    /// Create a store with the default configuration.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(backend: Arc<dyn KvBackend>, config: StoreConfig) -> Self {
        SynonymStore { backend, config }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Check that the backend is reachable.
    pub fn ping(&self) -> Result<()> {
        self.backend.ping()
    }

    /// Pick a replacement for `word`.
    ///
    /// Refreshes the word's access marker and reads one random member from each
    /// lexeme set in priority order, all in one transaction. The first category
    /// that has a member wins. If no category has one, or the backend cannot be
    /// reached, `word` itself is returned.
    pub fn best_candidate(&self, word: &str) -> String {
        let mut pipeline = Pipeline::transaction();
        pipeline.expire(format!("{ACCESS_MARKER_PREFIX}{word}"), self.config.marker_ttl());
        for lexeme in Lexeme::ORDER {
            pipeline.srandmember(lexeme.key(word));
        }

        let replies = match self.backend.exec(&pipeline) {
            Ok(replies) => replies,
            Err(e) => {
                log::warn!("Could not access datastore for word: {word}, {e}");
                return word.to_string();
            }
        };

        replies
            .into_iter()
            .skip(1)
            .find_map(|reply| reply.into_string())
            .unwrap_or_else(|| word.to_string())
    }

    /// Start a batched bulk write.
    pub fn batch_writer(&self) -> BatchWriter<'_> {
        BatchWriter::new(self, self.config.batch_size)
    }

    /// Publish the readiness notification.
    pub fn publish_ready(&self) -> Result<()> {
        let receivers = self.backend.publish(STATUS_CHANNEL, READY_PAYLOAD)?;
        log::debug!("Published '{READY_PAYLOAD}' on '{STATUS_CHANNEL}' to {receivers} subscriber(s)");
        Ok(())
    }

    /// Subscribe to readiness notifications. Subscribe before starting the load
    /// that will publish, or the notification can be missed.
    pub fn subscribe_ready(&self) -> Result<ReadySubscription> {
        Ok(ReadySubscription {
            subscription: self.backend.subscribe(STATUS_CHANNEL)?,
        })
    }

    /// Block until a load announces readiness, for at most `timeout`.
    ///
    /// A zero timeout returns immediately without contacting the backend.
    pub fn wait_for_ready(&self, timeout: Duration) -> Result<()> {
        if timeout.is_zero() {
            return Ok(());
        }
        self.subscribe_ready()?.wait(timeout)
    }
}

/// A subscription to the readiness channel.
#[derive(Debug)]
pub struct ReadySubscription {
    subscription: Subscription,
}

impl ReadySubscription {
    /// Block until the readiness notification arrives, for at most `timeout`.
    ///
    /// A zero timeout returns immediately. Elapsing yields a timeout error; any
    /// payload other than `"ready"` yields a protocol error.
    pub fn wait(&self, timeout: Duration) -> Result<()> {
        if timeout.is_zero() {
            return Ok(());
        }

        log::info!("Waiting up to {timeout:?} for the datastore to become ready");
        let payload = self.subscription.recv_timeout(timeout).map_err(|e| match e {
            ThesaurizeError::Timeout(_) => ThesaurizeError::timeout(format!(
                "datastore did not become ready within {timeout:?}"
            )),
            other => other,
        })?;

        if payload == READY_PAYLOAD {
            log::info!("Datastore is ready");
            Ok(())
        } else {
            Err(ThesaurizeError::protocol(format!(
                "unexpected payload '{payload}' on channel '{STATUS_CHANNEL}'"
            )))
        }
    }
}

/// Accumulates set unions and commits them in transactions of `batch_size`.
///
/// A failed commit is returned to the caller and not retried; batches committed
/// before it stay in the store.
#[derive(Debug)]
pub struct BatchWriter<'a> {
    store: &'a SynonymStore,
    pipeline: Pipeline,
    batch_size: usize,
    committed_batches: usize,
    committed_entries: usize,
}

impl<'a> BatchWriter<'a> {
    fn new(store: &'a SynonymStore, batch_size: usize) -> Self {
        BatchWriter {
            store,
            pipeline: Pipeline::transaction(),
            batch_size: batch_size.max(1),
            committed_batches: 0,
            committed_entries: 0,
        }
    }

    /// Queue a union of `synonyms` into the `lexeme` set of `headword`. Commits
    /// the current batch first if it is full. Empty synonym lists are ignored.
    pub fn add(&mut self, lexeme: Lexeme, headword: &str, synonyms: &[String]) -> Result<()> {
        if synonyms.is_empty() {
            return Ok(());
        }
        if self.pipeline.len() >= self.batch_size {
            self.flush()?;
        }
        self.pipeline.sadd(lexeme.key(headword), synonyms.iter().cloned());
        Ok(())
    }

    /// Commit the queued unions, if any, and start a fresh transaction.
    pub fn flush(&mut self) -> Result<()> {
        if self.pipeline.is_empty() {
            return Ok(());
        }

        let pipeline = std::mem::replace(&mut self.pipeline, Pipeline::transaction());
        self.store.backend.exec(&pipeline)?;
        self.committed_batches += 1;
        self.committed_entries += pipeline.len();
        log::debug!(
            "Committed batch {} with {} entries",
            self.committed_batches,
            pipeline.len()
        );
        Ok(())
    }

    /// Commit the trailing partial batch and publish readiness.
    pub fn finish(mut self) -> Result<BatchSummary> {
        self.flush()?;
        self.store.publish_ready()?;
        Ok(BatchSummary {
            batches: self.committed_batches,
            entries: self.committed_entries,
        })
    }

    /// Number of unions queued but not yet committed.
    pub fn pending(&self) -> usize {
        self.pipeline.len()
    }
}

/// Totals of a finished [`BatchWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Transactions committed.
    pub batches: usize,
    /// Set unions committed.
    pub entries: usize,
}
