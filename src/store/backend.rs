//! Key-value backend abstraction.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::error::{Result, ThesaurizeError};
use crate::store::command::{Pipeline, Reply};

/// A key-value backend with set values, pipelined/transactional execution, and
/// publish/subscribe notification.
///
/// This provides a pluggable interface for different backend implementations
/// like the in-process [`MemoryBackend`](crate::store::memory::MemoryBackend) or a
/// networked server.
pub trait KvBackend: Send + Sync + std::fmt::Debug {
    /// Execute every command of `pipeline` in one round trip. Replies come back in
    /// command order. A transport or transaction failure fails the whole pipeline.
    fn exec(&self, pipeline: &Pipeline) -> Result<Vec<Reply>>;

    /// Publish `payload` on `channel`. Returns the number of subscribers reached.
    fn publish(&self, channel: &str, payload: &str) -> Result<usize>;

    /// Subscribe to `channel`. Only messages published after this call are seen.
    fn subscribe(&self, channel: &str) -> Result<Subscription>;

    /// Check that the backend is reachable.
    fn ping(&self) -> Result<()>;
}

/// An open subscription to one pub/sub channel.
#[derive(Debug)]
pub struct Subscription {
    channel: String,
    receiver: Receiver<String>,
}

impl Subscription {
    /// Wrap the receiving end of a channel subscription.
    pub fn new<S: Into<String>>(channel: S, receiver: Receiver<String>) -> Self {
        Subscription {
            channel: channel.into(),
            receiver,
        }
    }

    /// Name of the subscribed channel.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Block for the next message, up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<String> {
        match self.receiver.recv_timeout(timeout) {
            Ok(payload) => Ok(payload),
            Err(RecvTimeoutError::Timeout) => Err(ThesaurizeError::timeout(format!(
                "no message on channel '{}' within {timeout:?}",
                self.channel
            ))),
            Err(RecvTimeoutError::Disconnected) => Err(ThesaurizeError::store(format!(
                "subscription to channel '{}' was closed",
                self.channel
            ))),
        }
    }

    /// Return the next message if one is already queued.
    pub fn try_recv(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}
