//! Commands understood by a key-value backend, and pipelines that bundle them
//! into one round trip.

use std::time::Duration;

/// A single backend command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Union `members` into the set stored at `key`.
    SAdd { key: String, members: Vec<String> },
    /// Fetch one random member of the set stored at `key`.
    SRandMember { key: String },
    /// Set a time-to-live on `key` if it exists.
    Expire { key: String, ttl: Duration },
}

/// The backend's answer to one [`Command`], in pipeline order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Count of members added by `SAdd`.
    Integer(i64),
    /// Member returned by `SRandMember`, `None` for a missing or empty set.
    Bulk(Option<String>),
    /// Whether `Expire` found its key.
    Bool(bool),
}

impl Reply {
    /// The string payload, if this is a non-empty bulk reply.
    pub fn into_string(self) -> Option<String> {
        match self {
            Reply::Bulk(value) => value,
            _ => None,
        }
    }
}

/// An ordered batch of commands executed in one round trip.
///
/// A transactional pipeline is applied atomically: readers never observe part of
/// it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    commands: Vec<Command>,
    transactional: bool,
}

impl Pipeline {
    /// Create a plain (non-transactional) pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline that executes as a single transaction.
    pub fn transaction() -> Self {
        Pipeline {
            commands: Vec::new(),
            transactional: true,
        }
    }

    /// Queue a set union.
    pub fn sadd<K, I, S>(&mut self, key: K, members: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(Command::SAdd {
            key: key.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Queue a random-member read.
    pub fn srandmember<K: Into<String>>(&mut self, key: K) -> &mut Self {
        self.commands.push(Command::SRandMember { key: key.into() });
        self
    }

    /// Queue an expiry refresh.
    pub fn expire<K: Into<String>>(&mut self, key: K, ttl: Duration) -> &mut Self {
        self.commands.push(Command::Expire {
            key: key.into(),
            ttl,
        });
        self
    }

    /// The queued commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Whether this pipeline is a transaction.
    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are queued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_builder() {
        let mut pipeline = Pipeline::transaction();
        pipeline
            .expire("best_word_single_world", Duration::from_secs(10))
            .srandmember("noun:world")
            .sadd("noun:world", ["earth", "globe"]);

        assert!(pipeline.is_transactional());
        assert_eq!(pipeline.len(), 3);
        assert_eq!(
            pipeline.commands()[2],
            Command::SAdd {
                key: "noun:world".to_string(),
                members: vec!["earth".to_string(), "globe".to_string()],
            }
        );
    }

    #[test]
    fn test_reply_into_string() {
        assert_eq!(Reply::Bulk(Some("earth".into())).into_string(), Some("earth".into()));
        assert_eq!(Reply::Bulk(None).into_string(), None);
        assert_eq!(Reply::Integer(2).into_string(), None);
    }
}
