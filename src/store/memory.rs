//! In-memory key-value backend for testing and single-process use.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, unbounded};
use parking_lot::Mutex;
use rand::seq::IteratorRandom;

use crate::error::{Result, ThesaurizeError};
use crate::store::backend::{KvBackend, Subscription};
use crate::store::command::{Command, Pipeline, Reply};

/// Set-valued keys plus their expiry deadlines.
#[derive(Debug, Default)]
struct Keyspace {
    sets: HashMap<String, HashSet<String>>,
    expiries: HashMap<String, Instant>,
}

impl Keyspace {
    /// Drop `key` if its deadline has passed.
    fn evict_if_expired(&mut self, key: &str, now: Instant) {
        if self.expiries.get(key).is_some_and(|deadline| *deadline <= now) {
            self.expiries.remove(key);
            self.sets.remove(key);
        }
    }

    fn apply(&mut self, command: &Command, now: Instant) -> Reply {
        match command {
            Command::SAdd { key, members } => {
                self.evict_if_expired(key, now);
                let set = self.sets.entry(key.clone()).or_default();
                let added = members
                    .iter()
                    .filter(|member| set.insert((*member).clone()))
                    .count();
                Reply::Integer(added as i64)
            }
            Command::SRandMember { key } => {
                self.evict_if_expired(key, now);
                let member = self
                    .sets
                    .get(key)
                    .and_then(|set| set.iter().choose(&mut rand::rng()))
                    .cloned();
                Reply::Bulk(member)
            }
            Command::Expire { key, ttl } => {
                self.evict_if_expired(key, now);
                if !self.sets.contains_key(key) {
                    return Reply::Bool(false);
                }
                if ttl.is_zero() {
                    self.sets.remove(key);
                    self.expiries.remove(key);
                } else {
                    self.expiries.insert(key.clone(), now + *ttl);
                }
                Reply::Bool(true)
            }
        }
    }

    fn live_keys(&self, now: Instant) -> impl Iterator<Item = (&String, &HashSet<String>)> {
        self.sets.iter().filter(move |(key, _)| {
            self.expiries
                .get(*key)
                .is_none_or(|deadline| *deadline > now)
        })
    }
}

/// An in-process [`KvBackend`].
///
/// Every pipeline is applied under a single lock, so transactions are atomic.
/// The backend can be switched offline to simulate an unreachable server: every
/// operation then fails with a store error.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    keyspace: Mutex<Keyspace>,
    subscribers: Mutex<HashMap<String, Vec<Sender<String>>>>,
    offline: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the connection to the backend.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Whether the backend is currently simulating an outage.
    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.is_offline() {
            Err(ThesaurizeError::store("memory backend is offline"))
        } else {
            Ok(())
        }
    }

    /// Members of the set stored at `key`, empty if it does not exist.
    pub fn members(&self, key: &str) -> BTreeSet<String> {
        let mut keyspace = self.keyspace.lock();
        keyspace.evict_if_expired(key, Instant::now());
        keyspace
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remaining time-to-live of `key`, if it has one.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let keyspace = self.keyspace.lock();
        keyspace
            .expiries
            .get(key)
            .and_then(|deadline| deadline.checked_duration_since(now))
    }

    /// Number of live keys.
    pub fn key_count(&self) -> usize {
        self.keyspace.lock().live_keys(Instant::now()).count()
    }

    /// A sorted copy of every live key and its members.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeSet<String>> {
        let keyspace = self.keyspace.lock();
        keyspace
            .live_keys(Instant::now())
            .map(|(key, set)| (key.clone(), set.iter().cloned().collect()))
            .collect()
    }
}

impl KvBackend for MemoryBackend {
    fn exec(&self, pipeline: &Pipeline) -> Result<Vec<Reply>> {
        self.check_online()?;

        // Reject the whole pipeline before touching any key.
        for command in pipeline.commands() {
            if let Command::SAdd { key, members } = command
                && members.is_empty()
            {
                return Err(ThesaurizeError::store(format!(
                    "SADD on '{key}' needs at least one member"
                )));
            }
        }

        let now = Instant::now();
        let mut keyspace = self.keyspace.lock();
        Ok(pipeline
            .commands()
            .iter()
            .map(|command| keyspace.apply(command, now))
            .collect())
    }

    fn publish(&self, channel: &str, payload: &str) -> Result<usize> {
        self.check_online()?;

        let mut subscribers = self.subscribers.lock();
        let Some(senders) = subscribers.get_mut(channel) else {
            return Ok(0);
        };
        senders.retain(|sender| sender.send(payload.to_string()).is_ok());
        Ok(senders.len())
    }

    fn subscribe(&self, channel: &str) -> Result<Subscription> {
        self.check_online()?;

        let (sender, receiver) = unbounded();
        self.subscribers
            .lock()
            .entry(channel.to_string())
            .or_default()
            .push(sender);
        Ok(Subscription::new(channel, receiver))
    }

    fn ping(&self) -> Result<()> {
        self.check_online()
    }
}
