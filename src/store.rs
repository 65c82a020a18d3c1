use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use bytes::Bytes;
use rand::Rng;
use thiserror::Error as ThisError;

#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("key not found")]
    NotFound,
    #[error("key holds a value of another kind")]
    WrongKind,
}

/// The three kinds of data a key can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(Bytes),
    Deque(VecDeque<Bytes>),
    Set(HashSet<Bytes>),
}

/// Typed access into a [`Value`], implemented by the three stored kinds.
/// [`Store::find`] and [`Store::find_or_create`] are generic over this trait.
pub trait TypedValue: Sized {
    fn empty() -> Value;
    fn as_mut(value: &mut Value) -> Option<&mut Self>;
}

impl TypedValue for Bytes {
    fn empty() -> Value {
        Value::Text(Bytes::new())
    }

    fn as_mut(value: &mut Value) -> Option<&mut Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl TypedValue for VecDeque<Bytes> {
    fn empty() -> Value {
        Value::Deque(VecDeque::new())
    }

    fn as_mut(value: &mut Value) -> Option<&mut Self> {
        match value {
            Value::Deque(deque) => Some(deque),
            _ => None,
        }
    }
}

impl TypedValue for HashSet<Bytes> {
    fn empty() -> Value {
        Value::Set(HashSet::new())
    }

    fn as_mut(value: &mut Value) -> Option<&mut Self> {
        match value {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: Value,
    // Absolute deadline on the monotonic clock, never wall-clock.
    expires_at: Option<Instant>,
}

impl Entry {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// The keyspace. Keys are owned byte strings looked up by borrowed `&[u8]`
/// views (via `Borrow<[u8]>`), so the read path never allocates a key copy.
///
/// Expired entries are never observable: every lookup runs through
/// [`Store::remove_if_expired`], and [`Store::sweep`] evicts expired entries
/// that are never touched again.
pub struct Store {
    data: HashMap<Bytes, Entry>,
    // Keys that have ever been given a deadline, sampled by `sweep`. Slots
    // whose key has since been deleted are dropped lazily during sampling.
    expiring: Vec<Bytes>,
}

impl Store {
    pub fn new() -> Store {
        Store {
            data: HashMap::new(),
            expiring: Vec::new(),
        }
    }

    /// Lazy expiration: evicts the entry for `key` if its deadline has passed.
    fn remove_if_expired(&mut self, key: &[u8]) {
        let now = Instant::now();
        if self.data.get(key).is_some_and(|entry| entry.expired(now)) {
            self.data.remove(key);
        }
    }

    pub fn exists(&mut self, key: &[u8]) -> bool {
        self.remove_if_expired(key);
        self.data.contains_key(key)
    }

    /// Structural removal: an expired entry that has not been evicted yet
    /// still counts as removed.
    pub fn erase(&mut self, key: &[u8]) -> bool {
        self.data.remove(key).is_some()
    }

    /// All live keys. Expired entries met during the scan are evicted.
    pub fn keys(&mut self) -> Vec<Bytes> {
        let now = Instant::now();
        let mut keys = Vec::with_capacity(self.data.len());
        self.data.retain(|key, entry| {
            if entry.expired(now) {
                return false;
            }
            keys.push(key.clone());
            true
        });
        keys
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.expiring.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn find<T: TypedValue>(&mut self, key: &[u8]) -> Result<&mut T, Error> {
        self.remove_if_expired(key);
        let entry = self.data.get_mut(key).ok_or(Error::NotFound)?;
        T::as_mut(&mut entry.value).ok_or(Error::WrongKind)
    }

    /// As [`Store::find`], but inserts an empty value of the requested kind
    /// when the key is absent. Only fails with `WrongKind`.
    pub fn find_or_create<T: TypedValue>(&mut self, key: &[u8]) -> Result<&mut T, Error> {
        self.remove_if_expired(key);
        if !self.data.contains_key(key) {
            let entry = Entry {
                value: T::empty(),
                expires_at: None,
            };
            self.data.insert(Bytes::copy_from_slice(key), entry);
        }
        let entry = self.data.get_mut(key).ok_or(Error::NotFound)?;
        T::as_mut(&mut entry.value).ok_or(Error::WrongKind)
    }

    /// Sets `expires_at = now + ttl` on a live entry. False when absent.
    pub fn set_expiry(&mut self, key: &[u8], ttl: Duration) -> bool {
        self.remove_if_expired(key);
        let Some(entry) = self.data.get_mut(key) else {
            return false;
        };
        if entry.expires_at.is_none() {
            self.expiring.push(Bytes::copy_from_slice(key));
        }
        entry.expires_at = Some(Instant::now() + ttl);
        true
    }

    /// Remaining time to live in whole seconds: -2 when absent or expired,
    /// -1 when the entry has no deadline.
    pub fn get_ttl(&mut self, key: &[u8]) -> i64 {
        self.remove_if_expired(key);
        let Some(entry) = self.data.get(key) else {
            return -2;
        };
        let Some(deadline) = entry.expires_at else {
            return -1;
        };
        deadline.saturating_duration_since(Instant::now()).as_secs() as i64
    }

    /// Active expiration: examines up to `max_checks` randomly sampled
    /// entries that carry a deadline, evicting the expired ones. The attempt
    /// cap bounds the pass when most sampled slots are stale.
    pub fn sweep(&mut self, max_checks: usize) {
        let mut rng = rand::thread_rng();
        let now = Instant::now();
        let mut checked = 0;
        let mut attempts = 0;

        while checked < max_checks && attempts < max_checks * 2 && !self.expiring.is_empty() {
            attempts += 1;
            let slot = rng.gen_range(0..self.expiring.len());
            let key = &self.expiring[slot];

            match self.data.get(&key[..]) {
                Some(entry) if entry.expires_at.is_some() => {
                    checked += 1;
                    if entry.expired(now) {
                        let key = self.expiring.swap_remove(slot);
                        self.data.remove(&key[..]);
                    }
                }
                // Deleted, evicted, or re-created without a deadline; the
                // sampled slot is stale either way.
                _ => {
                    self.expiring.swap_remove(slot);
                }
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
