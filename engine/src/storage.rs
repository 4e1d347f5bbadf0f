use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub score: u32,
    pub level: u32,
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Format(String),
    UnknownUser(UserId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Format(e) => write!(f, "Store format error: {}", e),
            StoreError::UnknownUser(id) => write!(f, "Unknown user id: {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Persistence contract consumed by the engine. All calls are synchronous and
/// short-lived; a failure never corrupts in-memory session state.
pub trait ScoreStore {
    fn lookup_user(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError>;
    fn create_user(&mut self, username: &str) -> Result<UserId, StoreError>;
    fn record_score(&mut self, id: UserId, score: u32) -> Result<(), StoreError>;
    fn update_progress(&mut self, id: UserId, score: u32, level: u32) -> Result<(), StoreError>;
    fn best_score(&mut self, id: UserId) -> Result<Option<u32>, StoreError>;
}

/// Lookup-or-create used by the name-entry confirm. New users get an initial
/// zero score row before the record is read back.
pub fn resolve_user(store: &mut dyn ScoreStore, username: &str) -> Result<UserRecord, StoreError> {
    if let Some(record) = store.lookup_user(username)? {
        return Ok(record);
    }
    let id = store.create_user(username)?;
    store.record_score(id, 0)?;
    store
        .lookup_user(username)?
        .ok_or(StoreError::UnknownUser(id))
}

/// In-memory store. Reference implementation of the contract; also the
/// best-effort fallback when no durable store is reachable.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    users: Vec<UserRecord>,
    score_rows: Vec<(UserId, u32)>,
    next_id: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn lookup_user(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&mut self, username: &str) -> Result<UserId, StoreError> {
        self.next_id += 1;
        let id = UserId::new(self.next_id);
        self.users.push(UserRecord {
            id,
            username: username.to_string(),
            score: 0,
            level: 1,
        });
        Ok(id)
    }

    fn record_score(&mut self, id: UserId, score: u32) -> Result<(), StoreError> {
        if !self.users.iter().any(|user| user.id == id) {
            return Err(StoreError::UnknownUser(id));
        }
        self.score_rows.push((id, score));
        Ok(())
    }

    fn update_progress(&mut self, id: UserId, score: u32, level: u32) -> Result<(), StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(StoreError::UnknownUser(id))?;
        user.score = score;
        user.level = level;
        self.score_rows.push((id, score));
        Ok(())
    }

    fn best_score(&mut self, id: UserId) -> Result<Option<u32>, StoreError> {
        Ok(self
            .score_rows
            .iter()
            .filter(|(row_id, _)| *row_id == id)
            .map(|(_, score)| *score)
            .max())
    }
}
