use chrono::Local;
use engine::storage::{ScoreStore, StoreError, UserId, UserRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ScoreRow {
    user_id: UserId,
    score: u32,
    played_at: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    users: Vec<UserRecord>,
    scores: Vec<ScoreRow>,
}

/// Score store backed by one YAML file. Every mutation is written through
/// immediately so a crash never loses a finished session.
pub struct YamlScoreStore {
    path: PathBuf,
    data: StoreFile,
}

impl YamlScoreStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let data = match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml_ng::from_str(&content)
                .map_err(|e| StoreError::Format(e.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content =
            serde_yaml_ng::to_string(&self.data).map_err(|e| StoreError::Format(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn push_score_row(&mut self, id: UserId, score: u32) {
        self.data.scores.push(ScoreRow {
            user_id: id,
            score,
            played_at: Local::now().to_rfc3339(),
        });
    }
}

impl ScoreStore for YamlScoreStore {
    fn lookup_user(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .data
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&mut self, username: &str) -> Result<UserId, StoreError> {
        self.data.next_id += 1;
        let id = UserId::new(self.data.next_id);
        self.data.users.push(UserRecord {
            id,
            username: username.to_string(),
            score: 0,
            level: 1,
        });
        self.persist()?;
        Ok(id)
    }

    fn record_score(&mut self, id: UserId, score: u32) -> Result<(), StoreError> {
        if !self.data.users.iter().any(|user| user.id == id) {
            return Err(StoreError::UnknownUser(id));
        }
        self.push_score_row(id, score);
        self.persist()
    }

    fn update_progress(&mut self, id: UserId, score: u32, level: u32) -> Result<(), StoreError> {
        let user = self
            .data
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(StoreError::UnknownUser(id))?;
        user.score = score;
        user.level = level;
        self.push_score_row(id, score);
        self.persist()
    }

    fn best_score(&mut self, id: UserId) -> Result<Option<u32>, StoreError> {
        Ok(self
            .data
            .scores
            .iter()
            .filter(|row| row.user_id == id)
            .map(|row| row.score)
            .max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::storage::resolve_user;

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "snake_arcade_{}_{}.yaml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let path = temp_store_path("missing");
        let _ = std::fs::remove_file(&path);
        let mut store = YamlScoreStore::open(&path).unwrap();
        assert!(store.lookup_user("alice").unwrap().is_none());
    }

    #[test]
    fn test_progress_survives_reopen() {
        let path = temp_store_path("reopen");
        let _ = std::fs::remove_file(&path);

        let id = {
            let mut store = YamlScoreStore::open(&path).unwrap();
            let record = resolve_user(&mut store, "alice").unwrap();
            store.update_progress(record.id, 23, 3).unwrap();
            record.id
        };

        let mut store = YamlScoreStore::open(&path).unwrap();
        let record = store.lookup_user("alice").unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.score, 23);
        assert_eq!(record.level, 3);
        assert_eq!(store.best_score(id).unwrap(), Some(23));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_best_score_keeps_history_maximum() {
        let path = temp_store_path("best");
        let _ = std::fs::remove_file(&path);

        let mut store = YamlScoreStore::open(&path).unwrap();
        let id = store.create_user("bob").unwrap();
        store.update_progress(id, 30, 4).unwrap();
        store.update_progress(id, 12, 2).unwrap();
        assert_eq!(store.best_score(id).unwrap(), Some(30));
        let record = store.lookup_user("bob").unwrap().unwrap();
        assert_eq!(record.score, 12);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_user_rejected() {
        let path = temp_store_path("unknown");
        let _ = std::fs::remove_file(&path);
        let mut store = YamlScoreStore::open(&path).unwrap();
        assert!(matches!(
            store.update_progress(UserId::new(7), 1, 1),
            Err(StoreError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_a_format_error() {
        let path = temp_store_path("corrupt");
        std::fs::write(&path, ":: not yaml ::").unwrap();
        assert!(matches!(
            YamlScoreStore::open(&path),
            Err(StoreError::Format(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
