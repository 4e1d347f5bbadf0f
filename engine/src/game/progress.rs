use crate::storage::{UserId, UserRecord};

pub fn level_for_score(score: u32) -> u32 {
    score / 10 + 1
}

pub fn window_size_for_score(score: u32, initial_window: usize) -> usize {
    score as usize * 5 + initial_window
}

/// Score and level for the session, tied to the stored identity. Both only
/// ever grow; level is derived from score, never set independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProgress {
    pub user_id: UserId,
    pub username: String,
    pub score: u32,
    pub level: u32,
}

impl UserProgress {
    /// Returning users resume from their stored score; the level is
    /// re-derived so it stays a pure function of score.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            user_id: record.id,
            username: record.username.clone(),
            score: record.score,
            level: level_for_score(record.score),
        }
    }

    pub fn add_score(&mut self, weight: u32) {
        self.score += weight;
        self.level = level_for_score(self.score);
    }
}
