use crate::backend::{Color, DrawSurface, Key};
use crate::game::{ArenaSize, Point};
use crate::log;
use crate::storage::{ScoreStore, UserRecord, resolve_user};

/// Initial scene: collects a username, resolves it against the store and
/// hands the record to the machine for the gameplay transition.
pub struct NameEntryScene {
    username: String,
    error: Option<String>,
    max_len: usize,
}

impl NameEntryScene {
    pub fn new(max_len: usize) -> Self {
        Self {
            username: String::new(),
            error: None,
            max_len,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the resolved record on a successful confirm; `None` keeps the
    /// scene active (still editing, or a rejected/failed confirm).
    pub fn handle_key(&mut self, key: Key, store: &mut dyn ScoreStore) -> Option<UserRecord> {
        match key {
            Key::Char(c) if c.is_alphanumeric() => {
                if self.username.chars().count() < self.max_len {
                    self.username.push(c);
                }
                None
            }
            Key::Backspace => {
                self.username.pop();
                None
            }
            Key::Confirm => {
                if self.username.is_empty() {
                    self.error = Some("Enter a username".to_string());
                    return None;
                }
                match resolve_user(store, &self.username) {
                    Ok(record) => {
                        self.error = None;
                        Some(record)
                    }
                    Err(e) => {
                        log!("Failed to resolve user '{}': {}", self.username, e);
                        self.error = Some(format!("Storage error: {}", e));
                        None
                    }
                }
            }
            _ => None,
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, arena: ArenaSize) {
        surface.clear(Color::rgb(30, 30, 30));

        let x = arena.width / 3;
        let y = arena.height / 2;
        surface.text(
            "Input your username",
            Point::new(x, y - 50),
            32.0,
            Color::WHITE,
        );
        surface.text(&self.username, Point::new(x, y), 32.0, Color::WHITE);

        if let Some(error) = &self.error {
            surface.text(error, Point::new(x, y + 50), 20.0, Color::RED);
        }
    }
}
