mod gameplay;
mod name_entry;

pub use gameplay::GameplayScene;
pub use name_entry::NameEntryScene;

use crate::backend::{DrawSurface, InputEvent, Key, TimerTag};
use crate::config::GameConfig;
use crate::game::{Direction, SessionRng};
use crate::log;
use crate::storage::{ScoreStore, UserRecord};

pub enum Scene {
    NameEntry(NameEntryScene),
    Gameplay(GameplayScene),
}

/// Owns the two scenes and the only legal transition between them:
/// NameEntry -> Gameplay, then a terminal stop on quit or game over. Exactly
/// one progress write happens per session, on the terminal transition.
pub struct SceneMachine {
    config: GameConfig,
    store: Box<dyn ScoreStore>,
    rng: SessionRng,
    scene: Scene,
    finalized: bool,
    shutdown: bool,
}

impl SceneMachine {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, rng: SessionRng) -> Self {
        let scene = Scene::NameEntry(NameEntryScene::new(config.max_username_len));
        Self {
            config,
            store,
            rng,
            scene,
            finalized: false,
            shutdown: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn handle_events(&mut self, events: &[InputEvent], now_ms: u64) {
        let mut started: Option<UserRecord> = None;

        for event in events {
            match event {
                InputEvent::Quit => {
                    self.finalize_session();
                    self.shutdown = true;
                }
                InputEvent::KeyDown(key) => match &mut self.scene {
                    Scene::NameEntry(scene) => {
                        if let Some(record) = scene.handle_key(*key, self.store.as_mut()) {
                            started = Some(record);
                        }
                    }
                    Scene::Gameplay(scene) => match key {
                        Key::Up => scene.state.turn_head(Direction::Up),
                        Key::Down => scene.state.turn_head(Direction::Down),
                        Key::Left => scene.state.turn_head(Direction::Left),
                        Key::Right => scene.state.turn_head(Direction::Right),
                        Key::Pause => scene.state.toggle_pause(),
                        _ => {}
                    },
                },
                InputEvent::Timer(TimerTag::FruitSpawn) => {
                    if let Scene::Gameplay(scene) = &mut self.scene {
                        scene.state.spawn_fruit(now_ms, &mut self.rng);
                    }
                }
            }
        }

        if let Some(record) = started {
            log!(
                "[{}] session start (stored score {}, seed {})",
                record.username,
                record.score,
                self.rng.seed()
            );
            self.scene = Scene::Gameplay(GameplayScene::new(&self.config, &record));
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        if let Scene::Gameplay(scene) = &mut self.scene {
            scene.state.update(now_ms);
            if !scene.state.context.running {
                self.finalize_session();
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        match &self.scene {
            Scene::NameEntry(scene) => scene.draw(surface, self.config.arena()),
            Scene::Gameplay(scene) => scene.draw(surface),
        }
    }

    /// False once the session is over; the client stops its loop on this.
    pub fn running(&self) -> bool {
        if self.shutdown {
            return false;
        }
        match &self.scene {
            Scene::NameEntry(_) => true,
            Scene::Gameplay(scene) => scene.state.context.running,
        }
    }

    fn finalize_session(&mut self) {
        if self.finalized {
            return;
        }
        if let Scene::Gameplay(scene) = &mut self.scene {
            self.finalized = true;
            let user_id = scene.state.progress.user_id;
            let username = scene.state.progress.username.clone();
            let score = scene.state.progress.score;
            let level = scene.state.progress.level;

            match self.store.update_progress(user_id, score, level) {
                Ok(()) => log!(
                    "[{}] progress saved: score {}, level {}",
                    username,
                    score,
                    level
                ),
                Err(e) => log!("[{}] failed to save progress: {}", username, e),
            }

            match self.store.best_score(user_id) {
                Ok(best) => scene.set_best_score(best),
                Err(e) => log!("[{}] failed to read best score: {}", username, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryScoreStore, StoreError, UserId};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn lookup_user(&mut self, _username: &str) -> Result<Option<UserRecord>, StoreError> {
            Err(StoreError::Format("store is down".to_string()))
        }

        fn create_user(&mut self, _username: &str) -> Result<UserId, StoreError> {
            Err(StoreError::Format("store is down".to_string()))
        }

        fn record_score(&mut self, _id: UserId, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Format("store is down".to_string()))
        }

        fn update_progress(
            &mut self,
            _id: UserId,
            _score: u32,
            _level: u32,
        ) -> Result<(), StoreError> {
            Err(StoreError::Format("store is down".to_string()))
        }

        fn best_score(&mut self, _id: UserId) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Format("store is down".to_string()))
        }
    }

    fn machine_with(store: Box<dyn ScoreStore>) -> SceneMachine {
        SceneMachine::new(GameConfig::default(), store, SessionRng::new(42))
    }

    fn type_name(machine: &mut SceneMachine, name: &str) {
        for c in name.chars() {
            machine.handle_events(&[InputEvent::KeyDown(Key::Char(c))], 0);
        }
    }

    #[test]
    fn test_fresh_user_confirm_starts_gameplay() {
        let mut machine = machine_with(Box::new(MemoryScoreStore::new()));
        type_name(&mut machine, "alice");
        machine.handle_events(&[InputEvent::KeyDown(Key::Confirm)], 0);

        let Scene::Gameplay(scene) = machine.scene() else {
            panic!("expected gameplay scene");
        };
        assert_eq!(scene.state.progress.username, "alice");
        assert_eq!(scene.state.progress.score, 0);
        assert_eq!(scene.state.progress.level, 1);
        assert!(machine.running());
    }

    #[test]
    fn test_empty_confirm_stays_in_name_entry() {
        let mut machine = machine_with(Box::new(MemoryScoreStore::new()));
        machine.handle_events(&[InputEvent::KeyDown(Key::Confirm)], 0);
        let Scene::NameEntry(scene) = machine.scene() else {
            panic!("expected name entry scene");
        };
        assert!(scene.error().is_some());
    }

    #[test]
    fn test_store_failure_blocks_gameplay() {
        let mut machine = machine_with(Box::new(BrokenStore));
        type_name(&mut machine, "alice");
        machine.handle_events(&[InputEvent::KeyDown(Key::Confirm)], 0);

        let Scene::NameEntry(scene) = machine.scene() else {
            panic!("expected name entry scene");
        };
        assert!(scene.error().is_some());
        assert!(machine.running());
    }

    #[test]
    fn test_quit_stops_the_machine() {
        let mut machine = machine_with(Box::new(MemoryScoreStore::new()));
        machine.handle_events(&[InputEvent::Quit], 0);
        assert!(!machine.running());
    }

    #[test]
    fn test_timer_event_spawns_fruit_in_gameplay_only() {
        let mut machine = machine_with(Box::new(MemoryScoreStore::new()));
        machine.handle_events(&[InputEvent::Timer(TimerTag::FruitSpawn)], 0);
        type_name(&mut machine, "bob");
        machine.handle_events(&[InputEvent::KeyDown(Key::Confirm)], 0);
        machine.handle_events(&[InputEvent::Timer(TimerTag::FruitSpawn)], 100);

        let Scene::Gameplay(scene) = machine.scene() else {
            panic!("expected gameplay scene");
        };
        assert_eq!(scene.state.fruits.len(), 1);
    }

    #[test]
    fn test_arrow_keys_steer_the_head() {
        let mut machine = machine_with(Box::new(MemoryScoreStore::new()));
        type_name(&mut machine, "bob");
        machine.handle_events(&[InputEvent::KeyDown(Key::Confirm)], 0);
        machine.handle_events(&[InputEvent::KeyDown(Key::Left)], 0);

        let Scene::Gameplay(scene) = machine.scene() else {
            panic!("expected gameplay scene");
        };
        assert_eq!(scene.state.head.direction, Direction::Left);
    }
}
