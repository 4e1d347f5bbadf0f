pub mod backend;
pub mod config;
pub mod game;
pub mod logger;
pub mod scene;
pub mod storage;

pub use backend::{Color, DrawSurface, InputEvent, Key, TimerTag};
pub use config::{ConfigManager, FileContentConfigProvider, GameConfig, Validate};
pub use game::{
    ArenaSize, DeathReason, Direction, Fruit, FruitSet, FruitTuning, GameplayState, Head,
    LevelTable, Point, Rect, SessionContext, SessionRng, Trail, TrailPoint, UserProgress,
};
pub use scene::SceneMachine;
pub use storage::{MemoryScoreStore, ScoreStore, StoreError, UserId, UserRecord};
