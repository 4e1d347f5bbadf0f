mod fruit;
mod head;
mod levels;
mod progress;
mod session_rng;
mod state;
mod trail;
mod types;

pub use fruit::{Fruit, FruitSet, FruitTuning};
pub use head::Head;
pub use levels::{LevelTable, WALL_THICKNESS};
pub use progress::{UserProgress, level_for_score, window_size_for_score};
pub use session_rng::SessionRng;
pub use state::{DeathReason, GameplayState, SessionContext};
pub use trail::{Trail, TrailPoint};
pub use types::{ArenaSize, Direction, Point, Rect};
