use crate::config::GameConfig;
use crate::log;

use super::fruit::{FruitSet, FruitTuning};
use super::head::Head;
use super::levels::LevelTable;
use super::progress::{UserProgress, window_size_for_score};
use super::session_rng::SessionRng;
use super::trail::Trail;
use super::types::{ArenaSize, Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    SelfCollision,
    ObstacleCollision,
}

/// Shared control state for one session. Mutated only by the engine's own
/// update step; scenes and the client read it.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub speed: i32,
    pub paused: bool,
    pub running: bool,
    pub window_size: usize,
}

#[derive(Clone, Debug)]
pub struct GameplayState {
    pub head: Head,
    pub trail: Trail,
    pub fruits: FruitSet,
    pub levels: LevelTable,
    pub progress: UserProgress,
    pub context: SessionContext,
    pub death_reason: Option<DeathReason>,
    arena: ArenaSize,
    tuning: FruitTuning,
    initial_window: usize,
    exclusion_buffer: usize,
}

impl GameplayState {
    pub fn new(config: &GameConfig, progress: UserProgress) -> Self {
        let arena = config.arena();
        let context = SessionContext {
            speed: progress.level as i32,
            paused: false,
            running: true,
            window_size: window_size_for_score(progress.score, config.initial_window),
        };

        Self {
            head: Head::new(spawn_position(arena), Direction::Down, config.head_size),
            trail: Trail::new(),
            fruits: FruitSet::new(config.fruit_cap, config.fruit_size, config.fruit_margin),
            levels: LevelTable::standard(arena),
            progress,
            context,
            death_reason: None,
            arena,
            tuning: config.fruit_tuning,
            initial_window: config.initial_window,
            exclusion_buffer: config.exclusion_buffer,
        }
    }

    pub fn arena(&self) -> ArenaSize {
        self.arena
    }

    pub fn turn_head(&mut self, direction: Direction) {
        self.head.turn(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.context.paused = !self.context.paused;
    }

    /// Timer-driven spawn attempt; the set itself enforces the cap.
    pub fn spawn_fruit(&mut self, now_ms: u64, rng: &mut SessionRng) {
        if self.context.running {
            self.fruits.try_spawn(now_ms, self.arena, &self.tuning, rng);
        }
    }

    /// One simulation tick. Fruit aging runs every frame; everything else is
    /// frozen while the head cannot move.
    pub fn update(&mut self, now_ms: u64) {
        if !self.context.running {
            return;
        }

        self.context.speed = if self.context.paused {
            0
        } else {
            self.progress.level as i32
        };

        self.fruits.expire(now_ms);

        if self.context.speed == 0 {
            return;
        }

        self.trail.record(self.head.leave_point());
        self.trail.truncate_to(self.context.window_size);
        self.head.advance(self.context.speed);

        let head_box = self.head.bounding_box();

        if self.trail.collides_with(&head_box, self.exclusion_buffer) {
            self.end_game(DeathReason::SelfCollision);
            return;
        }

        if self
            .levels
            .active(self.progress.level)
            .iter()
            .any(|wall| head_box.overlaps(wall))
        {
            self.end_game(DeathReason::ObstacleCollision);
            return;
        }

        let gained = self.fruits.consume_overlapping(&head_box);
        if gained > 0 {
            let previous_level = self.progress.level;
            self.progress.add_score(gained);
            self.context.window_size =
                window_size_for_score(self.progress.score, self.initial_window);

            if self.progress.level != previous_level {
                if self.levels.is_clamped(self.progress.level) {
                    log!(
                        "[{}] level {} is past the layout table; reusing the last layout",
                        self.progress.username,
                        self.progress.level
                    );
                } else {
                    log!(
                        "[{}] reached level {} (score {})",
                        self.progress.username,
                        self.progress.level,
                        self.progress.score
                    );
                }
            }
        }
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.death_reason = Some(reason);
        self.context.running = false;
        log!(
            "[{}] game over ({:?}) at score {}, level {}",
            self.progress.username,
            reason,
            self.progress.score,
            self.progress.level
        );
    }
}

// Clear of every layout in the standard table, so a returning user starting
// on a later level never spawns inside a wall.
fn spawn_position(arena: ArenaSize) -> Point {
    Point::new(arena.width / 2, arena.height / 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fruit::Fruit;
    use crate::game::trail::TrailPoint;
    use crate::storage::{UserId, UserRecord};

    fn progress_with_score(score: u32) -> UserProgress {
        UserProgress::from_record(&UserRecord {
            id: UserId::new(1),
            username: "alice".to_string(),
            score,
            level: 1,
        })
    }

    fn state_with_score(score: u32) -> GameplayState {
        GameplayState::new(&GameConfig::default(), progress_with_score(score))
    }

    fn fruit_at(x: i32, y: i32, weight: u32) -> Fruit {
        Fruit {
            position: Point::new(x, y),
            spawned_at_ms: 0,
            lifetime_ms: u64::MAX,
            weight,
        }
    }

    #[test]
    fn test_straight_run_lands_where_expected() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;
        for tick in 0..10 {
            state.update(tick * 16);
        }
        assert_eq!(state.head.position, Point::new(310, 300));
        assert!(state.context.running);
        assert!(state.death_reason.is_none());
    }

    #[test]
    fn test_trail_length_invariant() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(100, 300);
        state.head.direction = Direction::Right;

        for tick in 0..10 {
            state.update(tick * 16);
        }
        assert_eq!(state.trail.len(), 10);

        for tick in 10..80 {
            state.update(tick * 16);
        }
        assert!(state.context.running);
        assert_eq!(state.trail.len(), state.context.window_size);
        assert_eq!(state.context.window_size, 75);
    }

    #[test]
    fn test_fruit_in_path_is_eaten() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;
        state.fruits.place(fruit_at(310, 300, 3));

        state.update(0);

        assert_eq!(state.progress.score, 3);
        assert_eq!(state.progress.level, 1);
        assert!(state.fruits.is_empty());
        assert_eq!(state.context.window_size, 75 + 3 * 5);
    }

    #[test]
    fn test_level_threshold_switches_obstacles_same_tick() {
        let mut state = state_with_score(9);
        state.head.position = Point::new(200, 300);
        state.head.direction = Direction::Right;
        state.fruits.place(fruit_at(210, 300, 1));

        state.update(0);

        assert_eq!(state.progress.score, 10);
        assert_eq!(state.progress.level, 2);
        // The active obstacle set is the second layout from this tick on.
        assert_eq!(
            state.levels.active(state.progress.level),
            state.levels.active(2)
        );
        assert_ne!(state.levels.active(2), state.levels.active(1));
        assert_eq!(state.context.speed, 1);
        state.update(16);
        assert_eq!(state.context.speed, 2);
    }

    #[test]
    fn test_score_is_sum_of_weights() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;

        for (offset, weight) in [(5, 2u32), (10, 3), (15, 4)] {
            state.fruits.place(fruit_at(300 + offset, 300, weight));
        }
        for tick in 0..20 {
            state.update(tick * 16);
        }
        assert_eq!(state.progress.score, 9);
        assert_eq!(state.progress.level, 1);
    }

    #[test]
    fn test_wall_ends_the_game() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(40, 300);
        state.head.direction = Direction::Left;

        let mut ticks = 0;
        while state.context.running && ticks < 100 {
            state.update(ticks * 16);
            ticks += 1;
        }
        assert!(!state.context.running);
        assert_eq!(state.death_reason, Some(DeathReason::ObstacleCollision));
    }

    #[test]
    fn test_biting_own_trail_ends_the_game() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;

        // A stale point right in front of the head, buried deeper than the
        // exclusion buffer by later points elsewhere.
        state
            .trail
            .record(TrailPoint::new(Point::new(305, 300), Direction::Up));
        for _ in 0..55 {
            state
                .trail
                .record(TrailPoint::new(Point::new(100, 100), Direction::Up));
        }

        state.update(0);

        assert!(!state.context.running);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_recent_trail_points_never_collide() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;

        // 40 emitted points all overlap the head box, but they are all inside
        // the 50-point exclusion buffer.
        for tick in 0..40 {
            state.update(tick * 16);
        }
        assert!(state.context.running);
        assert!(state.death_reason.is_none());
    }

    #[test]
    fn test_pause_freezes_movement_and_trail() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(300, 300);
        state.head.direction = Direction::Right;
        state.update(0);
        let position = state.head.position;
        let trail_len = state.trail.len();

        state.toggle_pause();
        for tick in 1..200 {
            state.update(tick * 16);
        }
        assert_eq!(state.head.position, position);
        assert_eq!(state.trail.len(), trail_len);
        assert_eq!(state.context.speed, 0);
        assert!(state.context.running);

        state.toggle_pause();
        state.update(4000);
        assert_ne!(state.head.position, position);
    }

    #[test]
    fn test_fruit_ages_even_while_paused() {
        let mut state = state_with_score(0);
        state.fruits.place(Fruit {
            position: Point::new(400, 400),
            spawned_at_ms: 0,
            lifetime_ms: 1000,
            weight: 1,
        });
        state.toggle_pause();
        state.update(2000);
        assert!(state.fruits.is_empty());
    }

    #[test]
    fn test_spawn_stops_at_cap() {
        let mut state = state_with_score(0);
        let mut rng = SessionRng::new(42);
        for _ in 0..12 {
            state.spawn_fruit(0, &mut rng);
        }
        assert_eq!(state.fruits.len(), 5);
    }

    #[test]
    fn test_update_is_inert_after_game_over() {
        let mut state = state_with_score(0);
        state.head.position = Point::new(40, 300);
        state.head.direction = Direction::Left;
        let mut ticks = 0;
        while state.context.running && ticks < 100 {
            state.update(ticks * 16);
            ticks += 1;
        }
        let position = state.head.position;
        state.update(10_000);
        assert_eq!(state.head.position, position);
    }
}
