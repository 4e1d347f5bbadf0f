use crate::backend::{Color, DrawSurface};
use crate::config::GameConfig;
use crate::game::{GameplayState, Point, Rect, UserProgress};
use crate::storage::UserRecord;

const TRAIL_POINT_SIZE: i32 = 5;

pub struct GameplayScene {
    pub state: GameplayState,
    best_score: Option<u32>,
}

impl GameplayScene {
    pub fn new(config: &GameConfig, record: &UserRecord) -> Self {
        Self {
            state: GameplayState::new(config, UserProgress::from_record(record)),
            best_score: None,
        }
    }

    /// Best stored score, fetched by the machine at session end for the
    /// game-over screen.
    pub fn set_best_score(&mut self, best: Option<u32>) {
        self.best_score = best;
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.state.context.running {
            self.draw_game_over(surface);
            return;
        }

        let arena = self.state.arena();
        surface.clear(Color::BLACK);

        for wall in self.state.levels.active(self.state.progress.level) {
            surface.fill_rect(*wall, Color::WHITE);
        }

        for point in self.state.trail.iter() {
            surface.fill_rect(
                Rect::centered_at(point.position, TRAIL_POINT_SIZE, TRAIL_POINT_SIZE),
                Color::GREEN,
            );
        }

        for fruit in self.state.fruits.iter() {
            surface.fill_rect(
                fruit.bounding_box(self.state.fruits.fruit_size()),
                Color::RED,
            );
        }

        surface.fill_rect(self.state.head.bounding_box(), Color::BLUE);

        surface.text(
            &format!("Level:{}", self.state.progress.level),
            Point::new(30, 10),
            20.0,
            Color::GREEN,
        );
        surface.text(
            &self.state.progress.score.to_string(),
            Point::new(arena.width - 60, 10),
            20.0,
            Color::YELLOW,
        );

        if self.state.context.paused {
            surface.text(
                "PAUSED",
                Point::new(arena.width / 2 - 50, arena.height / 2),
                30.0,
                Color::WHITE,
            );
        }
    }

    fn draw_game_over(&self, surface: &mut dyn DrawSurface) {
        let arena = self.state.arena();
        surface.clear(Color::RED);
        surface.text(
            "Game Over",
            Point::new(arena.width / 10, arena.height / 2 - 60),
            60.0,
            Color::WHITE,
        );
        surface.text(
            &format!("Score: {}", self.state.progress.score),
            Point::new(arena.width / 10, arena.height / 2 + 30),
            24.0,
            Color::WHITE,
        );
        if let Some(best) = self.best_score {
            surface.text(
                &format!("Best: {}", best.max(self.state.progress.score)),
                Point::new(arena.width / 10, arena.height / 2 + 65),
                24.0,
                Color::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::UserId;

    #[derive(Default)]
    struct RecordingSurface {
        cleared_with: Option<Color>,
        rects: Vec<(Rect, Color)>,
        texts: Vec<String>,
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self, color: Color) {
            self.cleared_with = Some(color);
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn text(&mut self, text: &str, _anchor: Point, _size: f32, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    fn scene() -> GameplayScene {
        GameplayScene::new(
            &GameConfig::default(),
            &UserRecord {
                id: UserId::new(1),
                username: "alice".to_string(),
                score: 0,
                level: 1,
            },
        )
    }

    #[test]
    fn test_draw_paints_walls_head_and_hud() {
        let scene = scene();
        let mut surface = RecordingSurface::default();
        scene.draw(&mut surface);

        assert_eq!(surface.cleared_with, Some(Color::BLACK));
        let walls = surface
            .rects
            .iter()
            .filter(|(_, color)| *color == Color::WHITE)
            .count();
        assert_eq!(walls, 4);
        assert!(surface.rects.iter().any(|(_, c)| *c == Color::BLUE));
        assert!(surface.texts.iter().any(|t| t == "Level:1"));
        assert!(surface.texts.iter().any(|t| t == "0"));
    }

    #[test]
    fn test_game_over_screen_shows_final_and_best_score() {
        let mut scene = scene();
        scene.state.context.running = false;
        scene.state.progress.score = 7;
        scene.set_best_score(Some(12));

        let mut surface = RecordingSurface::default();
        scene.draw(&mut surface);

        assert_eq!(surface.cleared_with, Some(Color::RED));
        assert!(surface.texts.iter().any(|t| t == "Game Over"));
        assert!(surface.texts.iter().any(|t| t == "Score: 7"));
        assert!(surface.texts.iter().any(|t| t == "Best: 12"));
    }
}
