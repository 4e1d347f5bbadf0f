use super::trail::TrailPoint;
use super::types::{Direction, Point, Rect};

/// The snake's head. The body is the trail behind it; collision against the
/// arena is done by the caller, so `advance` never clamps.
#[derive(Clone, Debug)]
pub struct Head {
    pub position: Point,
    pub direction: Direction,
    size: i32,
}

impl Head {
    pub fn new(position: Point, direction: Direction, size: i32) -> Self {
        Self {
            position,
            direction,
            size,
        }
    }

    /// Reversing into the point emitted last frame would end the game
    /// instantly, so a request for the exact opposite direction is ignored.
    pub fn turn(&mut self, requested: Direction) {
        if !requested.is_opposite(&self.direction) {
            self.direction = requested;
        }
    }

    pub fn advance(&mut self, speed: i32) {
        let (dx, dy) = self.direction.displacement(speed);
        self.position = self.position.translated(dx, dy);
    }

    /// Snapshot of where the head is right now; taken before `advance` so the
    /// emitted point marks where the head just was.
    pub fn leave_point(&self) -> TrailPoint {
        TrailPoint::new(self.position, self.direction)
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::centered_at(self.position, self.size, self.size)
    }
}
