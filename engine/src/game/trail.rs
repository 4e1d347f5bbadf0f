use std::collections::VecDeque;

use super::types::{Direction, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailPoint {
    pub position: Point,
    pub direction: Direction,
}

impl TrailPoint {
    pub fn new(position: Point, direction: Direction) -> Self {
        Self { position, direction }
    }
}

/// Sliding window of past head positions, most-recent-last. Points that fall
/// out of the window are dropped for good; the trail has no undo.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn record(&mut self, point: TrailPoint) {
        self.points.push_back(point);
    }

    pub fn truncate_to(&mut self, window_size: usize) {
        while self.points.len() > window_size {
            self.points.pop_front();
        }
    }

    /// Self-collision test. The `exclusion` most recent points are skipped:
    /// the head always overlaps its own last few positions.
    pub fn collides_with(&self, head_box: &Rect, exclusion: usize) -> bool {
        let tested = self.points.len().saturating_sub(exclusion);
        self.points
            .iter()
            .take(tested)
            .any(|point| head_box.contains_point(point.position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}
