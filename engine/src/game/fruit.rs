use serde::{Deserialize, Serialize};

use super::session_rng::SessionRng;
use super::types::{ArenaSize, Point, Rect};

/// Random ranges for new fruit. Deterministic tests inject fixed values
/// instead of relying on a seeded global source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FruitTuning {
    pub lifetime_min_ms: u64,
    pub lifetime_max_ms: u64,
    pub weight_min: u32,
    pub weight_max: u32,
}

impl Default for FruitTuning {
    fn default() -> Self {
        Self {
            lifetime_min_ms: 5000,
            lifetime_max_ms: 8000,
            weight_min: 1,
            weight_max: 5,
        }
    }
}

impl FruitTuning {
    pub fn fixed(lifetime_ms: u64, weight: u32) -> Self {
        Self {
            lifetime_min_ms: lifetime_ms,
            lifetime_max_ms: lifetime_ms,
            weight_min: weight,
            weight_max: weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fruit {
    pub position: Point,
    pub spawned_at_ms: u64,
    pub lifetime_ms: u64,
    pub weight: u32,
}

impl Fruit {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawned_at_ms) > self.lifetime_ms
    }

    pub fn bounding_box(&self, size: i32) -> Rect {
        Rect::centered_at(self.position, size, size)
    }
}

/// All live fruit. Spawning happens on the periodic timer event and only
/// while the set is under its cap.
#[derive(Clone, Debug)]
pub struct FruitSet {
    fruits: Vec<Fruit>,
    cap: usize,
    size: i32,
    margin: i32,
}

impl FruitSet {
    pub fn new(cap: usize, size: i32, margin: i32) -> Self {
        Self {
            fruits: Vec::new(),
            cap,
            size,
            margin,
        }
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    pub fn fruit_size(&self) -> i32 {
        self.size
    }

    pub fn try_spawn(
        &mut self,
        now_ms: u64,
        arena: ArenaSize,
        tuning: &FruitTuning,
        rng: &mut SessionRng,
    ) -> bool {
        if self.fruits.len() >= self.cap {
            return false;
        }

        // Inset keeps the whole fruit visible inside the walls.
        let position = Point::new(
            rng.random_range(self.margin..=arena.width - self.margin),
            rng.random_range(self.margin..=arena.height - self.margin),
        );
        let lifetime_ms = rng.random_range(tuning.lifetime_min_ms..=tuning.lifetime_max_ms);
        let weight = rng.random_range(tuning.weight_min..=tuning.weight_max);

        self.fruits.push(Fruit {
            position,
            spawned_at_ms: now_ms,
            lifetime_ms,
            weight,
        });
        true
    }

    /// Pure aging check, run every frame whether or not the head is anywhere
    /// near the fruit.
    pub fn expire(&mut self, now_ms: u64) {
        self.fruits.retain(|fruit| !fruit.is_expired(now_ms));
    }

    /// Removes every fruit overlapping the head box and returns the summed
    /// weight. Each fruit counts once; simultaneous overlaps each count.
    pub fn consume_overlapping(&mut self, head_box: &Rect) -> u32 {
        let size = self.size;
        let mut gained = 0;
        self.fruits.retain(|fruit| {
            if head_box.overlaps(&fruit.bounding_box(size)) {
                gained += fruit.weight;
                false
            } else {
                true
            }
        });
        gained
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fruit> {
        self.fruits.iter()
    }

    #[cfg(test)]
    pub fn place(&mut self, fruit: Fruit) {
        self.fruits.push(fruit);
    }
}
