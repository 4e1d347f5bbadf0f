use super::types::{ArenaSize, Rect};

pub const WALL_THICKNESS: i32 = 10;

/// Ordered obstacle layouts, one per level, 1-based. Every layout includes
/// the four border walls; the extra walls are derived from arena fractions so
/// the table works for any configured arena size.
#[derive(Clone, Debug)]
pub struct LevelTable {
    layouts: Vec<Vec<Rect>>,
}

impl LevelTable {
    pub fn standard(arena: ArenaSize) -> Self {
        let w = arena.width;
        let h = arena.height;
        let t = WALL_THICKNESS;

        let borders = vec![
            Rect::new(0, 0, w, t),
            Rect::new(0, 0, t, h),
            Rect::new(w - t, 0, t, h),
            Rect::new(0, h - t, w, t),
        ];

        let with_borders = |extra: Vec<Rect>| {
            let mut layout = borders.clone();
            layout.extend(extra);
            layout
        };

        let layouts = vec![
            // Level 1: border only.
            borders.clone(),
            // Level 2: slalom of vertical half-walls.
            with_borders(vec![
                Rect::new(w / 4, 0, t, h / 2),
                Rect::new(w / 2, h / 2, t, h / 2),
                Rect::new(3 * w / 4, 0, t, h / 2),
            ]),
            // Level 3: cross.
            with_borders(vec![
                Rect::new(w / 2 - t / 2, h / 6, t, h - h / 3),
                Rect::new(w / 6, h / 2 - t / 2, w - w / 3, t),
            ]),
            // Level 4: boxes.
            with_borders(vec![
                short_h(arena, w / 6, h / 6),
                long_h(arena, w / 3, h / 3),
                short_v(arena, w / 6, h / 2),
                short_v(arena, 2 * w / 3, 2 * h / 3),
                short_v(arena, 5 * w / 6, h / 2),
            ]),
            // Level 5: maze.
            with_borders(vec![
                short_h(arena, w / 12, h / 6),
                short_h(arena, w / 12, h / 2),
                short_v(arena, w / 12, 11 * h / 24),
                short_v(arena, 5 * w / 12, 0),
                short_h(arena, 7 * w / 12, h / 2),
                short_h(arena, 7 * w / 12, 5 * h / 6),
                short_v(arena, 7 * w / 12, h / 3),
                short_v(arena, 11 * w / 12, 2 * h / 3),
                short_v(arena, 3 * w / 4, h / 12),
            ]),
        ];

        Self { layouts }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// True when `level` runs past the table and the last layout is reused.
    pub fn is_clamped(&self, level: u32) -> bool {
        level as usize > self.layouts.len()
    }

    /// Layout for a 1-based level. Levels beyond the table reuse the last
    /// layout; score grows without bound, so this must stay total.
    pub fn active(&self, level: u32) -> &[Rect] {
        let index = (level.max(1) as usize - 1).min(self.layouts.len() - 1);
        &self.layouts[index]
    }
}

fn short_h(arena: ArenaSize, x: i32, y: i32) -> Rect {
    Rect::new(x, y, arena.width / 3, WALL_THICKNESS)
}

fn long_h(arena: ArenaSize, x: i32, y: i32) -> Rect {
    Rect::new(x, y, arena.width, WALL_THICKNESS)
}

fn short_v(arena: ArenaSize, x: i32, y: i32) -> Rect {
    Rect::new(x, y, WALL_THICKNESS, arena.height / 3)
}
