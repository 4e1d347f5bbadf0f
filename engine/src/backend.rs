use crate::game::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Confirm,
    Backspace,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTag {
    FruitSpawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    Timer(TimerTag),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(200, 30, 30);
    pub const GREEN: Color = Color::rgb(30, 200, 30);
    pub const YELLOW: Color = Color::rgb(230, 210, 40);
    pub const BLUE: Color = Color::rgb(70, 110, 230);
    pub const GRAY: Color = Color::rgb(120, 120, 120);
}

/// Drawing contract the rendering backend implements. Coordinates are arena
/// pixels; the backend maps them onto its own surface.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn text(&mut self, text: &str, anchor: Point, size: f32, color: Color);
}
