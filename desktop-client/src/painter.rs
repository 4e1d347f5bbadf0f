use eframe::egui;
use engine::game::{Point, Rect};
use engine::{Color, DrawSurface};

/// Adapts an egui painter to the engine's drawing contract. Arena pixels map
/// 1:1 onto the panel, offset by its origin.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

impl DrawSurface for EguiSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, to_color32(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = self.origin + egui::vec2(rect.x as f32, rect.y as f32);
        let target = egui::Rect::from_min_size(min, egui::vec2(rect.w as f32, rect.h as f32));
        self.painter.rect_filled(target, 0.0, to_color32(color));
    }

    fn text(&mut self, text: &str, anchor: Point, size: f32, color: Color) {
        let pos = self.origin + egui::vec2(anchor.x as f32, anchor.y as f32);
        self.painter.text(
            pos,
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(size),
            to_color32(color),
        );
    }
}
