use eframe::egui;
use engine::{InputEvent, Key};

/// Translates the frame's egui events into the engine's event vocabulary.
pub fn collect_events(ctx: &egui::Context) -> Vec<InputEvent> {
    let mut events = Vec::new();

    ctx.input(|input| {
        if input.viewport().close_requested() {
            events.push(InputEvent::Quit);
        }

        for event in &input.events {
            match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::ArrowUp => events.push(InputEvent::KeyDown(Key::Up)),
                    egui::Key::ArrowDown => events.push(InputEvent::KeyDown(Key::Down)),
                    egui::Key::ArrowLeft => events.push(InputEvent::KeyDown(Key::Left)),
                    egui::Key::ArrowRight => events.push(InputEvent::KeyDown(Key::Right)),
                    egui::Key::Space => events.push(InputEvent::KeyDown(Key::Pause)),
                    egui::Key::Enter => events.push(InputEvent::KeyDown(Key::Confirm)),
                    egui::Key::Backspace => events.push(InputEvent::KeyDown(Key::Backspace)),
                    egui::Key::Escape => events.push(InputEvent::Quit),
                    _ => {}
                },
                egui::Event::Text(text) => {
                    for c in text.chars() {
                        events.push(InputEvent::KeyDown(Key::Char(c)));
                    }
                }
                _ => {}
            }
        }
    });

    events
}
