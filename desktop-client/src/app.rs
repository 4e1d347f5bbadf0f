use std::time::{Duration, Instant};

use eframe::egui;
use engine::config::GameConfig;
use engine::game::SessionRng;
use engine::scene::SceneMachine;
use engine::storage::ScoreStore;
use engine::{InputEvent, TimerTag};

use crate::input::collect_events;
use crate::painter::EguiSurface;

// Keep the game-over screen on for a moment before the window closes.
const GAME_OVER_LINGER_MS: u64 = 2000;
const MAX_CATCHUP_TICKS: u32 = 5;

pub struct ArcadeApp {
    machine: SceneMachine,
    started: Instant,
    tick_interval_ms: u64,
    next_tick_ms: u64,
    fruit_timer_ms: u64,
    last_fruit_timer_ms: u64,
    stopped_at_ms: Option<u64>,
    quit_requested: bool,
}

impl ArcadeApp {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, rng: SessionRng) -> Self {
        let tick_interval_ms = config.tick_interval_ms();
        let fruit_timer_ms = config.fruit_timer_ms;
        Self {
            machine: SceneMachine::new(config, store, rng),
            started: Instant::now(),
            tick_interval_ms,
            next_tick_ms: tick_interval_ms,
            fruit_timer_ms,
            last_fruit_timer_ms: 0,
            stopped_at_ms: None,
            quit_requested: false,
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl eframe::App for ArcadeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now_ms();

        let mut events = collect_events(ctx);
        if events.iter().any(|e| matches!(e, InputEvent::Quit)) {
            self.quit_requested = true;
        }
        if now.saturating_sub(self.last_fruit_timer_ms) >= self.fruit_timer_ms {
            events.push(InputEvent::Timer(TimerTag::FruitSpawn));
            self.last_fruit_timer_ms = now;
        }
        self.machine.handle_events(&events, now);

        let mut ticks = 0;
        while now >= self.next_tick_ms && ticks < MAX_CATCHUP_TICKS {
            self.machine.update(self.next_tick_ms);
            self.next_tick_ms += self.tick_interval_ms;
            ticks += 1;
        }
        if now >= self.next_tick_ms {
            // Fell too far behind (hidden window, suspend); resync instead of
            // replaying the gap.
            self.next_tick_ms = now + self.tick_interval_ms;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let mut surface = EguiSurface::new(ui.painter(), ui.min_rect().min);
                self.machine.draw(&mut surface);
            });

        if self.machine.running() {
            let wait = self.next_tick_ms.saturating_sub(self.now_ms());
            ctx.request_repaint_after(Duration::from_millis(wait.max(1)));
        } else if self.quit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else {
            let stopped_at = *self.stopped_at_ms.get_or_insert(now);
            if now.saturating_sub(stopped_at) >= GAME_OVER_LINGER_MS {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            } else {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }
    }
}
