mod app;
mod input;
mod painter;
mod store;

use clap::Parser;
use std::path::PathBuf;

use app::ArcadeApp;
use engine::config::{ConfigManager, FileContentConfigProvider, GameConfig};
use engine::game::SessionRng;
use engine::{log, logger};
use store::YamlScoreStore;

#[derive(Parser)]
#[command(name = "snake_arcade")]
struct Args {
    #[arg(long, default_value = "snake_arcade.yaml")]
    config: String,

    #[arg(long, default_value = "scores.yaml")]
    store: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, GameConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config()?;

    let store = YamlScoreStore::open(&args.store)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = SessionRng::new(seed);

    log!(
        "Snake Arcade starting ({}x{} arena, {} fps, seed {}, scores in {})",
        config.arena_width,
        config.arena_height,
        config.target_fps,
        seed,
        args.store.display()
    );

    let viewport = egui::ViewportBuilder::default()
        .with_title("Snake Arcade")
        .with_inner_size([config.arena_width as f32, config.arena_height as f32])
        .with_resizable(false);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Snake Arcade",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ArcadeApp::new(config, Box::new(store), rng)))),
    )?;

    Ok(())
}
