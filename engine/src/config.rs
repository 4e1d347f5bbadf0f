use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use crate::game::{ArenaSize, FruitTuning};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for YamlConfigSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!("Failed to read config file: {}", err)),
            },
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }
}

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider: FileContentConfigProvider::new(file_path.to_string()),
            config_serializer: YamlConfigSerializer::new(),
        }
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Missing content means defaults; present content must deserialize and
    /// validate or the load fails loudly.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().unwrap();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(content) = self.config_content_provider.get_config_content()? {
            let config: TConfig = self.config_serializer.deserialize(&content)?;
            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;
            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        let mut current = self.config.lock().unwrap();
        *current = Some(config.clone());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: i32,
    pub arena_height: i32,
    pub target_fps: u32,
    pub head_size: i32,
    pub fruit_size: i32,
    pub fruit_margin: i32,
    pub fruit_cap: usize,
    pub fruit_timer_ms: u64,
    pub fruit_tuning: FruitTuning,
    pub initial_window: usize,
    pub exclusion_buffer: usize,
    pub max_username_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 600,
            arena_height: 600,
            target_fps: 60,
            head_size: 20,
            fruit_size: 20,
            fruit_margin: 40,
            fruit_cap: 5,
            fruit_timer_ms: 1500,
            fruit_tuning: FruitTuning::default(),
            initial_window: 75,
            exclusion_buffer: 50,
            max_username_len: 20,
        }
    }
}

impl GameConfig {
    pub fn arena(&self) -> ArenaSize {
        ArenaSize::new(self.arena_width, self.arena_height)
    }

    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.target_fps as u64
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.arena_width < 100 || self.arena_height < 100 {
            return Err("Arena must be at least 100x100".to_string());
        }
        if self.target_fps < 1 || self.target_fps > 240 {
            return Err("Target FPS must be between 1 and 240".to_string());
        }
        if self.head_size < 1 || self.fruit_size < 1 {
            return Err("Head and fruit sizes must be positive".to_string());
        }
        if self.fruit_margin * 2 >= self.arena_width.min(self.arena_height) {
            return Err("Fruit margin leaves no room to spawn".to_string());
        }
        if self.fruit_margin < self.fruit_size / 2 {
            return Err("Fruit margin must cover at least half the fruit".to_string());
        }
        if self.fruit_cap < 1 {
            return Err("Fruit cap must be at least 1".to_string());
        }
        if self.fruit_timer_ms < 100 {
            return Err("Fruit timer must be at least 100ms".to_string());
        }
        let tuning = &self.fruit_tuning;
        if tuning.lifetime_min_ms > tuning.lifetime_max_ms {
            return Err("Fruit lifetime range is inverted".to_string());
        }
        if tuning.weight_min < 1 || tuning.weight_min > tuning.weight_max {
            return Err("Fruit weight range must start at 1 or more".to_string());
        }
        if self.initial_window < 1 {
            return Err("Initial trail window must be positive".to_string());
        }
        if self.max_username_len < 1 {
            return Err("Username length limit must be positive".to_string());
        }
        Ok(())
    }
}
