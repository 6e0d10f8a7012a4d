use crate::events::AppEvent;
use async_channel::Sender;
use dialgauge::{Easing, GaugeConfig, GaugeError};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Gauge".to_string(),
            width: 300,
            height: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub easing: Easing,
    /// Used by `animate` commands that carry no duration.
    pub duration_ms: u64,
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            duration_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gauge: GaugeConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid gauge: {0}")]
    Gauge(#[from] GaugeError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "dialgauge", "gauge").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Layers `GAUGE_<SECTION>__<KEY>` environment overrides on top of `builder`.
fn parse_config(builder: Builder) -> Result<Config, ConfigError> {
    let config: Config = builder
        .add_source(
            config::Environment::with_prefix("GAUGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.gauge.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    parse_config(
        config::Config::builder().add_source(config::File::from(config_path).required(false)),
    )
}

pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("No config at {}, using defaults", path.display());
        return Config::default();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialgauge::{Color, Size};

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        parse_config(
            config::Config::builder()
                .add_source(config::File::from_str(source, config::FileFormat::Toml)),
        )
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.gauge.parts_count, 40);
        assert_eq!(config.gauge.dial_size, Size::new(15.0, 4.0));
        assert_eq!(config.gauge.limit_dial_size, Size::new(20.0, 4.0));
        assert_eq!(config.gauge.passed_dial_color, "#0fa3b1".parse::<Color>().unwrap());
        assert_eq!(config.animation.easing, Easing::EaseInOut);
        assert_eq!(config.animation.duration(), Duration::from_secs(1));
        assert_eq!(config.window.width, 300);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = from_toml("[gauge]\nprogress = 0.25\n").unwrap();
        assert_eq!(config.gauge.progress, 0.25);
        assert_eq!(config.gauge.parts_count, 60);
        assert_eq!(config.window.title, "Gauge");
        assert_eq!(config.animation.duration_ms, 1000);
    }

    #[test]
    fn test_invalid_gauge_is_rejected() {
        let err = from_toml("[gauge]\nparts_count = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Gauge(GaugeError::InvalidPartsCount)));

        let err = from_toml("[gauge]\ndial_color = \"not-a-color\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_easing_names() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{ "easing": "linear", "duration_ms": 250 }"#).unwrap();
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.duration(), Duration::from_millis(250));
    }
}
