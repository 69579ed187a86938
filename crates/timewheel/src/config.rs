use crate::events::AppEvent;
use crate::picker::{
    EXTRA_POINTER_RADIUS, PickerOptions, RangeDescriptor, STEP_OF_MOVING, Surface,
};
use async_channel::Sender;
use clockface::clock::ClockMode;
use clockface::geometry::Point;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SurfaceConfig {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl From<SurfaceConfig> for Surface {
    fn from(cfg: SurfaceConfig) -> Self {
        Surface::new(Point::new(cfg.x, cfg.y), cfg.scale)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_detection_radius")]
    pub detection_radius: f64,
    #[serde(default)]
    pub mode: ClockMode,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub ranges: Vec<RangeDescriptor>,
}

fn default_step() -> f64 {
    STEP_OF_MOVING
}

fn default_detection_radius() -> f64 {
    EXTRA_POINTER_RADIUS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step: default_step(),
            detection_radius: default_detection_radius(),
            mode: ClockMode::default(),
            surface: SurfaceConfig::default(),
            ranges: vec![
                RangeDescriptor::new("08:00", "17:00").with_color("#4a90d9"),
                RangeDescriptor::new("17:00", "08:00").with_color("#808080"),
            ],
        }
    }
}

impl Config {
    pub fn options(&self) -> PickerOptions {
        PickerOptions {
            step: self.step,
            detection_radius: self.detection_radius,
            mode: self.mode,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "timewheel", "timewheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("TIMEWHEEL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    match get_config_path() {
        Ok(path) if !path.exists() => {
            log::info!("No config at {}, using defaults", path.display());
            Config::default()
        }
        Ok(path) => load_config_from(&path).unwrap_or_else(|e| {
            log::error!("Failed to load {}: {}", path.display(), e);
            Config::default()
        }),
        Err(e) => {
            log::error!("{}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn touches_config(event: &notify::Event, path: &Path) -> bool {
    let changed = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    changed && event.paths.iter().any(|p| p == path)
}

/// Watches the directory holding `path` and sends `ConfigReload` whenever the
/// file itself changes.
pub async fn run_async_watcher(path: PathBuf, tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let Some(dir) = path.parent() else {
        return Err(ConfigError::ConfigDirNotFound);
    };

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {} for changes", path.display());

    while let Ok(res) = events_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }

    Ok(())
}
