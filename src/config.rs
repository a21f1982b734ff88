use serde::Deserialize;
use std::path::PathBuf;
use directories::{BaseDirs, ProjectDirs};
use anyhow::Result;
use std::fs;
use log::debug;

use crate::destination::Destinations;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub icons: IconConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PathConfig {
    /// Defaults to `$XDG_DATA_HOME/applications`.
    #[serde(default)]
    pub user_applications: Option<PathBuf>,
    #[serde(default = "default_system_applications")]
    pub system_applications: PathBuf,
}

fn default_system_applications() -> PathBuf { PathBuf::from("/usr/share/applications") }

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            user_applications: None,
            system_applications: default_system_applications(),
        }
    }
}

impl PathConfig {
    pub fn destinations(&self) -> Destinations {
        let user = self.user_applications.clone().unwrap_or_else(|| {
            match BaseDirs::new() {
                Some(dirs) => dirs.data_dir().join("applications"),
                None => PathBuf::from(".local/share/applications"),
            }
        });

        Destinations {
            user,
            system: self.system_applications.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct IconConfig {
    #[serde(default = "default_theme_paths")]
    pub theme_paths: Vec<PathBuf>,
    #[serde(default = "default_preview_size")]
    pub preview_size: u32,
}

fn default_preview_size() -> u32 { 64 }

fn default_theme_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = BaseDirs::new() {
        paths.push(home.data_dir().join("icons"));
    }
    paths.push(PathBuf::from("/usr/share/icons"));
    paths.push(PathBuf::from("/usr/share/pixmaps"));
    paths
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            theme_paths: default_theme_paths(),
            preview_size: default_preview_size(),
        }
    }
}

pub fn config_path() -> PathBuf {
    match ProjectDirs::from("org", "deskedit", "deskedit") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config() -> Result<Config> {
    let config_path = config_path();

    if !config_path.exists() {
        debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&content)?;
    debug!("Loaded config from {:?}", config_path);
    Ok(config)
}
