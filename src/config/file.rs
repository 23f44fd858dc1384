use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Backend, IrqSource};
use crate::touch::TouchPoint;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: Backend,
    pub touch_device: Option<String>,
    #[serde(default)]
    pub irq_source: IrqSource,
    pub gpio_chip: Option<String>,
    pub int_line: Option<u32>,
    pub irq_poll_us: Option<u64>,
    pub scan_idle_ms: Option<u64>,
    pub shutdown_grace_ms: Option<u64>,
    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockConfig {
    #[serde(default)]
    pub points: Vec<TouchPoint>,
}

pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    parse(&content, path)
}

fn parse(content: &str, path: &Path) -> Option<FileConfig> {
    match toml::from_str(content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_from_default_paths() -> Option<FileConfig> {
    for path in default_config_paths() {
        if path.exists() {
            if let Some(config) = load_from_path(&path) {
                return Some(config);
            }
        }
    }
    None
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("epd-touch.toml"));

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("epd-touch.toml"));
    }

    paths
}
