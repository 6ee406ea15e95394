use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const ORGANIZATION: &str = "hiyoko";
const APPLICATION: &str = "hiyoko-viewer";
const SETTINGS_FILE: &str = "settings.toml";

/// Window geometry restored on startup and saved on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub maximized: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

impl WindowSettings {
    pub fn position(&self) -> Option<[f32; 2]> {
        Some([self.x?, self.y?])
    }

    pub fn inner_size(&self) -> [f32; 2] {
        [self.width.max(320.0), self.height.max(240.0)]
    }
}

pub fn settings_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(ORGANIZATION).join(APPLICATION).join(SETTINGS_FILE))
}

pub fn load_settings(path: &Path) -> Option<WindowSettings> {
    let text = fs::read_to_string(path).ok()?;
    match toml::from_str::<WindowSettings>(&text) {
        Ok(settings) => Some(settings),
        Err(err) => {
            log::warn!("Ignoring malformed settings {}: {err}", path.display());
            None
        }
    }
}

pub fn save_settings(path: &Path, settings: &WindowSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    let text = toml::to_string(settings).context("Cannot serialize window settings")?;
    fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(())
}
