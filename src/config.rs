//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::color::PRESET_COLORS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Folder the last CSV was saved to or loaded from.
    pub last_directory: Option<PathBuf>,
    /// Color selected in the form on startup.
    pub default_color: String,
    /// Entries of the color dropdown.
    pub presets: Vec<String>,
    /// Chart zoom.
    pub pixels_per_day: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            last_directory: None,
            default_color: PRESET_COLORS[0].to_string(),
            presets: PRESET_COLORS.iter().map(|c| c.to_string()).collect(),
            pixels_per_day: 18.0,
        }
    }
}

impl AppSettings {
    pub fn settings_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "GanttPlanner") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from("settings.json"),
        }
    }

    /// Read settings, falling back to defaults when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                debug!("no settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&text) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!("ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Repair values a hand-edited file may have broken.
    fn sanitized(mut self) -> Self {
        if self.presets.is_empty() {
            self.presets = Self::default().presets;
        }
        if self.default_color.trim().is_empty() {
            self.default_color = self.presets[0].clone();
        }
        if !self.pixels_per_day.is_finite() || self.pixels_per_day <= 0.0 {
            self.pixels_per_day = Self::default().pixels_per_day;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join("settings.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.default_color, "skyblue");
        assert_eq!(settings.presets.len(), 6);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            last_directory: Some(PathBuf::from("/tmp/plans")),
            default_color: "plum".into(),
            pixels_per_day: 30.0,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "default_color": "tan", "presets": [] }"#).unwrap();
        let settings = AppSettings::load(&path);
        assert_eq!(settings.default_color, "tan");
        assert_eq!(settings.presets, AppSettings::default().presets);
        assert_eq!(settings.pixels_per_day, 18.0);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }
}
