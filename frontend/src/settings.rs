//! # Settings Module
//!
//! Process-wide theme/accent configuration with an explicit lifecycle: read
//! once from disk at startup, held in memory, written through on every
//! change. Nothing else in the app touches the settings file.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Theme preference; `System` follows the desktop appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "라이트",
            ThemeMode::Dark => "다크",
            ThemeMode::System => "시스템 설정",
        }
    }

    pub fn all() -> [ThemeMode; 3] {
        [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark]
    }
}

/// Accent color applied to selection and interactive highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Indigo,
    Pink,
    Purple,
    Mint,
}

impl Accent {
    pub fn label(&self) -> &'static str {
        match self {
            Accent::Indigo => "인디고",
            Accent::Pink => "핑크",
            Accent::Purple => "퍼플",
            Accent::Mint => "민트",
        }
    }

    /// Accent as `#RRGGBB`.
    pub fn hex(&self) -> &'static str {
        match self {
            Accent::Indigo => "#6366F1",
            Accent::Pink => "#EC4899",
            Accent::Purple => "#8B5CF6",
            Accent::Mint => "#34D399",
        }
    }

    pub fn all() -> [Accent; 4] {
        [Accent::Indigo, Accent::Pink, Accent::Purple, Accent::Mint]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: ThemeMode,
    pub accent: Accent,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            accent: Accent::Indigo,
        }
    }
}

/// In-memory settings plus the file they persist to.
#[derive(Debug)]
pub struct SettingsStore {
    settings: Settings,
    path: PathBuf,
}

impl SettingsStore {
    /// Default settings file under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bizflow").map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Read the settings file once; a missing or unreadable file falls back
    /// to defaults (and is recreated on the next change).
    pub fn load(path: PathBuf) -> Self {
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("⚙️ Settings file unreadable, using defaults: {}", e);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        info!("⚙️ Loaded settings from {:?}: {:?}", path, settings);
        Self { settings, path }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn theme(&self) -> ThemeMode {
        self.settings.theme
    }

    pub fn accent(&self) -> Accent {
        self.settings.accent
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        if self.settings.theme != theme {
            self.settings.theme = theme;
            self.persist();
        }
    }

    pub fn set_accent(&mut self, accent: Accent) {
        if self.settings.accent != accent {
            self.settings.accent = accent;
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = write_settings(&self.path, &self.settings) {
            warn!("⚙️ Failed to persist settings: {:#}", e);
        }
    }
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating settings directory {:?}", parent))?;
    }
    let raw = serde_json::to_string_pretty(settings).context("serializing settings")?;
    fs::write(path, raw).with_context(|| format!("writing settings file {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json"));
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_write_through_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::load(path.clone());
        store.set_theme(ThemeMode::Dark);
        store.set_accent(Accent::Mint);

        // A fresh load observes every change: each setter wrote through
        let reloaded = SettingsStore::load(path);
        assert_eq!(reloaded.theme(), ThemeMode::Dark);
        assert_eq!(reloaded.accent(), Accent::Mint);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let store = SettingsStore::load(path);
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_wire_form_matches_original_keys() {
        let raw = r#"{"theme":"dark","accent":"pink"}"#;
        let parsed: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.theme, ThemeMode::Dark);
        assert_eq!(parsed.accent, Accent::Pink);
    }
}
