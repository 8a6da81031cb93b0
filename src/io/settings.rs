//! User settings and on-disk locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::TimerConfig;

/// Overrides the OS directories for both settings and task storage.
pub const DATA_DIR_ENV: &str = "EFFICIENCY_DATA_DIR";

/// The three screens of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Checklist,
    #[serde(rename = "gtd")]
    Prioritize,
    Timer,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Checklist, Tab::Prioritize, Tab::Timer]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Checklist => "Checklist",
            Tab::Prioritize => "Prioritize",
            Tab::Timer => "Timer",
        }
    }
}

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub last_tab: Tab,
}

impl Default for AppSettings {
    fn default() -> Self {
        let timer = TimerConfig::default();
        Self {
            work_minutes: timer.work_minutes,
            break_minutes: timer.break_minutes,
            last_tab: Tab::default(),
        }
    }
}

impl AppSettings {
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(self.work_minutes, self.break_minutes)
    }

    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        std::fs::write(path, json).map_err(|e| e.to_string())?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// Where settings and the local task store live.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::in_dir(PathBuf::from(dir));
        }
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "EfficiencyBoard") {
            Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                data_dir: proj_dirs.data_dir().to_path_buf(),
            }
        } else {
            // Fallback
            Self::in_dir(PathBuf::from("."))
        }
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            config_dir: dir.clone(),
            data_dir: dir,
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}
