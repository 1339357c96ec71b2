use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::system::engine::EngineConfig;
use crate::system::ranker::{DEFAULT_CPU_THRESHOLD, DEFAULT_PROCESS_LIMIT, RankPolicy};

pub const MIN_REFRESH_RATE_MS: u64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub processes: ProcessesConfig,
    pub network: NetworkConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub default_view: String,
    /// Empty disables logging.
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            default_view: "scan".to_string(),
            log_file: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessesConfig {
    pub limit: usize,
    pub cpu_threshold: f32,
}

impl Default for ProcessesConfig {
    fn default() -> Self {
        ProcessesConfig {
            limit: DEFAULT_PROCESS_LIMIT,
            cpu_threshold: DEFAULT_CPU_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub excluded_interfaces: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            excluded_interfaces: vec!["lo".to_string(), "lo0".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub toggle_view: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            toggle_view: "Tab".to_string(),
        }
    }
}

impl Config {
    pub fn refresh_rate_ms(&self) -> u64 {
        self.general.refresh_rate_ms.max(MIN_REFRESH_RATE_MS)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rank: RankPolicy {
                cpu_threshold: self.processes.cpu_threshold,
                limit: self.processes.limit,
            },
            excluded_interfaces: self.network.excluded_interfaces.clone(),
        }
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        let path = self.general.log_file.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// Parses a keybind name such as `"q"`, `"Tab"` or `"Esc"`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Space" => Some(KeyCode::Char(' ')),
        "Backspace" => Some(KeyCode::Backspace),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostpulse").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
