//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary). Every key
//! is optional; a missing file or a parse error yields defaults. Unknown fields
//! are ignored so older binaries tolerate newer files.
//!
//! ```toml
//! [editor]
//! tab_stop = 4      # clamped to 1..=16
//! quit_times = 3    # extra Ctrl-Q presses needed to quit with unsaved changes
//!
//! [status]
//! message_timeout_secs = 5
//!
//! [input]
//! poll_interval_ms = 100
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";
pub const MAX_TAB_STOP: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        4
    }
    const fn default_quit_times() -> u32 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl StatusConfig {
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: Self::default_poll_interval_ms(),
        }
    }
}

impl InputConfig {
    const fn default_poll_interval_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `./quill.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                file,
                source: Some(path),
            };
            cfg.clamp();
            info!(target: "config", path = ?cfg.source, "config_loaded");
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Bring out-of-range values back into their supported range.
    fn clamp(&mut self) {
        let raw = self.file.editor.tab_stop;
        let clamped = raw.clamp(1, MAX_TAB_STOP);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_stop_clamped");
            self.file.editor.tab_stop = clamped;
        }
    }

    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop
    }

    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.status.message_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.file.input.poll_interval_ms)
    }
}
