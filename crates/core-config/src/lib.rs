//! Configuration loading and parsing.
//!
//! Parses `minied.toml` (or an override path provided by the binary). Three tables are read:
//!
//! ```toml
//! [editor]
//! tab_stop = 8
//! quit_times = 3
//! message_timeout_secs = 5
//!
//! [input]
//! escape_timeout_ms = 100
//!
//! [limits]
//! max_lines = 100
//! max_line_len = 256
//! ```
//!
//! Every key is optional. Unknown fields are ignored. A missing file or a file that fails to
//! parse yields the defaults; the editor never refuses to start over its config. Raw values
//! are kept as parsed and clamped only when read through the typed accessors.

use anyhow::Result;
use core_text::Limits;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "minied.toml";

/// Bounds for the per-byte escape sequence wait.
pub const ESCAPE_TIMEOUT_MIN_MS: u64 = 10;
pub const ESCAPE_TIMEOUT_MAX_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    /// Ctrl-Q presses needed to leave with unsaved changes.
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u8,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        8
    }
    const fn default_quit_times() -> u8 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_max_lines")]
    pub max_lines: usize,
    /// Includes the reserved terminator slot.
    #[serde(default = "LimitsConfig::default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
            max_line_len: Self::default_max_line_len(),
        }
    }
}

impl LimitsConfig {
    const fn default_max_lines() -> usize {
        Limits::DEFAULT_MAX_LINES
    }
    const fn default_max_line_len() -> usize {
        Limits::DEFAULT_MAX_LINE_LEN
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Config path: `minied.toml` in the working directory, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("minied").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Document capacity; `Limits::new` enforces the minimums.
    pub fn limits(&self) -> Limits {
        Limits::new(self.file.limits.max_lines, self.file.limits.max_line_len)
    }

    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop.max(1)
    }

    pub fn quit_times(&self) -> u8 {
        self.file.editor.quit_times.max(1)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }

    /// Per-byte wait inside an escape sequence, clamped to a usable range.
    pub fn escape_timeout(&self) -> Duration {
        let raw = self.file.input.escape_timeout_ms;
        let clamped = raw.clamp(ESCAPE_TIMEOUT_MIN_MS, ESCAPE_TIMEOUT_MAX_MS);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                min = ESCAPE_TIMEOUT_MIN_MS,
                max = ESCAPE_TIMEOUT_MAX_MS,
                "escape_timeout_clamped"
            );
        }
        Duration::from_millis(clamped)
    }
}
