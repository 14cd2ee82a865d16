/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub general: GeneralConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub frame_seconds: f64,         // simulated time per driver frame
    pub max_step: f64,              // longest single sub-step
    pub max_ticks_per_attempt: u32, // headless cut-off per level attempt
    pub max_attempts: u32,          // retries of a lost level before giving up
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneralConfig {
    pub seed: Option<u64>, // fixed coin phases; random when absent
    pub dump_json: bool,   // print the final level state as JSON
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_frame_seconds")]
    frame_seconds: f64,
    #[serde(default = "default_max_step")]
    max_step: f64,
    #[serde(default = "default_max_ticks")]
    max_ticks_per_attempt: u32,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dump_json: bool,
}

// ── Defaults ──

fn default_frame_seconds() -> f64 { 1.0 / 60.0 }
fn default_max_step() -> f64 { 0.05 }
fn default_max_ticks() -> u32 { 3600 } // one minute at 60 fps
fn default_max_attempts() -> u32 { 3 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            frame_seconds: default_frame_seconds(),
            max_step: default_max_step(),
            max_ticks_per_attempt: default_max_ticks(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    /// Parse config text. Invalid TOML falls back to defaults with a warning.
    pub fn from_toml_str(text: &str) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => GameConfig::from_toml(cfg),
            Err(e) => {
                log::warn!("config.toml parse error: {e}; using default settings");
                GameConfig::default()
            }
        }
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                frame_seconds: positive_or_default(
                    "frame_seconds", cfg.speed.frame_seconds, default_frame_seconds(),
                ),
                max_step: positive_or_default("max_step", cfg.speed.max_step, default_max_step()),
                max_ticks_per_attempt: cfg.speed.max_ticks_per_attempt,
                max_attempts: cfg.speed.max_attempts.max(1),
            },
            general: GeneralConfig {
                seed: cfg.general.seed,
                dump_json: cfg.general.dump_json,
            },
        }
    }
}

/// Durations must be positive and finite; anything else falls back.
fn positive_or_default(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("config.toml: {key} = {value} is not a positive duration; using {default}");
        default
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            return read_toml(&path).unwrap_or_default();
        }
    }
    TomlConfig::default()
}

fn read_toml(path: &Path) -> Option<TomlConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str::<TomlConfig>(&text) {
        Ok(cfg) => {
            log::debug!("loaded {}", path.display());
            Some(cfg)
        }
        Err(e) => {
            log::warn!("config.toml parse error: {e}; using default settings");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let cfg = GameConfig::from_toml_str("");
        assert_eq!(cfg, GameConfig::default());
        assert!((cfg.speed.max_step - 0.05).abs() < 1e-12);
        assert_eq!(cfg.speed.max_attempts, 3);
        assert_eq!(cfg.general.seed, None);
        assert!(!cfg.general.dump_json);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[speed]\nmax_ticks_per_attempt = 10\n\n[general]\nseed = 42\n",
        );
        assert_eq!(cfg.speed.max_ticks_per_attempt, 10);
        assert!((cfg.speed.frame_seconds - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(cfg.general.seed, Some(42));
    }

    #[test]
    fn invalid_toml_falls_back() {
        let cfg = GameConfig::from_toml_str("[speed\nmax_step = ");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn non_finite_durations_fall_back() {
        let cfg = GameConfig::from_toml_str("[speed]\nframe_seconds = inf\nmax_step = nan\n");
        assert_eq!(cfg.speed, GameConfig::default().speed);
    }

    #[test]
    fn non_positive_durations_fall_back() {
        let cfg = GameConfig::from_toml_str("[speed]\nframe_seconds = -0.5\nmax_step = 0.0\n");
        assert!((cfg.speed.frame_seconds - 1.0 / 60.0).abs() < 1e-12);
        assert!((cfg.speed.max_step - 0.05).abs() < 1e-12);

        let cfg = GameConfig::from_toml_str("[speed]\nframe_seconds = 0.02\nmax_step = 0.01\n");
        assert!((cfg.speed.frame_seconds - 0.02).abs() < 1e-12);
        assert!((cfg.speed.max_step - 0.01).abs() < 1e-12);
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let cfg = GameConfig::from_toml_str("[speed]\nmax_attempts = 0\n");
        assert_eq!(cfg.speed.max_attempts, 1);
    }
}
