//! Lava Runner - a tile-based platformer simulation core
//!
//! Core modules:
//! - `domain`: Vectors, tiles, actors and their collision rules
//! - `sim`: Level parsing, the per-frame step, and the game driver
//! - `config`: `config.toml` loading
//! - `error`: Driver errors

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;
