//! RoomKit Settings Crate
//!
//! Handles designer configuration: snapping, editing defaults, the fallback
//! room, and history depth, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    Config, EditingSettings, GridStep, HistorySettings, LengthDisplay, RoomSettings,
    SnappingSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
