//! Configuration management.
//!
//! # Example
//!
//! ```no_run
//! use framecut_core::config::{ConfigManager, ConfigSection};
//! use framecut_core::chapters::ChapterFormat;
//!
//! let mut config = ConfigManager::new(".config/framecut.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Split precision: {}", config.settings().timestamps.precision);
//!
//! config.settings_mut().chapters.format = ChapterFormat::Table;
//! config.update_section(ConfigSection::Chapters).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ChapterSettings, ConfigSection, LoggingSettings, Settings, TimestampSettings, ToolSettings,
    TrimSettings,
};
