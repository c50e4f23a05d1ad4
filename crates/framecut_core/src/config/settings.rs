//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chapters::ChapterFormat;
use crate::logging::LogLevel;
use crate::plan::PlanOptions;
use crate::time::Precision;
use crate::trims::TouchPolicy;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Timestamp rendering.
    #[serde(default)]
    pub timestamps: TimestampSettings,

    /// Trim list handling.
    #[serde(default)]
    pub trims: TrimSettings,

    /// Chapter file output.
    #[serde(default)]
    pub chapters: ChapterSettings,

    /// External tools.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Planner options from these settings.
    ///
    /// Precisions are checked by [`super::ConfigManager`] on load; an
    /// invalid value here falls back to the default.
    pub fn plan_options(&self) -> PlanOptions {
        let defaults = PlanOptions::default();
        PlanOptions {
            touch_policy: self.trims.touch_policy,
            cut_precision: Precision::new(self.timestamps.precision)
                .unwrap_or(defaults.cut_precision),
            chapter_precision: Precision::new(self.timestamps.chapter_precision)
                .unwrap_or(defaults.chapter_precision),
        }
    }
}

/// Timestamp rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampSettings {
    /// Sub-second digits of split timestamps (multiple of 3, at most 18).
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Sub-second digits of chapter timestamps.
    #[serde(default = "default_chapter_precision")]
    pub chapter_precision: u32,
}

fn default_precision() -> u32 {
    9
}

fn default_chapter_precision() -> u32 {
    3
}

impl Default for TimestampSettings {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            chapter_precision: default_chapter_precision(),
        }
    }
}

/// Trim list settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimSettings {
    /// What to do with trims that touch: "merge" or "reject".
    #[serde(default)]
    pub touch_policy: TouchPolicy,
}

/// Chapter file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSettings {
    /// "ogm" or "table".
    #[serde(default)]
    pub format: ChapterFormat,

    /// Name column width of the table format.
    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

fn default_name_width() -> usize {
    12
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self {
            format: ChapterFormat::default(),
            name_width: default_name_width(),
        }
    }
}

/// External tool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Path to mkvmerge. Empty means search PATH.
    #[serde(default)]
    pub mkvmerge_path: String,

    /// Pass --quiet to mkvmerge.
    #[serde(default)]
    pub quiet: bool,
}

impl ToolSettings {
    pub fn mkvmerge_path(&self) -> Option<PathBuf> {
        (!self.mkvmerge_path.is_empty()).then(|| PathBuf::from(&self.mkvmerge_path))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Folder for daily log files. Empty disables file logging.
    #[serde(default)]
    pub logs_folder: String,
}

impl LoggingSettings {
    pub fn logs_folder(&self) -> Option<PathBuf> {
        (!self.logs_folder.is_empty()).then(|| PathBuf::from(&self.logs_folder))
    }
}

/// Identifies a config section for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Timestamps,
    Trims,
    Chapters,
    Tools,
    Logging,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Timestamps,
        ConfigSection::Trims,
        ConfigSection::Chapters,
        ConfigSection::Tools,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Timestamps => "timestamps",
            ConfigSection::Trims => "trims",
            ConfigSection::Chapters => "chapters",
            ConfigSection::Tools => "tools",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Timestamps => "Timestamp precision (sub-second digits, multiple of 3)",
            ConfigSection::Trims => "Trim list handling",
            ConfigSection::Chapters => "Chapter file output",
            ConfigSection::Tools => "External tools",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[timestamps]"));
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("touch_policy = \"merge\""));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[chapters]\nformat = \"table\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.chapters.format, ChapterFormat::Table);
        assert_eq!(parsed.chapters.name_width, 12);
        assert_eq!(parsed.timestamps.precision, 9);
        assert_eq!(parsed.tools.mkvmerge_path(), None);
    }

    #[test]
    fn plan_options_follow_settings() {
        let mut settings = Settings::default();
        settings.trims.touch_policy = TouchPolicy::Reject;
        settings.timestamps.precision = 6;
        let options = settings.plan_options();
        assert_eq!(options.touch_policy, TouchPolicy::Reject);
        assert_eq!(options.cut_precision, Precision::MICROS);
        assert_eq!(options.chapter_precision, Precision::MILLIS);
    }
}
