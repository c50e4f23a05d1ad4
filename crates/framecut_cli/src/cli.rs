//! Command line definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use framecut_core::chapters::ChapterFormat;
use framecut_core::time::FrameRate;
use framecut_core::TouchPolicy;

/// Cut audio by video frame ranges and write ordered chapters.
#[derive(Parser, Debug)]
#[clap(name = "framecut", version)]
pub struct Cli {
    /// Settings file [default: .config/framecut.toml if present]
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show cut timestamps, chapters and the mkvmerge call without running it
    Plan {
        /// Job file
        job: PathBuf,

        /// Print the plan as JSON
        #[clap(long)]
        json: bool,
    },

    /// Write the chapter file and cut the audio with mkvmerge
    Cut {
        /// Job file
        job: PathBuf,

        /// Replace an existing output file
        #[clap(long)]
        overwrite: bool,
    },

    /// Convert frame numbers to timestamps
    Ts {
        /// Frame rate, e.g. 24000/1001, 25 or 29.97
        #[clap(long)]
        fps: FrameRate,

        /// Sub-second digits (0, 3, 6, 9, ...)
        #[clap(long, default_value_t = 3)]
        precision: u32,

        /// Frames to convert
        #[clap(required = true)]
        frames: Vec<u64>,
    },

    /// Show or change settings
    Config {
        /// Sub-second digits of split timestamps
        #[clap(long)]
        precision: Option<u32>,

        /// Sub-second digits of chapter timestamps
        #[clap(long)]
        chapter_precision: Option<u32>,

        /// What to do with touching trims
        #[clap(long, value_enum)]
        touch_policy: Option<TouchArg>,

        /// Chapter file layout
        #[clap(long, value_enum)]
        format: Option<FormatArg>,

        /// Path to mkvmerge (empty string to search PATH)
        #[clap(long)]
        mkvmerge: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchArg {
    Merge,
    Reject,
}

impl From<TouchArg> for TouchPolicy {
    fn from(arg: TouchArg) -> Self {
        match arg {
            TouchArg::Merge => TouchPolicy::Merge,
            TouchArg::Reject => TouchPolicy::Reject,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Ogm,
    Table,
}

impl From<FormatArg> for ChapterFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ogm => ChapterFormat::Ogm,
            FormatArg::Table => ChapterFormat::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ts() {
        let cli = Cli::try_parse_from([
            "framecut", "-v", "ts", "--fps", "24000/1001", "--precision", "6", "0", "24",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Ts {
                fps,
                precision,
                frames,
            } => {
                assert_eq!(fps, FrameRate::new(24000, 1001).unwrap());
                assert_eq!(precision, 6);
                assert_eq!(frames, vec![0, 24]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_rate() {
        assert!(Cli::try_parse_from(["framecut", "ts", "--fps", "0/1", "5"]).is_err());
    }

    #[test]
    fn parses_config_flags() {
        let cli = Cli::try_parse_from([
            "framecut",
            "--config",
            "s.toml",
            "config",
            "--touch-policy",
            "reject",
            "--format",
            "table",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
        match cli.command {
            Command::Config {
                touch_policy,
                format,
                ..
            } => {
                assert_eq!(touch_policy.map(TouchPolicy::from), Some(TouchPolicy::Reject));
                assert_eq!(format.map(ChapterFormat::from), Some(ChapterFormat::Table));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
