//! mkvmerge split argument building.
//!
//! A cut is expressed as a single mkvmerge call in `--split parts:` mode,
//! with every kept span appended to the previous one (`+`), so the output
//! is one file holding only the kept audio.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::{SplitError, SplitResult};
use crate::plan::CutSpan;

static AUDIO_TRACK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Track ID (\d+): audio").expect("audio track regex is valid")
});

static FILENAME_DELAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)DELAY (-?\d+)").expect("delay regex is valid")
});

/// Id of the first audio track in `mkvmerge --identify` output.
pub fn parse_audio_track_id(identify_output: &str) -> Option<u32> {
    AUDIO_TRACK
        .captures(identify_output)
        .and_then(|caps| caps[1].parse().ok())
}

/// Delay in milliseconds from a `DELAY <ms>` tag in a file name,
/// e.g. `track1 DELAY -24ms.aac`.
pub fn delay_from_filename(path: &Path) -> Option<i64> {
    let name = path.file_name()?.to_string_lossy();
    FILENAME_DELAY
        .captures(&name)
        .and_then(|caps| caps[1].parse().ok())
}

/// `--sync` applied to the audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSync {
    pub track_id: u32,
    pub delay_ms: i64,
}

impl TrackSync {
    /// Sync for `input`, if it names a delay and identify found an audio track.
    pub fn detect(identify_output: &str, input: &Path) -> Option<Self> {
        let track_id = parse_audio_track_id(identify_output)?;
        let delay_ms = delay_from_filename(input)?;
        Some(Self { track_id, delay_ms })
    }

    fn argument(&self) -> String {
        format!("{}:{}", self.track_id, self.delay_ms)
    }
}

/// Everything needed for one mkvmerge split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    input: PathBuf,
    output: PathBuf,
    spans: Vec<CutSpan>,
    sync: Option<TrackSync>,
    quiet: bool,
}

impl SplitPlan {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        spans: Vec<CutSpan>,
    ) -> SplitResult<Self> {
        if spans.is_empty() {
            return Err(SplitError::NoParts);
        }
        Ok(Self {
            input: input.into(),
            output: output.into(),
            spans,
            sync: None,
            quiet: false,
        })
    }

    pub fn with_sync(mut self, sync: Option<TrackSync>) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn sync(&self) -> Option<TrackSync> {
        self.sync
    }

    /// `parts:a-b,+c-d,...`
    pub fn parts_argument(&self) -> String {
        let parts: Vec<String> = self
            .spans
            .iter()
            .map(|span| format!("{}-{}", span.start, span.end))
            .collect();
        format!("parts:{}", parts.join(",+"))
    }

    /// Arguments for mkvmerge, without the program itself.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        if self.quiet {
            tokens.push("--quiet".to_string());
        }

        tokens.push("-o".to_string());
        tokens.push(self.output.to_string_lossy().to_string());

        if let Some(sync) = &self.sync {
            tokens.push("--sync".to_string());
            tokens.push(sync.argument());
        }

        tokens.push("--split".to_string());
        tokens.push(self.parts_argument());

        // audio only, no metadata carried over
        for flag in ["-D", "-S", "-B", "-M", "-T", "--no-global-tags", "--no-chapters"] {
            tokens.push(flag.to_string());
        }

        tokens.push(self.input.to_string_lossy().to_string());
        tokens
    }
}

/// Arguments for `mkvmerge --identify`.
pub fn identify_args(input: &Path) -> Vec<String> {
    vec![
        "--output-charset".to_string(),
        "utf-8".to_string(),
        "--identify".to_string(),
        input.to_string_lossy().to_string(),
    ]
}
