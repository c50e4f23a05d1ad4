//! Job files.
//!
//! ```toml
//! input = "ep01 DELAY -24ms.aac"
//! frames = 34046
//! fps = "24000/1001"
//!
//! [[trims]]
//! start = 24
//! end = -24
//! ```
//!
//! A job names its frame rate either with `fps` or with `[[segments]]`
//! (`frames`, `fps`) for variable frame rate sources, and its cut either
//! with a single `trim`, a `[[trims]]` list or a `[[chapters]]` list.
//! Relative paths are resolved against the job file's folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use framecut_core::chapters::{ChapterList, ChapterSpec};
use framecut_core::time::{Clock, FrameRate, RateSegment};
use framecut_core::{TrimSelection, TrimSpec};

/// What a job cuts by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobCut {
    Trims(TrimSelection),
    Chapters(ChapterList),
}

/// A parsed job file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub chapter_file: Option<PathBuf>,
    #[serde(default)]
    pub frames: Option<u64>,
    #[serde(default)]
    pub fps: Option<FrameRate>,
    #[serde(default)]
    pub segments: Vec<RateSegment>,
    #[serde(default)]
    pub trim: Option<TrimSpec>,
    #[serde(default)]
    pub trims: Vec<TrimSpec>,
    #[serde(default)]
    pub chapters: Vec<ChapterSpec>,
}

impl JobSpec {
    /// Read a job file and resolve its paths.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        let mut job: JobSpec = toml::from_str(&content)
            .with_context(|| format!("failed to parse job file {}", path.display()))?;

        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        Ok(job)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.input = resolve(&self.input);
        self.output = self.output.as_deref().map(resolve);
        self.chapter_file = self.chapter_file.as_deref().map(resolve);
    }

    /// The clock described by `fps` or `segments`.
    pub fn clock(&self) -> Result<Clock> {
        match (self.fps, self.segments.is_empty()) {
            (Some(rate), true) => Ok(Clock::Constant(rate)),
            (None, false) => Ok(Clock::Variable(self.segments.clone())),
            (Some(_), false) => bail!("use either `fps` or `[[segments]]`, not both"),
            (None, true) => bail!("a frame rate is required: set `fps` or add `[[segments]]`"),
        }
    }

    /// Total frames of the source. Defaults to the sum of the segments.
    pub fn frame_count(&self) -> Result<u64> {
        match self.frames {
            Some(frames) => Ok(frames),
            None if !self.segments.is_empty() => {
                Ok(self.segments.iter().map(|s| s.frames).sum())
            }
            None => bail!("`frames` is required with a constant `fps`"),
        }
    }

    pub fn cut(&self) -> Result<JobCut> {
        let given = [
            self.trim.is_some(),
            !self.trims.is_empty(),
            !self.chapters.is_empty(),
        ];
        ensure!(
            given.iter().filter(|&&g| g).count() == 1,
            "a job needs exactly one of `trim`, `[[trims]]` or `[[chapters]]`"
        );

        if let Some(trim) = self.trim {
            return Ok(JobCut::Trims(TrimSelection::One(trim)));
        }
        if !self.trims.is_empty() {
            return Ok(JobCut::Trims(TrimSelection::Many(self.trims.clone())));
        }
        Ok(JobCut::Chapters(ChapterList::new(self.chapters.clone())))
    }

    /// Output audio path, always with an `.mka` extension.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) if output.extension().is_some_and(|ext| ext == "mka") => output.clone(),
            Some(output) => {
                tracing::warn!(
                    "{} does not have an .mka extension, one will be added",
                    output.display()
                );
                output.with_extension("mka")
            }
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.input.with_file_name(format!("{}_cut.mka", stem))
            }
        }
    }

    /// Chapter file path: `chapter_file`, or the output with `.txt`.
    pub fn chapter_path(&self, output: &Path) -> PathBuf {
        self.chapter_file
            .clone()
            .unwrap_or_else(|| output.with_extension("txt"))
    }
}
