//! Chapter types.
//!
//! Chapters are written against the *uncut* source with inclusive ends:
//! `(1, 19, "intro")` is frames 1 through 19. An end may be left out when
//! the chapter runs straight into the next one.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Bound, TrimError, TrimResult};
use crate::trims::Trim;

/// Where a chapter ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum ChapterEnd {
    /// Runs until the frame before the next chapter, or the last frame.
    #[default]
    Continuous,
    /// Inclusive last frame.
    Frame(u64),
}

impl From<Option<u64>> for ChapterEnd {
    fn from(value: Option<u64>) -> Self {
        value.map_or(ChapterEnd::Continuous, ChapterEnd::Frame)
    }
}

impl From<ChapterEnd> for Option<u64> {
    fn from(value: ChapterEnd) -> Self {
        match value {
            ChapterEnd::Continuous => None,
            ChapterEnd::Frame(frame) => Some(frame),
        }
    }
}

/// A chapter as given by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSpec {
    pub start: u64,
    #[serde(default)]
    pub end: ChapterEnd,
    pub name: String,
}

impl ChapterSpec {
    /// A chapter with an explicit inclusive end.
    pub fn new(start: u64, end: u64, name: impl Into<String>) -> Self {
        Self {
            start,
            end: ChapterEnd::Frame(end),
            name: name.into(),
        }
    }

    /// A chapter that runs into the next one.
    pub fn continuous(start: u64, name: impl Into<String>) -> Self {
        Self {
            start,
            end: ChapterEnd::Continuous,
            name: name.into(),
        }
    }
}

/// A chapter with every end resolved to an inclusive frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChapter {
    pub start: u64,
    pub end: u64,
    pub name: String,
}

impl ResolvedChapter {
    /// The half-open range of frames this chapter keeps.
    pub fn as_trim(&self) -> Trim {
        Trim::new(self.start, self.end + 1)
    }
}

/// An ordered list of chapters on the source timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterList {
    pub chapters: Vec<ChapterSpec>,
}

impl ChapterList {
    pub fn new(chapters: Vec<ChapterSpec>) -> Self {
        Self { chapters }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Resolve every end against the next chapter and the frame count.
    ///
    /// - a continuous end becomes the next start minus one, or the last frame
    /// - an end equal to the next start is pulled back one frame
    /// - a last end past the sequence is clamped to the last frame
    /// - a last end of 0 means the last frame
    ///
    /// Corrections are reported as diagnostics. Ordering is not checked here.
    pub fn resolve(&self, frame_count: u64) -> TrimResult<(Vec<ResolvedChapter>, Diagnostics)> {
        if self.chapters.is_empty() {
            return Err(TrimError::EmptyChapters);
        }

        let last_frame = frame_count.saturating_sub(1);
        let mut diagnostics = Diagnostics::new();
        let mut resolved = Vec::with_capacity(self.chapters.len());

        for (index, chapter) in self.chapters.iter().enumerate() {
            if chapter.start >= frame_count {
                return Err(TrimError::out_of_range(
                    index,
                    Bound::Start,
                    chapter.start as i64,
                    frame_count,
                ));
            }

            let end = match (self.chapters.get(index + 1), chapter.end) {
                (Some(next), ChapterEnd::Continuous) => next.start.saturating_sub(1),
                (Some(next), ChapterEnd::Frame(end)) if end == next.start && end > 0 => {
                    diagnostics.push(Diagnostic::ChapterEndAdjusted {
                        index,
                        from: end,
                        to: end - 1,
                    });
                    end - 1
                }
                (Some(_), ChapterEnd::Frame(end)) => end,
                (None, ChapterEnd::Continuous) => last_frame,
                (None, ChapterEnd::Frame(0)) => {
                    diagnostics.push(Diagnostic::ChapterZeroEnd {
                        index,
                        to: last_frame,
                    });
                    last_frame
                }
                (None, ChapterEnd::Frame(end)) if end > last_frame => {
                    diagnostics.push(Diagnostic::ChapterEndClamped {
                        index,
                        from: end,
                        to: last_frame,
                    });
                    last_frame
                }
                (None, ChapterEnd::Frame(end)) => end,
            };

            resolved.push(ResolvedChapter {
                start: chapter.start,
                end,
                name: chapter.name.clone(),
            });
        }

        Ok((resolved, diagnostics))
    }
}
