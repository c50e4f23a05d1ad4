//! Job planning: user trims or chapters in, cut ranges and timestamps out.
//!
//! Planning is pure. Nothing here touches the filesystem or runs tools;
//! the resulting plans are handed to [`crate::split::SplitPlan`] and a
//! [`crate::chapters::ChapterSink`].

use serde::{Deserialize, Serialize};

use crate::chapters::{compress_chapters, ChapterList, ChapterMark, ResolvedChapter};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{TrimError, TrimResult};
use crate::time::{FrameClock, Precision, ResolvedClock, Timestamper};
use crate::trims::{
    merge_adjacent, merge_touching, normalize_trims, validate_trims, zip_trims, FrameIndex, TouchPolicy,
    Trim, TrimSpec,
};

/// Either one bare trim or a list of trims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimSelection {
    One(TrimSpec),
    Many(Vec<TrimSpec>),
}

impl TrimSelection {
    pub fn specs(&self) -> &[TrimSpec] {
        match self {
            TrimSelection::One(spec) => std::slice::from_ref(spec),
            TrimSelection::Many(specs) => specs,
        }
    }
}

impl From<TrimSpec> for TrimSelection {
    fn from(spec: TrimSpec) -> Self {
        TrimSelection::One(spec)
    }
}

impl From<Vec<TrimSpec>> for TrimSelection {
    fn from(specs: Vec<TrimSpec>) -> Self {
        TrimSelection::Many(specs)
    }
}

/// Knobs shared by both planners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    pub touch_policy: TouchPolicy,
    /// Digits for split timestamps.
    pub cut_precision: Precision,
    /// Digits for chapter timestamps.
    pub chapter_precision: Precision,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            touch_policy: TouchPolicy::Merge,
            cut_precision: Precision::NANOS,
            chapter_precision: Precision::MILLIS,
        }
    }
}

/// A kept range rendered as timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSpan {
    pub start: String,
    pub end: String,
}

/// Merged keep ranges of the source and their timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutPlan {
    pub frame_count: u64,
    pub trims: Vec<Trim>,
    pub spans: Vec<CutSpan>,
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl CutPlan {
    /// Plan a cut from user trims.
    pub fn build(
        frame_count: u64,
        clock: &ResolvedClock,
        selection: &TrimSelection,
        options: &PlanOptions,
    ) -> TrimResult<Self> {
        check_clock(frame_count, clock)?;

        let specs = selection.specs();
        let mut diagnostics = Diagnostics::new();
        if matches!(selection, TrimSelection::Many(specs) if specs.len() == 1) {
            diagnostics.push(Diagnostic::SingleTrimList);
        }
        for (index, spec) in specs.iter().enumerate() {
            if spec.end == FrameIndex::At(0) {
                diagnostics.push(Diagnostic::LegacyZeroEnd { index });
            }
        }

        let trims = normalize_trims(frame_count, specs)?;
        let report = validate_trims(&trims, options.touch_policy)?;
        for index in report.touching {
            diagnostics.push(Diagnostic::TouchingTrims {
                index,
                frame: trims[index].end,
            });
        }

        let merged = merge_adjacent(&trims);
        Self::from_trims(frame_count, clock, merged, options.cut_precision, diagnostics)
    }

    fn from_trims(
        frame_count: u64,
        clock: &ResolvedClock,
        trims: Vec<Trim>,
        precision: Precision,
        diagnostics: Diagnostics,
    ) -> TrimResult<Self> {
        let stamper = Timestamper::new(clock, precision);
        let spans = trims
            .iter()
            .map(|trim| {
                Ok(CutSpan {
                    start: stamper.timestamp(trim.start)?,
                    end: stamper.timestamp(trim.end)?,
                })
            })
            .collect::<TrimResult<Vec<_>>>()?;

        tracing::debug!(
            "Planned {} cuts over {} frames",
            trims.len(),
            frame_count
        );

        Ok(Self {
            frame_count,
            trims,
            spans,
            diagnostics,
        })
    }

    /// Number of frames kept by the cut.
    pub fn kept_frames(&self) -> u64 {
        self.trims.iter().map(Trim::len).sum()
    }
}

/// A chapter list turned into a cut plus chapter marks on the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterPlan {
    pub chapters: Vec<ResolvedChapter>,
    pub cut: CutPlan,
    pub marks: Vec<ChapterMark>,
}

impl ChapterPlan {
    /// Plan an ordered-chapters cut.
    ///
    /// Every frame inside a chapter is kept. Chapter marks are timed on the
    /// output, so a variable rate clock is spliced to the kept frames first.
    pub fn build(
        frame_count: u64,
        clock: &ResolvedClock,
        list: &ChapterList,
        options: &PlanOptions,
    ) -> TrimResult<Self> {
        check_clock(frame_count, clock)?;

        let (chapters, diagnostics) = list.resolve(frame_count)?;
        let starts: Vec<u64> = chapters.iter().map(|c| c.start).collect();
        let ends: Vec<u64> = chapters.iter().map(|c| c.end).collect();

        let (virtual_starts, virtual_ends) = compress_chapters(&starts, &ends)?;
        let (cut_starts, cut_ends) = merge_touching(&starts, &ends)?;
        let cut = CutPlan::from_trims(
            frame_count,
            clock,
            zip_trims(&cut_starts, &cut_ends),
            options.cut_precision,
            diagnostics,
        )?;

        let output_clock = clock.keep(&cut.trims);
        let stamper = Timestamper::new(&output_clock, options.chapter_precision);
        let last = chapters.len() - 1;
        let marks = chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| {
                // only the last end already closes its chapter
                let end = if i == last {
                    virtual_ends[i]
                } else {
                    virtual_ends[i] + 1
                };
                Ok(ChapterMark {
                    start: stamper.timestamp(virtual_starts[i])?,
                    end: stamper.timestamp(end)?,
                    name: chapter.name.clone(),
                })
            })
            .collect::<TrimResult<Vec<_>>>()?;

        Ok(Self {
            chapters,
            cut,
            marks,
        })
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.cut.diagnostics
    }
}

fn check_clock(frame_count: u64, clock: &ResolvedClock) -> TrimResult<()> {
    match clock.total_frames() {
        Some(total) if frame_count > total => Err(TrimError::FrameOutOfRange {
            frame: frame_count,
            total,
        }),
        _ => Ok(()),
    }
}
