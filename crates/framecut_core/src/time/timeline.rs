//! Variable frame rate timelines built from fixed-rate segments.

use num_rational::Ratio;
use num_traits::CheckedAdd;
use serde::{Deserialize, Serialize};

use super::rate::{FrameRate, Seconds};
use crate::error::{TrimError, TrimResult};
use crate::trims::Trim;

/// A run of `frames` frames played at a single `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSegment {
    pub frames: u64,
    #[serde(rename = "fps")]
    pub rate: FrameRate,
}

impl RateSegment {
    pub fn new(frames: u64, rate: FrameRate) -> Self {
        Self { frames, rate }
    }

    /// Total playback time of this segment.
    pub fn duration(&self) -> Seconds {
        self.rate.seconds_at(self.frames)
    }
}

/// Ordered segments covering frames `[0, total)`.
///
/// Start frame and start time of every segment are accumulated once on
/// construction, so resolving a frame is a binary search plus one
/// multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTimeline {
    segments: Vec<RateSegment>,
    frame_offsets: Vec<u64>,
    time_offsets: Vec<Seconds>,
    total: u64,
}

impl RateTimeline {
    /// Build a timeline. Empty segments carry no frames and are dropped.
    pub fn new(segments: impl IntoIterator<Item = RateSegment>) -> Self {
        let segments: Vec<RateSegment> = segments.into_iter().filter(|s| s.frames > 0).collect();

        let mut frame_offsets = Vec::with_capacity(segments.len());
        let mut time_offsets = Vec::with_capacity(segments.len());
        let mut frame = 0u64;
        let mut time = Ratio::from_integer(0u128);

        for segment in &segments {
            frame_offsets.push(frame);
            time_offsets.push(time);
            frame += segment.frames;
            time += segment.duration();
        }

        tracing::trace!(
            "Built rate timeline: {} segments, {} frames",
            segments.len(),
            frame
        );

        Self {
            segments,
            frame_offsets,
            time_offsets,
            total: frame,
        }
    }

    /// A single-rate timeline of `frames` frames.
    pub fn constant(rate: FrameRate, frames: u64) -> Self {
        Self::new([RateSegment::new(frames, rate)])
    }

    pub fn segments(&self) -> &[RateSegment] {
        &self.segments
    }

    pub fn total_frames(&self) -> u64 {
        self.total
    }

    /// Total playback time of the timeline.
    pub fn duration(&self) -> Seconds {
        match (self.time_offsets.last(), self.segments.last()) {
            (Some(start), Some(segment)) => *start + segment.duration(),
            _ => Ratio::from_integer(0),
        }
    }

    /// Exact start time of `frame`.
    ///
    /// `frame == total_frames()` is the closing boundary of the timeline and
    /// resolves to its full duration.
    pub fn seconds_at(&self, frame: u64) -> TrimResult<Seconds> {
        if frame > self.total {
            return Err(TrimError::FrameOutOfRange {
                frame,
                total: self.total,
            });
        }
        if self.segments.is_empty() {
            return Ok(Ratio::from_integer(0));
        }

        // frame_offsets[0] == 0, so at least one offset is <= frame
        let idx = self.frame_offsets.partition_point(|&start| start <= frame) - 1;
        let into_segment = frame - self.frame_offsets[idx];

        self.time_offsets[idx]
            .checked_add(&self.segments[idx].rate.seconds_at(into_segment))
            .ok_or(TrimError::TimeOverflow { frame })
    }

    /// The timeline left after keeping only `ranges`, played back to back.
    ///
    /// Ranges are half-open and expected in order; anything past the end of
    /// the timeline is ignored.
    pub fn keep(&self, ranges: &[Trim]) -> RateTimeline {
        let mut kept = Vec::new();
        for range in ranges {
            let first = self
                .frame_offsets
                .partition_point(|&start| start <= range.start)
                .saturating_sub(1);
            for (offset, segment) in self.frame_offsets[first..]
                .iter()
                .zip(&self.segments[first..])
            {
                if *offset >= range.end {
                    break;
                }
                let from = range.start.max(*offset);
                let to = range.end.min(offset + segment.frames);
                if to > from {
                    kept.push(RateSegment::new(to - from, segment.rate));
                }
            }
        }
        RateTimeline::new(kept)
    }
}
