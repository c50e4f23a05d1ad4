//! Frame-to-time resolution shared by cut and chapter boundaries.

use serde::{Deserialize, Serialize};

use super::rate::{FrameRate, Seconds};
use super::timeline::{RateSegment, RateTimeline};
use crate::error::TrimResult;
use crate::trims::Trim;

/// Anything that can place a frame on the time axis.
pub trait FrameClock {
    /// Exact start time of `frame`, counted independently from frame 0.
    fn seconds_at(&self, frame: u64) -> TrimResult<Seconds>;

    /// Number of frames the clock covers, if bounded.
    fn total_frames(&self) -> Option<u64>;
}

impl FrameClock for FrameRate {
    fn seconds_at(&self, frame: u64) -> TrimResult<Seconds> {
        Ok(FrameRate::seconds_at(self, frame))
    }

    fn total_frames(&self) -> Option<u64> {
        None
    }
}

impl FrameClock for RateTimeline {
    fn seconds_at(&self, frame: u64) -> TrimResult<Seconds> {
        RateTimeline::seconds_at(self, frame)
    }

    fn total_frames(&self) -> Option<u64> {
        Some(RateTimeline::total_frames(self))
    }
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn seconds_at(&self, frame: u64) -> TrimResult<Seconds> {
        (**self).seconds_at(frame)
    }

    fn total_frames(&self) -> Option<u64> {
        (**self).total_frames()
    }
}

/// Owned clock description as supplied by a media prober or job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// One rate for the whole sequence.
    Constant(FrameRate),
    /// Fixed-rate segments in playback order.
    Variable(Vec<RateSegment>),
}

impl Clock {
    /// Resolve into a concrete clock, building the timeline once.
    pub fn resolve(&self) -> ResolvedClock {
        match self {
            Clock::Constant(rate) => ResolvedClock::Constant(*rate),
            Clock::Variable(segments) => {
                ResolvedClock::Variable(RateTimeline::new(segments.iter().copied()))
            }
        }
    }
}

/// A clock ready for repeated lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedClock {
    Constant(FrameRate),
    Variable(RateTimeline),
}

impl ResolvedClock {
    /// Clock of the output made by keeping `ranges` of this one.
    pub fn keep(&self, ranges: &[Trim]) -> ResolvedClock {
        match self {
            ResolvedClock::Constant(rate) => ResolvedClock::Constant(*rate),
            ResolvedClock::Variable(timeline) => ResolvedClock::Variable(timeline.keep(ranges)),
        }
    }
}

impl FrameClock for ResolvedClock {
    fn seconds_at(&self, frame: u64) -> TrimResult<Seconds> {
        match self {
            ResolvedClock::Constant(rate) => FrameClock::seconds_at(rate, frame),
            ResolvedClock::Variable(timeline) => timeline.seconds_at(frame),
        }
    }

    fn total_frames(&self) -> Option<u64> {
        match self {
            ResolvedClock::Constant(_) => None,
            ResolvedClock::Variable(timeline) => Some(timeline.total_frames()),
        }
    }
}

#[cfg(test)]
mod tests {
    use num_rational::Ratio;

    use super::*;

    #[test]
    fn constant_clock_is_unbounded() {
        let clock = Clock::Constant(FrameRate::from_integer(5).unwrap()).resolve();
        assert_eq!(clock.total_frames(), None);
        assert_eq!(clock.seconds_at(1_000_000).unwrap(), Ratio::from_integer(200_000));
    }

    #[test]
    fn variable_clock_reports_total() {
        let rate = FrameRate::from_integer(24).unwrap();
        let clock = Clock::Variable(vec![RateSegment::new(48, rate)]).resolve();
        assert_eq!(clock.total_frames(), Some(48));
        assert_eq!(clock.seconds_at(24).unwrap(), Ratio::from_integer(1));
        assert!(clock.seconds_at(49).is_err());
    }

    #[test]
    fn keeping_ranges_shortens_variable_clocks_only() {
        let rate = FrameRate::from_integer(24).unwrap();
        let constant = ResolvedClock::Constant(rate);
        assert_eq!(constant.keep(&[Trim::new(10, 20)]), constant);

        let variable = Clock::Variable(vec![RateSegment::new(48, rate)]).resolve();
        assert_eq!(variable.keep(&[Trim::new(10, 20)]).total_frames(), Some(10));
    }

    #[test]
    fn references_are_clocks() {
        fn at<C: FrameClock>(clock: C, frame: u64) -> Seconds {
            clock.seconds_at(frame).unwrap()
        }
        let rate = FrameRate::from_integer(10).unwrap();
        assert_eq!(at(&rate, 5), Ratio::new(1, 2));
    }
}
