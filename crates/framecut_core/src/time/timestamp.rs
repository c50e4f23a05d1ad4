//! Rendering exact durations as `HH:MM:SS[.fff…]` timestamps.
//!
//! Rendering happens once, at the very end: frame positions are turned into
//! exact rationals by a [`FrameClock`] and only then rounded to the chosen
//! number of sub-second digits. Nothing is accumulated between calls, so
//! long sequences never drift.

use num_rational::Ratio;
use num_traits::CheckedMul;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::rate::{FrameRate, Seconds};
use super::timeline::RateTimeline;
use crate::error::{TrimError, TrimResult};

/// Number of sub-second digits in a rendered timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// Whole seconds.
    pub const SECONDS: Self = Self(0);
    /// Milliseconds.
    pub const MILLIS: Self = Self(3);
    /// Microseconds.
    pub const MICROS: Self = Self(6);
    /// Nanoseconds.
    pub const NANOS: Self = Self(9);

    const MAX_DIGITS: u32 = 18;

    /// Validate a digit count: a multiple of 3, at most 18.
    pub fn new(digits: u32) -> TrimResult<Self> {
        if digits % 3 != 0 || digits > Self::MAX_DIGITS {
            return Err(TrimError::InvalidPrecision(digits));
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }

    fn scale(self) -> u128 {
        10u128.pow(self.0)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::MILLIS
    }
}

impl TryFrom<u32> for Precision {
    type Error = TrimError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Precision> for u32 {
    fn from(value: Precision) -> Self {
        value.0
    }
}

/// Format an exact duration, rounding to the nearest `10^-digits` second
/// with ties to even.
///
/// Returns `None` when the scaled duration does not fit in 128 bits.
pub fn format_seconds(seconds: &Seconds, precision: Precision) -> Option<String> {
    let scale = precision.scale();
    let units = round_half_even(&seconds.checked_mul(&Ratio::from_integer(scale))?)?;

    let whole = units / scale;
    let fraction = units % scale;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    let rendered = match precision.digits() {
        0 => format!("{:02}:{:02}:{:02}", hours, minutes, secs),
        digits => format!(
            "{:02}:{:02}:{:02}.{:0width$}",
            hours,
            minutes,
            secs,
            fraction,
            width = digits as usize
        ),
    };
    Some(rendered)
}

fn round_half_even(value: &Seconds) -> Option<u128> {
    let floor = value.floor().to_integer();
    let fract = value.fract();
    let half = Ratio::new(1, 2);
    if fract > half || (fract == half && floor % 2 == 1) {
        floor.checked_add(1)
    } else {
        Some(floor)
    }
}

fn render(seconds: &Seconds, frame: u64, precision: Precision) -> TrimResult<String> {
    format_seconds(seconds, precision).ok_or(TrimError::TimeOverflow { frame })
}

/// Timestamp of `frame` at a constant `rate`.
pub fn to_timestamp(rate: FrameRate, frame: u64, precision: u32) -> TrimResult<String> {
    let precision = Precision::new(precision)?;
    render(&rate.seconds_at(frame), frame, precision)
}

/// Timestamp of `frame` on a variable frame rate timeline.
pub fn to_timestamp_vfr(
    timeline: &RateTimeline,
    frame: u64,
    precision: u32,
) -> TrimResult<String> {
    let precision = Precision::new(precision)?;
    render(&timeline.seconds_at(frame)?, frame, precision)
}

/// A clock paired with a precision, reused for every boundary of a job.
#[derive(Debug, Clone)]
pub struct Timestamper<C> {
    clock: C,
    precision: Precision,
}

impl<C: FrameClock> Timestamper<C> {
    pub fn new(clock: C, precision: Precision) -> Self {
        Self { clock, precision }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Render a single frame.
    pub fn timestamp(&self, frame: u64) -> TrimResult<String> {
        let seconds = self.clock.seconds_at(frame)?;
        render(&seconds, frame, self.precision)
    }

    /// Render every frame, failing on the first one the clock rejects.
    pub fn timestamps(&self, frames: &[u64]) -> TrimResult<Vec<String>> {
        frames.iter().map(|&frame| self.timestamp(frame)).collect()
    }
}
