//! Error types for trim, chapter and timestamp operations.
//!
//! Every error carries the offending value and its position in the input
//! so a caller can point at the faulty trim without inspecting state.

use std::fmt;

use thiserror::Error;

/// Which side of a trim an index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => write!(f, "start"),
            Bound::End => write!(f, "end"),
        }
    }
}

/// The specific ordering rule a trim list broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderViolation {
    /// `starts[index] >= starts[index + 1]`.
    NonMonotonic {
        index: usize,
        start: u64,
        next_start: u64,
    },
    /// `ends[index] > starts[index + 1]`.
    Overlap {
        index: usize,
        end: u64,
        next_start: u64,
    },
    /// `ends[index] == starts[index + 1]` while touching ranges are rejected.
    Touching { index: usize, frame: u64 },
    /// `starts[index] >= ends[index]`.
    ZeroLength { index: usize, start: u64, end: u64 },
}

impl OrderViolation {
    /// Index of the first trim involved in the violation.
    pub fn index(&self) -> usize {
        match self {
            OrderViolation::NonMonotonic { index, .. }
            | OrderViolation::Overlap { index, .. }
            | OrderViolation::Touching { index, .. }
            | OrderViolation::ZeroLength { index, .. } => *index,
        }
    }
}

impl fmt::Display for OrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderViolation::NonMonotonic {
                index,
                start,
                next_start,
            } => write!(
                f,
                "non-monotonic starts: trim {} starts at {} but trim {} starts at {}",
                index,
                start,
                index + 1,
                next_start
            ),
            OrderViolation::Overlap {
                index,
                end,
                next_start,
            } => write!(
                f,
                "overlapping trims: trim {} ends at {} after trim {} starts at {}",
                index,
                end,
                index + 1,
                next_start
            ),
            OrderViolation::Touching { index, frame } => write!(
                f,
                "touching trims: trim {} ends where trim {} starts (frame {})",
                index,
                index + 1,
                frame
            ),
            OrderViolation::ZeroLength { index, start, end } => write!(
                f,
                "zero-length trim {}: start {} is not before end {}",
                index, start, end
            ),
        }
    }
}

/// Errors produced by the pure frame/time core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrimError {
    /// Index magnitude exceeds the total frame count.
    #[error("{bound} index {value} of trim {position} is out of bounds for {frame_count} frames")]
    OutOfRange {
        position: usize,
        bound: Bound,
        value: i64,
        frame_count: u64,
    },

    /// Two parallel lists differ in length.
    #[error("lists must be the same length ({starts} starts, {ends} ends)")]
    LengthMismatch { starts: usize, ends: usize },

    /// The trim list is not strictly ordered.
    #[error("trims are not ordered: {0}")]
    NotOrdered(OrderViolation),

    /// Timestamp precision is not a multiple of 3.
    #[error("precision must be a multiple of 3 between 0 and 18, got {0}")]
    InvalidPrecision(u32),

    /// A frame lies past the end of a rate timeline.
    #[error("frame {frame} is beyond the end of the timeline ({total} frames)")]
    FrameOutOfRange { frame: u64, total: u64 },

    /// A frame rate has a zero numerator or denominator, or cannot be parsed.
    #[error("invalid frame rate: {0}")]
    InvalidRate(String),

    /// A chapter operation was given no chapters.
    #[error("at least one chapter is required")]
    EmptyChapters,

    /// An exact time, or its scaled form, does not fit in 128 bits.
    #[error("time at frame {frame} is too large to represent exactly")]
    TimeOverflow { frame: u64 },
}

impl TrimError {
    /// Create an out-of-range error.
    pub fn out_of_range(position: usize, bound: Bound, value: i64, frame_count: u64) -> Self {
        Self::OutOfRange {
            position,
            bound,
            value,
            frame_count,
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(starts: usize, ends: usize) -> Self {
        Self::LengthMismatch { starts, ends }
    }

    /// Create an invalid rate error.
    pub fn invalid_rate(message: impl Into<String>) -> Self {
        Self::InvalidRate(message.into())
    }

    /// The ordering violation, if this is a `NotOrdered` error.
    pub fn violation(&self) -> Option<&OrderViolation> {
        match self {
            TrimError::NotOrdered(v) => Some(v),
            _ => None,
        }
    }
}

/// Result type for core operations.
pub type TrimResult<T> = Result<T, TrimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_the_offending_value() {
        let err = TrimError::out_of_range(2, Bound::End, 101, 100);
        let msg = err.to_string();
        assert!(msg.contains("101"));
        assert!(msg.contains("trim 2"));
        assert!(msg.contains("out of bounds"));
    }

    #[test]
    fn overlap_and_zero_length_read_differently() {
        let overlap = TrimError::NotOrdered(OrderViolation::Overlap {
            index: 0,
            end: 6,
            next_start: 5,
        });
        let zero = TrimError::NotOrdered(OrderViolation::ZeroLength {
            index: 0,
            start: 5,
            end: 5,
        });
        assert!(overlap.to_string().contains("overlapping"));
        assert!(zero.to_string().contains("zero-length"));
        assert_eq!(overlap.violation().map(OrderViolation::index), Some(0));
    }
}
