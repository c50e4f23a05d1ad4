//! Ordering checks for resolved trim lists.

use serde::{Deserialize, Serialize};

use super::types::Trim;
use crate::error::{OrderViolation, TrimError, TrimResult};

/// What to do when one trim ends exactly where the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPolicy {
    /// Accept, report the junction, and let the merger join the two trims.
    #[default]
    Merge,
    /// Treat touching trims as an ordering error.
    Reject,
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderReport {
    /// Indices `i` where trim `i` ends exactly at the start of trim `i + 1`.
    pub touching: Vec<usize>,
}

impl OrderReport {
    pub fn has_touching(&self) -> bool {
        !self.touching.is_empty()
    }
}

/// Validate parallel start/end lists with the default [`TouchPolicy::Merge`].
pub fn validate_ordered(starts: &[u64], ends: &[u64]) -> TrimResult<OrderReport> {
    validate_ordered_with(starts, ends, TouchPolicy::Merge)
}

/// Validate parallel start/end lists of half-open trims.
///
/// Checks run in a fixed order over the whole list and the first failure
/// is returned:
/// 1. starts strictly increase
/// 2. no trim ends after the next one starts
/// 3. every trim keeps at least one frame
pub fn validate_ordered_with(
    starts: &[u64],
    ends: &[u64],
    policy: TouchPolicy,
) -> TrimResult<OrderReport> {
    if starts.len() != ends.len() {
        return Err(TrimError::length_mismatch(starts.len(), ends.len()));
    }

    for (index, pair) in starts.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(TrimError::NotOrdered(OrderViolation::NonMonotonic {
                index,
                start: pair[0],
                next_start: pair[1],
            }));
        }
    }

    let mut report = OrderReport::default();
    for (index, (&end, &next_start)) in ends.iter().zip(starts.iter().skip(1)).enumerate() {
        if end > next_start {
            return Err(TrimError::NotOrdered(OrderViolation::Overlap {
                index,
                end,
                next_start,
            }));
        }
        if end == next_start {
            match policy {
                TouchPolicy::Merge => report.touching.push(index),
                TouchPolicy::Reject => {
                    return Err(TrimError::NotOrdered(OrderViolation::Touching {
                        index,
                        frame: end,
                    }))
                }
            }
        }
    }

    for (index, (&start, &end)) in starts.iter().zip(ends).enumerate() {
        if start >= end {
            return Err(TrimError::NotOrdered(OrderViolation::ZeroLength {
                index,
                start,
                end,
            }));
        }
    }

    tracing::debug!(
        "Validated {} trims ({} touching)",
        starts.len(),
        report.touching.len()
    );

    Ok(report)
}

/// Validate a list of half-open trims.
pub fn validate_trims(trims: &[Trim], policy: TouchPolicy) -> TrimResult<OrderReport> {
    let (starts, ends) = super::types::unzip_trims(trims);
    validate_ordered_with(&starts, &ends, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(starts: &[u64], ends: &[u64]) -> OrderViolation {
        validate_ordered(starts, ends)
            .unwrap_err()
            .violation()
            .cloned()
            .unwrap()
    }

    #[test]
    fn accepts_ordered_lists() {
        assert!(validate_ordered(&[0, 2, 4], &[1, 3, 5]).is_ok());
        assert!(validate_ordered(&[3], &[22]).is_ok());
        assert!(validate_ordered(&[], &[]).is_ok());
    }

    #[test]
    fn rejects_zero_length() {
        assert_eq!(
            violation(&[5], &[5]),
            OrderViolation::ZeroLength {
                index: 0,
                start: 5,
                end: 5
            }
        );
        assert!(matches!(
            violation(&[0, 2, 4], &[0, 3, 5]),
            OrderViolation::ZeroLength { index: 0, .. }
        ));
    }

    #[test]
    fn rejects_overlap() {
        assert_eq!(
            violation(&[0, 5], &[6, 9]),
            OrderViolation::Overlap {
                index: 0,
                end: 6,
                next_start: 5
            }
        );
        assert!(matches!(
            violation(&[0, 5, 8], &[1, 9, 10]),
            OrderViolation::Overlap { index: 1, .. }
        ));
    }

    #[test]
    fn rejects_non_monotonic_starts_first() {
        // also overlapping and zero-length, but monotonicity is checked first
        assert!(matches!(
            violation(&[0, 1, 1], &[5, 1, 1]),
            OrderViolation::NonMonotonic { index: 1, .. }
        ));
        assert!(matches!(
            violation(&[0, 2, 1], &[1, 3, 2]),
            OrderViolation::NonMonotonic { index: 1, .. }
        ));
    }

    #[test]
    fn touching_follows_policy() {
        let report = validate_ordered(&[0, 5, 12], &[5, 10, 20]).unwrap();
        assert_eq!(report.touching, vec![0]);
        assert!(report.has_touching());

        let err = validate_ordered_with(&[0, 5], &[5, 10], TouchPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            TrimError::NotOrdered(OrderViolation::Touching { index: 0, frame: 5 })
        );
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            validate_ordered(&[0, 5], &[3]).unwrap_err(),
            TrimError::length_mismatch(2, 1)
        );
    }

    #[test]
    fn validates_trim_structs() {
        let trims = [Trim::new(3, 22), Trim::new(23, 40)];
        assert!(!validate_trims(&trims, TouchPolicy::Reject).unwrap().has_touching());
    }
}
