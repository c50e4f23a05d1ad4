//! Resolution of slice-style frame indices to absolute frames.
//!
//! For a sequence of `N` frames:
//! - start: unset or `0` is frame 0, `-x` is `N - x`
//! - end: unset (or the legacy `0`) is `N`, `-x` is `N - x`
//!
//! The magnitude of every index is checked against `N` before any sign is
//! resolved, so `-101` and `101` fail the same way on a 100 frame clip.

use super::types::{FrameIndex, Trim, TrimSpec};
use crate::error::{Bound, TrimError, TrimResult};

fn check_bounds(frame_count: u64, position: usize, bound: Bound, index: FrameIndex) -> TrimResult<()> {
    match index {
        FrameIndex::At(value) if value.unsigned_abs() > frame_count => Err(
            TrimError::out_of_range(position, bound, value, frame_count),
        ),
        _ => Ok(()),
    }
}

fn resolve_start(frame_count: u64, index: FrameIndex) -> u64 {
    match index {
        FrameIndex::Unspecified => 0,
        FrameIndex::At(value) if value >= 0 => value as u64,
        FrameIndex::At(value) => frame_count - value.unsigned_abs(),
    }
}

fn resolve_end(frame_count: u64, index: FrameIndex) -> u64 {
    match index {
        FrameIndex::Unspecified | FrameIndex::At(0) => frame_count,
        FrameIndex::At(value) if value > 0 => value as u64,
        FrameIndex::At(value) => frame_count - value.unsigned_abs(),
    }
}

/// Resolve a single (start, end) pair against `frame_count`.
pub fn normalize(
    frame_count: u64,
    start: impl Into<FrameIndex>,
    end: impl Into<FrameIndex>,
) -> TrimResult<(u64, u64)> {
    let (start, end) = (start.into(), end.into());
    check_bounds(frame_count, 0, Bound::Start, start)?;
    check_bounds(frame_count, 0, Bound::End, end)?;
    Ok((resolve_start(frame_count, start), resolve_end(frame_count, end)))
}

/// Resolve parallel start and end lists against `frame_count`.
///
/// Fails with `LengthMismatch` before looking at any element, and with
/// `OutOfRange` for the first index whose magnitude exceeds the count.
pub fn normalize_many<S, E>(frame_count: u64, starts: &[S], ends: &[E]) -> TrimResult<(Vec<u64>, Vec<u64>)>
where
    S: Copy + Into<FrameIndex>,
    E: Copy + Into<FrameIndex>,
{
    if starts.len() != ends.len() {
        return Err(TrimError::length_mismatch(starts.len(), ends.len()));
    }

    let starts: Vec<FrameIndex> = starts.iter().map(|&s| s.into()).collect();
    let ends: Vec<FrameIndex> = ends.iter().map(|&e| e.into()).collect();

    for (position, (&start, &end)) in starts.iter().zip(&ends).enumerate() {
        check_bounds(frame_count, position, Bound::Start, start)?;
        check_bounds(frame_count, position, Bound::End, end)?;
    }

    Ok((
        starts.iter().map(|&s| resolve_start(frame_count, s)).collect(),
        ends.iter().map(|&e| resolve_end(frame_count, e)).collect(),
    ))
}

/// Resolve user trims into absolute half-open trims.
pub fn normalize_trims(frame_count: u64, specs: &[TrimSpec]) -> TrimResult<Vec<Trim>> {
    let starts: Vec<FrameIndex> = specs.iter().map(|s| s.start).collect();
    let ends: Vec<FrameIndex> = specs.iter().map(|s| s.end).collect();
    let (starts, ends) = normalize_many(frame_count, &starts, &ends)?;
    Ok(super::types::zip_trims(&starts, &ends))
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    const N: u64 = 100;
    const OPEN: FrameIndex = FrameIndex::Unspecified;

    #[test]
    fn single_pairs() {
        assert_eq!(normalize(N, OPEN, OPEN).unwrap(), (0, 100));
        assert_eq!(normalize(N, -90i64, -20i64).unwrap(), (10, 80));
        assert_eq!(normalize(N, 20i64, 30i64).unwrap(), (20, 30));
        assert_eq!(normalize(N, 0i64, -10i64).unwrap(), (0, 90));
        assert_eq!(normalize(N, 3i64, -13i64).unwrap(), (3, 87));
    }

    #[test]
    fn single_pair_out_of_bounds() {
        let err = normalize(N, OPEN, 101i64).unwrap_err();
        assert_eq!(err, TrimError::out_of_range(0, Bound::End, 101, N));
        assert!(err.to_string().contains("bounds"));
        assert!(normalize(N, -101i64, OPEN).is_err());
        assert!(normalize(N, -100i64, 100i64).is_ok());
    }

    #[test]
    fn lists_resolve_negative_and_open() {
        assert_eq!(
            normalize_many(N, &[3i64, -10], &[22i64, 0]).unwrap(),
            (vec![3, 90], vec![22, 100])
        );
        assert_eq!(
            normalize_many(N, &[0i64, 20, 30], &[Some(10i64), None, Some(-30)]).unwrap(),
            (vec![0, 20, 30], vec![10, 100, 70])
        );
        assert_eq!(
            normalize_many(N, &[-10i64, 0, -5], &[-10i64, 0, 5]).unwrap(),
            (vec![90, 0, 95], vec![90, 100, 5])
        );
    }

    #[test]
    fn length_is_checked_before_bounds() {
        let err = normalize_many(N, &[None, Some(10i64), Some(20)], &[None, Some(500i64)]).unwrap_err();
        assert_eq!(err, TrimError::length_mismatch(3, 2));
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn list_out_of_bounds_reports_position() {
        let err =
            normalize_many(N, &[None, Some(10i64), Some(20)], &[None, Some(-30i64), Some(101)]).unwrap_err();
        assert_eq!(err, TrimError::out_of_range(2, Bound::End, 101, N));

        let err = normalize_many(N, &[0i64, 3, 98], &[0i64, 1, -102]).unwrap_err();
        assert!(matches!(err, TrimError::OutOfRange { position: 2, value: -102, .. }));
    }

    #[test]
    fn trims_from_specs() {
        let specs = [
            TrimSpec::new(3i64, 22i64),
            TrimSpec::new(50i64, -20i64),
            TrimSpec::new(97i64, OPEN),
        ];
        assert_eq!(
            normalize_trims(N, &specs).unwrap(),
            vec![Trim::new(3, 22), Trim::new(50, 80), Trim::new(97, 100)]
        );
    }

    #[quickcheck]
    fn absolute_in_bounds_lists_are_unchanged(raw: Vec<(u8, u8)>) -> bool {
        let starts: Vec<i64> = raw.iter().map(|&(s, _)| s as i64 % 100).collect();
        // ends of 0 mean "open", so keep them positive
        let ends: Vec<i64> = raw.iter().map(|&(_, e)| e as i64 % 100 + 1).collect();
        let (s, e) = normalize_many(N, &starts, &ends).unwrap();
        s.iter().zip(&starts).all(|(&a, &b)| a as i64 == b)
            && e.iter().zip(&ends).all(|(&a, &b)| a as i64 == b)
    }
}
