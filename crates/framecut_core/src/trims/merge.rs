//! Joining touching trims so each junction costs no extra cut.

use super::types::Trim;
use crate::error::{TrimError, TrimResult};

/// Merge touching ranges given with *inclusive* ends.
///
/// Each end is first made exclusive (`end + 1`). A start equal to the
/// previous exclusive end and an end equal to the next start are both
/// dropped, so every junction removes one boundary pair. Runs in one pass
/// over an already validated list.
pub fn merge_touching(starts: &[u64], ends_inclusive: &[u64]) -> TrimResult<(Vec<u64>, Vec<u64>)> {
    if starts.len() != ends_inclusive.len() {
        return Err(TrimError::length_mismatch(starts.len(), ends_inclusive.len()));
    }

    let ends: Vec<u64> = ends_inclusive.iter().map(|&end| end + 1).collect();
    let count = starts.len();
    let mut merged_starts = Vec::with_capacity(count);
    let mut merged_ends = Vec::with_capacity(count);

    for i in 0..count {
        if i == 0 || starts[i] != ends[i - 1] {
            merged_starts.push(starts[i]);
        }
        if i + 1 == count || ends[i] != starts[i + 1] {
            merged_ends.push(ends[i]);
        }
    }

    tracing::debug!(
        "Merged {} ranges into {} cuts",
        count,
        merged_starts.len()
    );

    Ok((merged_starts, merged_ends))
}

/// Merge touching half-open trims, e.g. `[0, 5)` and `[5, 9)` into `[0, 9)`.
pub fn merge_adjacent(trims: &[Trim]) -> Vec<Trim> {
    let mut merged: Vec<Trim> = Vec::with_capacity(trims.len());
    for trim in trims {
        match merged.last_mut() {
            Some(last) if last.end == trim.start => last.end = trim.end,
            _ => merged.push(*trim),
        }
    }
    merged
}
