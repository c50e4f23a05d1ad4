//! Mapping chapter boundaries from the source onto the cut output.

use crate::error::{TrimError, TrimResult};
use crate::trims::validate_ordered;

/// Compress chapters given with *inclusive* ends onto a gapless timeline
/// starting at frame 0.
///
/// Every gap between one chapter's end and the next chapter's start is
/// removed, so each chapter keeps its length. The last end gets one extra
/// frame so it marks the closing boundary of the output.
///
/// ```
/// use framecut_core::chapters::compress_chapters;
///
/// let (starts, ends) = compress_chapters(&[1, 4, 11, 13], &[3, 8, 12, 15]).unwrap();
/// assert_eq!(starts, vec![0, 3, 8, 10]);
/// assert_eq!(ends, vec![2, 7, 9, 13]);
/// ```
pub fn compress_chapters(starts: &[u64], ends_inclusive: &[u64]) -> TrimResult<(Vec<u64>, Vec<u64>)> {
    if starts.len() != ends_inclusive.len() {
        return Err(TrimError::length_mismatch(starts.len(), ends_inclusive.len()));
    }
    if starts.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let exclusive: Vec<u64> = ends_inclusive.iter().map(|&end| end + 1).collect();
    validate_ordered(starts, &exclusive)?;

    // frames removed so far, including everything before the first chapter
    let mut removed = starts[0];
    let mut out_starts = Vec::with_capacity(starts.len());
    let mut out_ends = Vec::with_capacity(starts.len());

    for i in 0..starts.len() {
        if i > 0 {
            removed += starts[i] - exclusive[i - 1];
        }
        out_starts.push(starts[i] - removed);
        out_ends.push(ends_inclusive[i] - removed);
    }

    if let Some(last) = out_ends.last_mut() {
        *last += 1;
    }

    tracing::debug!(
        "Compressed {} chapters, {} frames removed",
        starts.len(),
        removed
    );

    Ok((out_starts, out_ends))
}
