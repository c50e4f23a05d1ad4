//! framecut core - frame ranges, chapter timelines and exact timestamps.
//!
//! The frame and time logic in [`trims`], [`chapters`] and [`time`] is pure.
//! [`plan`] wires it together for a whole job, [`split`] turns a plan into
//! one mkvmerge call, and [`config`] / [`logging`] are the ambient pieces
//! shared with the CLI.

pub mod chapters;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod plan;
pub mod split;
pub mod time;
pub mod trims;

pub use chapters::compress_chapters;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Bound, OrderViolation, TrimError, TrimResult};
pub use plan::{ChapterPlan, CutPlan, CutSpan, PlanOptions, TrimSelection};
pub use time::{to_timestamp, to_timestamp_vfr, FrameRate, Precision, RateSegment, RateTimeline};
pub use trims::{
    merge_adjacent, merge_touching, normalize, normalize_many, validate_ordered,
    validate_ordered_with, FrameIndex, TouchPolicy, Trim, TrimSpec,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }

    #[test]
    fn entry_points_compose() {
        let (starts, ends) = normalize_many(100, &[3i64, -10], &[22i64, 0]).unwrap();
        assert_eq!((starts.clone(), ends.clone()), (vec![3, 90], vec![22, 100]));
        assert!(validate_ordered(&starts, &ends).is_ok());

        let rate = FrameRate::new(5, 1).unwrap();
        let stamps: Vec<String> = starts
            .iter()
            .map(|&f| to_timestamp(rate, f, 3).unwrap())
            .collect();
        assert_eq!(stamps, vec!["00:00:00.600", "00:00:18.000"]);
    }
}
