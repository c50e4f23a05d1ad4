//! Trim and frame index types.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A user-supplied frame index, following slice syntax.
///
/// Negative values count back from the end of the sequence. `Unspecified`
/// is an open boundary: the first frame for a start, one past the last
/// frame for an end. It is kept distinct from `At(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum FrameIndex {
    #[default]
    Unspecified,
    At(i64),
}

impl FrameIndex {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, FrameIndex::Unspecified)
    }

    /// The raw value, with `Unspecified` as `None`.
    pub fn value(&self) -> Option<i64> {
        match self {
            FrameIndex::Unspecified => None,
            FrameIndex::At(v) => Some(*v),
        }
    }
}

impl From<i64> for FrameIndex {
    fn from(value: i64) -> Self {
        FrameIndex::At(value)
    }
}

impl From<Option<i64>> for FrameIndex {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FrameIndex::Unspecified, FrameIndex::At)
    }
}

impl From<FrameIndex> for Option<i64> {
    fn from(value: FrameIndex) -> Self {
        value.value()
    }
}

/// A trim as written by the user, before resolution against a frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrimSpec {
    #[serde(default)]
    pub start: FrameIndex,
    #[serde(default)]
    pub end: FrameIndex,
}

impl TrimSpec {
    pub fn new(start: impl Into<FrameIndex>, end: impl Into<FrameIndex>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A half-open range of absolute frames to keep: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trim {
    pub start: u64,
    pub end: u64,
}

impl Trim {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of frames kept. Zero for an empty or inverted trim.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<Trim> for Range<u64> {
    fn from(value: Trim) -> Self {
        value.start..value.end
    }
}

impl From<Range<u64>> for Trim {
    fn from(value: Range<u64>) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

/// Split trims into parallel start and end lists.
pub fn unzip_trims(trims: &[Trim]) -> (Vec<u64>, Vec<u64>) {
    trims.iter().map(|t| (t.start, t.end)).unzip()
}

/// Pair parallel start and end lists into trims.
///
/// Extra elements of the longer list are ignored; callers check lengths first.
pub fn zip_trims(starts: &[u64], ends: &[u64]) -> Vec<Trim> {
    starts
        .iter()
        .zip(ends)
        .map(|(&start, &end)| Trim::new(start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        trims: Vec<TrimSpec>,
    }

    #[test]
    fn unspecified_is_not_zero() {
        assert_ne!(FrameIndex::Unspecified, FrameIndex::At(0));
        assert_eq!(FrameIndex::from(None::<i64>), FrameIndex::Unspecified);
        assert_eq!(FrameIndex::from(Some(-5i64)), FrameIndex::At(-5));
        assert!(FrameIndex::default().is_unspecified());
    }

    #[test]
    fn trim_spec_fields_are_optional_in_toml() {
        let parsed: Wrapper = toml::from_str(
            r#"
            [[trims]]
            end = 10

            [[trims]]
            start = -5
            "#,
        )
        .unwrap();
        assert_eq!(parsed.trims[0], TrimSpec::new(FrameIndex::Unspecified, 10i64));
        assert_eq!(parsed.trims[1], TrimSpec::new(-5i64, FrameIndex::Unspecified));
    }

    #[test]
    fn trim_converts_to_range() {
        let trim = Trim::new(3, 22);
        assert_eq!(trim.len(), 19);
        let range: Range<u64> = trim.into();
        assert_eq!(Trim::from(range), trim);
        assert!(Trim::new(5, 5).is_empty());
    }

    #[test]
    fn zip_and_unzip_are_inverse() {
        let trims = vec![Trim::new(0, 2), Trim::new(4, 9)];
        let (starts, ends) = unzip_trims(&trims);
        assert_eq!(starts, vec![0, 4]);
        assert_eq!(zip_trims(&starts, &ends), trims);
    }
}
