//! Per-call warning channel.
//!
//! Recoverable conditions (touching trims, legacy `0` end indices, chapter
//! ends that had to be corrected) are collected here and handed back to the
//! caller, who decides whether to log them.

use std::fmt;

/// A recoverable condition found while planning a cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Trim `index` ends exactly where trim `index + 1` starts; the two were merged.
    TouchingTrims { index: usize, frame: u64 },
    /// Trim `index` used `0` as its end, read as "until the last frame".
    LegacyZeroEnd { index: usize },
    /// A list with a single trim was given where a bare trim would do.
    SingleTrimList,
    /// Chapter `index` ended on the next chapter's start and was pulled back one frame.
    ChapterEndAdjusted { index: usize, from: u64, to: u64 },
    /// The last chapter ended past the sequence and was clamped to its last frame.
    ChapterEndClamped { index: usize, from: u64, to: u64 },
    /// The last chapter used `0` as its end, read as "until the last frame".
    ChapterZeroEnd { index: usize, to: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TouchingTrims { index, frame } => write!(
                f,
                "trims {} and {} touch at frame {}; merging them into one cut",
                index,
                index + 1,
                frame
            ),
            Diagnostic::LegacyZeroEnd { index } => write!(
                f,
                "trim {} ends with 0; leave the end unset to mean the last frame",
                index
            ),
            Diagnostic::SingleTrimList => write!(
                f,
                "a list of one trim is not needed; pass the trim directly"
            ),
            Diagnostic::ChapterEndAdjusted { index, from, to } => write!(
                f,
                "chapter {} end {} overlaps the next chapter, using {}",
                index, from, to
            ),
            Diagnostic::ChapterEndClamped { index, from, to } => write!(
                f,
                "chapter {} end {} is past the last frame, using {}",
                index, from, to
            ),
            Diagnostic::ChapterZeroEnd { index, to } => write!(
                f,
                "chapter {} ends with 0; leave the end unset to mean the last frame ({})",
                index, to
            ),
        }
    }
}

/// Ordered collection of diagnostics from one planning call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Append all diagnostics from `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Whether any diagnostic matches the predicate.
    pub fn any(&self, predicate: impl Fn(&Diagnostic) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    /// Log every diagnostic as a warning.
    pub fn emit(&self) {
        for diagnostic in &self.items {
            tracing::warn!("{}", diagnostic);
        }
    }

    /// Render every diagnostic as a line of text.
    pub fn to_lines(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
