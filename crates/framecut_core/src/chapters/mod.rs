//! Chapters on the source timeline and their positions after cutting.
//!
//! A chapter list doubles as a keep list: every frame inside a chapter is
//! kept, everything between chapters is cut. [`compress_chapters`] maps the
//! chapter boundaries onto the resulting gapless output.

pub mod compress;
pub mod types;
pub mod writer;

pub use compress::compress_chapters;
pub use types::{ChapterEnd, ChapterList, ChapterSpec, ResolvedChapter};
pub use writer::{
    render_chapters, ChapterFileWriter, ChapterFormat, ChapterMark, ChapterSink,
    ChapterWriteError, ChapterWriteResult,
};
