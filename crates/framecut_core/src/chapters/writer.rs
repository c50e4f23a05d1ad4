//! Chapter file output.
//!
//! OGM simple chapters:
//!
//! ```text
//! CHAPTER01=00:00:00.000
//! CHAPTER01NAME=Intro
//! ```
//!
//! or an aligned `name    start    end` table:
//!
//! ```text
//! Intro           00:00:00.000    00:00:10.010
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One chapter on the cut output, with rendered timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMark {
    pub start: String,
    pub end: String,
    pub name: String,
}

/// Chapter file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterFormat {
    #[default]
    Ogm,
    Table,
}

/// Errors from writing chapter files.
#[derive(Debug, Error)]
pub enum ChapterWriteError {
    #[error("failed to write chapter file: {0}")]
    Io(#[from] io::Error),

    #[error("no chapters to write")]
    Empty,
}

pub type ChapterWriteResult<T> = Result<T, ChapterWriteError>;

/// Receives the final chapter marks of a job.
pub trait ChapterSink {
    fn write_chapters(&mut self, marks: &[ChapterMark]) -> ChapterWriteResult<()>;
}

/// Collects marks in memory.
impl ChapterSink for Vec<ChapterMark> {
    fn write_chapters(&mut self, marks: &[ChapterMark]) -> ChapterWriteResult<()> {
        self.extend_from_slice(marks);
        Ok(())
    }
}

/// Render marks in the OGM simple chapter format.
pub fn render_ogm(marks: &[ChapterMark]) -> String {
    let mut out = String::new();
    for (i, mark) in marks.iter().enumerate() {
        let number = i + 1;
        out.push_str(&format!("CHAPTER{:02}={}\n", number, mark.start));
        out.push_str(&format!("CHAPTER{:02}NAME={}\n", number, mark.name));
    }
    out
}

/// Render marks as a `name    start    end` table, names padded to `name_width`.
pub fn render_table(marks: &[ChapterMark], name_width: usize) -> String {
    marks
        .iter()
        .map(|mark| {
            format!(
                "{:<width$}    {}    {}\n",
                mark.name,
                mark.start,
                mark.end,
                width = name_width
            )
        })
        .collect()
}

pub fn render_chapters(marks: &[ChapterMark], format: ChapterFormat, name_width: usize) -> String {
    match format {
        ChapterFormat::Ogm => render_ogm(marks),
        ChapterFormat::Table => render_table(marks, name_width),
    }
}

/// Writes chapter marks to a text file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct ChapterFileWriter {
    path: PathBuf,
    format: ChapterFormat,
    name_width: usize,
}

impl ChapterFileWriter {
    pub fn new(path: impl AsRef<Path>, format: ChapterFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
            name_width: 12,
        }
    }

    pub fn with_name_width(mut self, name_width: usize) -> Self {
        self.name_width = name_width;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("txt.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.path)
    }
}

impl ChapterSink for ChapterFileWriter {
    fn write_chapters(&mut self, marks: &[ChapterMark]) -> ChapterWriteResult<()> {
        if marks.is_empty() {
            return Err(ChapterWriteError::Empty);
        }
        let content = render_chapters(marks, self.format, self.name_width);
        self.atomic_write(&content)?;
        tracing::info!(
            "Wrote {} chapters to {}",
            marks.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn marks() -> Vec<ChapterMark> {
        vec![
            ChapterMark {
                start: "00:00:00.000".into(),
                end: "00:00:10.010".into(),
                name: "Intro".into(),
            },
            ChapterMark {
                start: "00:00:10.010".into(),
                end: "00:05:12.312".into(),
                name: "Part A".into(),
            },
        ]
    }

    #[test]
    fn ogm_numbers_from_one() {
        assert_eq!(
            render_ogm(&marks()),
            "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Intro\n\
             CHAPTER02=00:00:10.010\nCHAPTER02NAME=Part A\n"
        );
    }

    #[test]
    fn table_pads_names() {
        let table = render_table(&marks(), 12);
        let first = table.lines().next().unwrap();
        assert_eq!(first, "Intro           00:00:00.000    00:00:10.010");
    }

    #[test]
    fn writes_file_without_leaving_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("chapters.txt");

        let mut writer = ChapterFileWriter::new(&path, ChapterFormat::Table);
        writer.write_chapters(&marks()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(!path.with_extension("txt.tmp").exists());
    }

    #[test]
    fn refuses_empty_chapter_list() {
        let dir = tempdir().unwrap();
        let mut writer = ChapterFileWriter::new(dir.path().join("c.txt"), ChapterFormat::Ogm);
        assert!(matches!(
            writer.write_chapters(&[]),
            Err(ChapterWriteError::Empty)
        ));
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<ChapterMark> = Vec::new();
        sink.write_chapters(&marks()).unwrap();
        assert_eq!(sink.len(), 2);
    }
}
