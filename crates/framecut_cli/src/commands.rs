//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Serialize;

use framecut_core::chapters::{ChapterFileWriter, ChapterMark, ChapterSink};
use framecut_core::config::{ConfigManager, ConfigSection, Settings};
use framecut_core::split::{Mkvmerge, SplitPlan};
use framecut_core::{to_timestamp, ChapterPlan, CutPlan, CutSpan, Diagnostics, FrameRate, Trim};

use crate::cli::{FormatArg, TouchArg};
use crate::job::{JobCut, JobSpec};

/// A planned job, cut by trims or by chapters.
#[derive(Debug)]
pub enum JobPlan {
    Trims(CutPlan),
    Chapters(ChapterPlan),
}

impl JobPlan {
    pub fn build(job: &JobSpec, settings: &Settings) -> Result<Self> {
        let frame_count = job.frame_count()?;
        let clock = job.clock()?.resolve();
        let options = settings.plan_options();

        let plan = match job.cut()? {
            JobCut::Trims(selection) => {
                JobPlan::Trims(CutPlan::build(frame_count, &clock, &selection, &options)?)
            }
            JobCut::Chapters(list) => {
                JobPlan::Chapters(ChapterPlan::build(frame_count, &clock, &list, &options)?)
            }
        };
        Ok(plan)
    }

    pub fn cut(&self) -> &CutPlan {
        match self {
            JobPlan::Trims(cut) => cut,
            JobPlan::Chapters(plan) => &plan.cut,
        }
    }

    pub fn marks(&self) -> &[ChapterMark] {
        match self {
            JobPlan::Trims(_) => &[],
            JobPlan::Chapters(plan) => &plan.marks,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.cut().diagnostics
    }
}

/// What `plan --json` prints.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub input: &'a Path,
    pub output: PathBuf,
    pub chapter_file: Option<PathBuf>,
    pub frame_count: u64,
    pub kept_frames: u64,
    pub trims: &'a [Trim],
    pub cuts: &'a [CutSpan],
    pub chapters: &'a [ChapterMark],
    pub mkvmerge_args: Vec<String>,
    pub warnings: Vec<String>,
}

impl<'a> PlanReport<'a> {
    pub fn new(job: &'a JobSpec, plan: &'a JobPlan, settings: &Settings) -> Result<Self> {
        let output = job.output_path();
        let split = split_plan(job, plan, &output, settings)?;
        let chapter_file = (!plan.marks().is_empty()).then(|| job.chapter_path(&output));

        Ok(Self {
            input: &job.input,
            chapter_file,
            frame_count: plan.cut().frame_count,
            kept_frames: plan.cut().kept_frames(),
            trims: &plan.cut().trims,
            cuts: &plan.cut().spans,
            chapters: plan.marks(),
            mkvmerge_args: split.build(),
            warnings: plan.diagnostics().to_lines(),
            output,
        })
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("input:  {}\n", self.input.display()));
        out.push_str(&format!("output: {}\n", self.output.display()));
        out.push_str(&format!(
            "frames: {} kept of {}\n\n",
            self.kept_frames, self.frame_count
        ));

        out.push_str("cuts:\n");
        for (trim, span) in self.trims.iter().zip(self.cuts) {
            out.push_str(&format!(
                "  [{}, {})  {} - {}\n",
                trim.start, trim.end, span.start, span.end
            ));
        }

        if let Some(path) = &self.chapter_file {
            out.push_str(&format!("\nchapters ({}):\n", path.display()));
            for mark in self.chapters {
                out.push_str(&format!("  {}  {} - {}\n", mark.name, mark.start, mark.end));
            }
        }

        out.push_str(&format!("\nmkvmerge {}\n", self.mkvmerge_args.join(" ")));

        for warning in &self.warnings {
            out.push_str(&format!("warning: {}\n", warning));
        }
        out
    }
}

fn split_plan(job: &JobSpec, plan: &JobPlan, output: &Path, settings: &Settings) -> Result<SplitPlan> {
    let split = SplitPlan::new(&job.input, output, plan.cut().spans.clone())?
        .with_quiet(settings.tools.quiet);
    Ok(split)
}

pub fn plan(job_path: &Path, json: bool, settings: &Settings) -> Result<()> {
    let job = JobSpec::load(job_path)?;
    let plan = JobPlan::build(&job, settings)
        .with_context(|| format!("failed to plan {}", job_path.display()))?;
    let report = PlanReport::new(&job, &plan, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

pub fn cut(job_path: &Path, overwrite: bool, settings: &Settings) -> Result<()> {
    let job = JobSpec::load(job_path)?;
    let plan = JobPlan::build(&job, settings)
        .with_context(|| format!("failed to plan {}", job_path.display()))?;
    plan.diagnostics().emit();

    let output = job.output_path();
    ensure!(
        overwrite || !output.exists(),
        "{} already exists (use --overwrite to replace it)",
        output.display()
    );
    let mkvmerge = Mkvmerge::locate(settings.tools.mkvmerge_path().as_deref())?;
    let sync = mkvmerge
        .detect_sync(&job.input)
        .with_context(|| format!("failed to identify {}", job.input.display()))?;
    let split = split_plan(&job, &plan, &output, settings)?.with_sync(sync);

    if !plan.marks().is_empty() {
        let path = job.chapter_path(&output);
        let mut writer = ChapterFileWriter::new(&path, settings.chapters.format)
            .with_name_width(settings.chapters.name_width);
        writer
            .write_chapters(plan.marks())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    mkvmerge.run(&split, overwrite)?;
    Ok(())
}

pub fn ts(rate: FrameRate, precision: u32, frames: &[u64]) -> Result<()> {
    for &frame in frames {
        let stamp = to_timestamp(rate, frame, precision)?;
        println!("{}\t{}", frame, stamp);
    }
    Ok(())
}

/// Changes requested by `framecut config`.
#[derive(Debug, Default)]
pub struct ConfigChanges {
    pub precision: Option<u32>,
    pub chapter_precision: Option<u32>,
    pub touch_policy: Option<TouchArg>,
    pub format: Option<FormatArg>,
    pub mkvmerge: Option<String>,
}

pub fn config(path: &Path, changes: ConfigChanges) -> Result<()> {
    let mut manager = ConfigManager::new(path);
    manager
        .load_or_create()
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut touched = Vec::new();
    {
        let settings = manager.settings_mut();
        if let Some(precision) = changes.precision {
            settings.timestamps.precision = precision;
            touched.push(ConfigSection::Timestamps);
        }
        if let Some(precision) = changes.chapter_precision {
            settings.timestamps.chapter_precision = precision;
            touched.push(ConfigSection::Timestamps);
        }
        if let Some(policy) = changes.touch_policy {
            settings.trims.touch_policy = policy.into();
            touched.push(ConfigSection::Trims);
        }
        if let Some(format) = changes.format {
            settings.chapters.format = format.into();
            touched.push(ConfigSection::Chapters);
        }
        if let Some(mkvmerge) = changes.mkvmerge {
            settings.tools.mkvmerge_path = mkvmerge;
            touched.push(ConfigSection::Tools);
        }
    }

    touched.dedup();
    for section in touched {
        manager.update_section(section)?;
        tracing::info!("Updated [{}] in {}", section.table_name(), path.display());
    }

    print!("{}", toml::to_string_pretty(manager.settings())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use framecut_core::chapters::ChapterFormat;

    fn write_job(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("job.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn trim_job_report() {
        let dir = tempdir().unwrap();
        let path = write_job(
            dir.path(),
            r#"
            input = "ep01 DELAY -24ms.aac"
            frames = 100
            fps = "5"

            [[trims]]
            start = 3
            end = 22

            [[trims]]
            start = 22
            end = 40

            [[trims]]
            start = -10
            "#,
        );
        let job = JobSpec::load(&path).unwrap();
        let settings = Settings::default();
        let plan = JobPlan::build(&job, &settings).unwrap();
        let report = PlanReport::new(&job, &plan, &settings).unwrap();

        assert_eq!(report.trims, &[Trim::new(3, 40), Trim::new(90, 100)]);
        assert_eq!(report.kept_frames, 47);
        assert_eq!(report.cuts[0].start, "00:00:00.600000000");
        assert!(report.chapter_file.is_none());
        assert_eq!(report.warnings.len(), 1);
        assert!(report
            .mkvmerge_args
            .iter()
            .any(|a| a.starts_with("parts:00:00:00.600000000-00:00:08.000000000,+")));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frame_count"], 100);
        assert!(report.render_text().contains("warning: trims 0 and 1 touch"));
    }

    #[test]
    fn chapter_job_report() {
        let dir = tempdir().unwrap();
        let path = write_job(
            dir.path(),
            r#"
            input = "ep01.aac"
            frames = 100
            fps = "5"

            [[chapters]]
            start = 5
            end = 14
            name = "Intro"

            [[chapters]]
            start = 40
            name = "Part A"
            "#,
        );
        let job = JobSpec::load(&path).unwrap();
        let settings = Settings::default();
        let plan = JobPlan::build(&job, &settings).unwrap();
        let report = PlanReport::new(&job, &plan, &settings).unwrap();

        assert_eq!(report.trims, &[Trim::new(5, 15), Trim::new(40, 100)]);
        assert_eq!(report.chapters.len(), 2);
        assert_eq!(report.chapters[1].start, "00:00:02.000");
        assert_eq!(report.chapters[1].end, "00:00:14.000");
        assert_eq!(report.chapter_file, Some(dir.path().join("ep01_cut.txt")));
    }

    #[test]
    fn config_updates_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("framecut.toml");
        config(
            &path,
            ConfigChanges {
                precision: Some(6),
                format: Some(FormatArg::Table),
                ..ConfigChanges::default()
            },
        )
        .unwrap();

        let mut manager = ConfigManager::new(&path);
        manager.load().unwrap();
        assert_eq!(manager.settings().timestamps.precision, 6);
        assert_eq!(manager.settings().chapters.format, ChapterFormat::Table);
    }

    #[test]
    fn config_rejects_bad_precision() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("framecut.toml");
        let changes = ConfigChanges {
            precision: Some(4),
            ..ConfigChanges::default()
        };
        assert!(config(&path, changes).is_err());
    }
}
