//! Running mkvmerge.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::args::{identify_args, SplitPlan, TrackSync};
use super::{SplitError, SplitResult};

/// A located mkvmerge executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mkvmerge {
    path: PathBuf,
}

impl Mkvmerge {
    /// Use `configured` if set, otherwise search `PATH`.
    pub fn locate(configured: Option<&Path>) -> SplitResult<Self> {
        let path = match configured {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => return Err(SplitError::ToolNotFound(path.display().to_string())),
            None => which::which("mkvmerge")
                .map_err(|_| SplitError::ToolNotFound("mkvmerge".to_string()))?,
        };
        tracing::debug!("Using mkvmerge at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `--identify` on `input` and return its stdout.
    pub fn identify(&self, input: &Path) -> SplitResult<String> {
        let output = Command::new(&self.path)
            .args(identify_args(input))
            .output()
            .map_err(|e| SplitError::io("running mkvmerge --identify", e))?;

        if !output.status.success() {
            return Err(SplitError::command_failed(
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// `--sync` for `input`, looked up through `--identify`.
    pub fn detect_sync(&self, input: &Path) -> SplitResult<Option<TrackSync>> {
        let identify = self.identify(input)?;
        let sync = TrackSync::detect(&identify, input);
        if let Some(sync) = &sync {
            tracing::info!(
                "Applying {} ms delay to track {} from file name",
                sync.delay_ms,
                sync.track_id
            );
        }
        Ok(sync)
    }

    /// Run the split. Refuses to replace an existing output unless `overwrite`.
    pub fn run(&self, plan: &SplitPlan, overwrite: bool) -> SplitResult<()> {
        if !plan.input().is_file() {
            return Err(SplitError::InputNotFound(plan.input().to_path_buf()));
        }
        if plan.output().exists() && !overwrite {
            return Err(SplitError::OutputExists(plan.output().to_path_buf()));
        }
        if let Some(parent) = plan.output().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SplitError::io("creating output directory", e))?;
            }
        }

        let tokens = plan.build();
        tracing::debug!("mkvmerge {}", tokens.join(" "));

        let output = Command::new(&self.path)
            .args(&tokens)
            .output()
            .map_err(|e| SplitError::io("running mkvmerge", e))?;

        let exit_code = output.status.code().unwrap_or(-1);
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!("[mkvmerge] {}", line);
        }

        // 0 = success, 1 = warnings, 2 = errors
        match exit_code {
            0 => {}
            1 => tracing::warn!("mkvmerge finished with warnings"),
            _ => {
                return Err(SplitError::command_failed(
                    exit_code,
                    String::from_utf8_lossy(&output.stderr),
                ))
            }
        }

        tracing::info!("Wrote {}", plan.output().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::plan::CutSpan;

    fn plan(input: &Path, output: &Path) -> SplitPlan {
        SplitPlan::new(
            input,
            output,
            vec![CutSpan {
                start: "00:00:00.000".into(),
                end: "00:00:01.000".into(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn configured_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("mkvmerge");
        assert!(matches!(
            Mkvmerge::locate(Some(&missing)),
            Err(SplitError::ToolNotFound(_))
        ));
    }

    #[test]
    fn refuses_missing_input_and_existing_output() {
        let dir = tempdir().unwrap();
        let tool = dir.path().join("mkvmerge");
        std::fs::write(&tool, "").unwrap();
        let mkvmerge = Mkvmerge::locate(Some(&tool)).unwrap();

        let input = dir.path().join("in.aac");
        let output = dir.path().join("out.mka");
        assert!(matches!(
            mkvmerge.run(&plan(&input, &output), false),
            Err(SplitError::InputNotFound(_))
        ));

        std::fs::write(&input, "").unwrap();
        std::fs::write(&output, "").unwrap();
        assert!(matches!(
            mkvmerge.run(&plan(&input, &output), false),
            Err(SplitError::OutputExists(_))
        ));
    }
}
