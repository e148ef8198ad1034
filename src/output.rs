// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Route a rendered artifact to exactly one destination (file, preview, stdout)
// role: output/distributor
// inputs: RenderedArtifact, DeliveryConfig, preview directory, viewer argv, ProcessRunner
// outputs: The Destination that received the content
// side_effects: Writes one file and/or spawns the viewer, or prints to stdout
// invariants:
// - Precedence is the RULES table order: file path > preview > stdout; first match wins
// - Exactly one destination is attempted, once
// errors: PipelineError::Io on write failure; PipelineError::Command when the viewer fails
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::model::{DeliveryConfig, OutputDestination, OutputFormat, RenderedArtifact};
use crate::util::{write_text, CommandSpec, ProcessRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
  File(PathBuf),
  Preview(PathBuf),
  Stdout,
}

type Rule = fn(&DeliveryConfig, &Path, OutputFormat) -> Option<Destination>;

fn file_rule(cfg: &DeliveryConfig, _preview_dir: &Path, _format: OutputFormat) -> Option<Destination> {
  cfg.file_path.clone().map(Destination::File)
}

fn preview_rule(cfg: &DeliveryConfig, preview_dir: &Path, format: OutputFormat) -> Option<Destination> {
  (cfg.destination == OutputDestination::Preview).then(|| Destination::Preview(preview_path(preview_dir, format)))
}

fn stdout_rule(_cfg: &DeliveryConfig, _preview_dir: &Path, _format: OutputFormat) -> Option<Destination> {
  Some(Destination::Stdout)
}

/// Destination rules in precedence order.
pub const RULES: [(&str, Rule); 3] = [("file", file_rule), ("preview", preview_rule), ("stdout", stdout_rule)];

pub fn preview_path(dir: &Path, format: OutputFormat) -> PathBuf {
  dir.join(format!("diff.{}", format.extension()))
}

pub fn resolve_destination(cfg: &DeliveryConfig, preview_dir: &Path, format: OutputFormat) -> Destination {
  RULES
    .iter()
    .find_map(|(name, rule)| {
      let hit = rule(cfg, preview_dir, format);
      if hit.is_some() {
        tracing::debug!(rule = *name, "destination selected");
      }
      hit
    })
    .unwrap_or(Destination::Stdout)
}

pub struct Distributor<'a> {
  pub delivery: &'a DeliveryConfig,
  pub preview_dir: &'a Path,
  pub opener: &'a [String],
  pub runner: &'a dyn ProcessRunner,
}

impl Distributor<'_> {
  pub fn distribute(&self, artifact: &RenderedArtifact, stdout: &mut dyn Write) -> Result<Destination> {
    let dest = resolve_destination(self.delivery, self.preview_dir, artifact.format);

    match &dest {
      Destination::File(path) => write_text(path, &artifact.content)?,
      Destination::Preview(path) => {
        write_text(path, &artifact.content)?;
        let spec = CommandSpec::from_argv(self.opener)
          .ok_or_else(|| PipelineError::command("<viewer>", "no viewer command configured"))?
          .arg(path.to_string_lossy());
        self.runner.run(&spec)?;
      }
      Destination::Stdout => {
        writeln!(stdout, "{}", artifact.content).map_err(|e| PipelineError::write("<stdout>", e))?;
      }
    }

    Ok(dest)
  }
}
