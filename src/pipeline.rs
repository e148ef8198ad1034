// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Sequence acquire → (upload | render → distribute) for one invocation
// role: processing/orchestrator
// inputs: EffectiveConfig, ProcessRunner, DiffEngine, UploadApi, stdout/stderr writers
// outputs: Completion (delivered destination or in-flight upload handle)
// side_effects: Whatever the stages perform (git, file writes, viewer, HTTP via the upload worker)
// invariants:
// - Stages advance Idle → Acquiring → {Uploading | Rendering → Distributing} → Done; Errored on any failure
// - Empty (zero-length) or unobtainable input never reaches the renderer or the upload client
// - The controller is Done as soon as the upload is dispatched; waiting is the caller's choice
// errors: EmptyInput for empty/failed acquisition; render/distribute errors propagate unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::sync::Arc;

use crate::cli::EffectiveConfig;
use crate::engine::DiffEngine;
use crate::error::{PipelineError, Result};
use crate::input::acquire;
use crate::output::{Destination, Distributor};
use crate::render::render;
use crate::upload::{UploadApi, UploadClient, UploadHandle};
use crate::util::ProcessRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Idle,
  Acquiring,
  Uploading,
  Rendering,
  Distributing,
  Done,
  Errored,
}

pub enum Completion {
  Delivered(Destination),
  Uploading(UploadHandle),
}

pub struct Pipeline<'a> {
  cfg: &'a EffectiveConfig,
  runner: Arc<dyn ProcessRunner>,
  engine: &'a dyn DiffEngine,
  uploader: Arc<dyn UploadApi>,
  stage: Stage,
}

impl<'a> Pipeline<'a> {
  pub fn new(
    cfg: &'a EffectiveConfig,
    runner: Arc<dyn ProcessRunner>,
    engine: &'a dyn DiffEngine,
    uploader: Arc<dyn UploadApi>,
  ) -> Self {
    Self { cfg, runner, engine, uploader, stage: Stage::Idle }
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  fn enter(&mut self, next: Stage) {
    tracing::debug!(from = ?self.stage, to = ?next, "pipeline stage");
    self.stage = next;
  }

  pub fn run(&mut self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Completion> {
    let result = self.drive(stdout, stderr);
    if let Err(e) = &result {
      tracing::debug!(error = %e, "pipeline failed");
      self.enter(Stage::Errored);
    }
    result
  }

  fn drive(&mut self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Completion> {
    let cfg = self.cfg;

    // Phase 1: acquire; a failed acquisition counts as empty input after its cause is shown
    self.enter(Stage::Acquiring);
    let raw = match acquire(cfg.input, &cfg.diff_args, &cfg.repo, self.runner.as_ref()) {
      Ok(raw) => raw,
      Err(e) => {
        let _ = writeln!(stderr, "{}", e);
        String::new()
      }
    };
    if raw.is_empty() {
      return Err(PipelineError::EmptyInput);
    }

    // Phase 2a: upload (fire, hand back the completion handle)
    if let Some(target) = cfg.delivery.upload_target {
      self.enter(Stage::Uploading);
      let client = UploadClient {
        api: self.uploader.clone(),
        runner: self.runner.clone(),
        opener: cfg.opener.clone(),
        clipboard: cfg.clipboard.clone(),
      };
      let handle = client.spawn(raw, target)?;
      self.enter(Stage::Done);
      return Ok(Completion::Uploading(handle));
    }

    // Phase 2b: render then distribute
    self.enter(Stage::Rendering);
    let artifact = render(&raw, &cfg.render, self.engine, &cfg.assets)?;

    self.enter(Stage::Distributing);
    let distributor = Distributor {
      delivery: &cfg.delivery,
      preview_dir: &cfg.preview_dir,
      opener: &cfg.opener,
      runner: self.runner.as_ref(),
    };
    let dest = distributor.distribute(&artifact, stdout)?;

    self.enter(Stage::Done);
    Ok(Completion::Delivered(dest))
  }
}
