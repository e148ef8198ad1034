// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Post the raw diff to diffy.org (or a configured endpoint) and run the chosen follow-up on the returned link
// role: upload/client
// inputs: RawDiff text, UploadTarget, UploadApi seam, ProcessRunner, viewer/clipboard argv
// outputs: UploadOutcome; link/error lines on stdout/stderr
// side_effects: One HTTP POST; at most one viewer or clipboard process
// invariants:
// - Single request, no retries
// - Follow-up runs only after a parsed, non-error response carrying a url
// - Transport failure, parse failure, and server-reported error are distinct outcomes
// errors: Reported on stderr from the worker; never change the process exit code
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::{PipelineError, Result};
use crate::model::{UploadResponse, UploadTarget};
use crate::util::{CommandSpec, ProcessRunner};

pub const DEFAULT_UPLOAD_URL: &str = "http://diffy.org/api/new";
pub const FORM_FIELD: &str = "udiff";

// --- Trait seam for the paste service ---
pub trait UploadApi: Send + Sync {
  /// POST the diff and return the raw response body.
  fn post_diff(&self, diff: &str) -> Result<String>;
}

pub struct HttpUploadApi {
  url: String,
}

impl HttpUploadApi {
  pub fn new(url: impl Into<String>) -> Self {
    Self { url: url.into() }
  }

  fn transport(&self, err: ureq::Error) -> PipelineError {
    PipelineError::Transport { url: self.url.clone(), message: err.to_string() }
  }
}

impl UploadApi for HttpUploadApi {
  fn post_diff(&self, diff: &str) -> Result<String> {
    // Error statuses still carry a JSON body worth parsing.
    let agent: ureq::Agent = ureq::Agent::config_builder().http_status_as_error(false).build().into();

    tracing::debug!(url = %self.url, bytes = diff.len(), "posting diff");
    let mut resp = agent
      .post(&self.url)
      .header("User-Agent", concat!("diff2html-cli/", env!("CARGO_PKG_VERSION")))
      .send_form([(FORM_FIELD, diff)])
      .map_err(|e| self.transport(e))?;

    tracing::debug!(status = %resp.status(), "upload response");
    resp.body_mut().read_to_string().map_err(|e| self.transport(e))
  }
}

pub fn parse_response(body: &str) -> Result<UploadResponse> {
  serde_json::from_str::<UploadResponse>(body.trim()).map_err(|e| PipelineError::ResponseParse(e.to_string()))
}

#[derive(Debug)]
pub enum UploadOutcome {
  Linked { url: String },
  Rejected { message: String },
  Failed(PipelineError),
}

pub struct UploadClient {
  pub api: Arc<dyn UploadApi>,
  pub runner: Arc<dyn ProcessRunner>,
  pub opener: Vec<String>,
  pub clipboard: Vec<String>,
}

impl UploadClient {
  /// Post, report, and follow up. Every failure is reported on `err` and returned as an outcome.
  pub fn upload(&self, raw: &str, target: UploadTarget, out: &mut dyn Write, err: &mut dyn Write) -> UploadOutcome {
    let response = match self.api.post_diff(raw).and_then(|body| parse_response(&body)) {
      Ok(r) => r,
      Err(e) => {
        let _ = writeln!(err, "{}", e);
        return UploadOutcome::Failed(e);
      }
    };

    if response.is_error() {
      let message = response.message.unwrap_or_else(|| "unknown error".to_string());
      let _ = writeln!(err, "{}", PipelineError::UploadRejected { message: message.clone() });
      return UploadOutcome::Rejected { message };
    }

    let Some(url) = response.url else {
      let e = PipelineError::ResponseParse("response did not include a url".into());
      let _ = writeln!(err, "{}", e);
      return UploadOutcome::Failed(e);
    };

    let _ = writeln!(out, "Link powered by diffy.org:");
    let _ = writeln!(out, "{}", url);

    if let Err(e) = self.follow_up(&url, target) {
      tracing::warn!(error = %e, ?target, "follow-up action failed");
      let _ = writeln!(err, "{}", e);
    }

    UploadOutcome::Linked { url }
  }

  fn follow_up(&self, url: &str, target: UploadTarget) -> Result<()> {
    let spec = match target {
      UploadTarget::Print => return Ok(()),
      UploadTarget::Browser => CommandSpec::from_argv(&self.opener)
        .ok_or_else(|| PipelineError::command("<viewer>", "no viewer command configured"))?
        .arg(url),
      UploadTarget::Pbcopy => CommandSpec::from_argv(&self.clipboard)
        .ok_or_else(|| PipelineError::command("<clipboard>", "no clipboard command configured"))?
        .stdin(url),
    };
    self.runner.run(&spec).map(|_| ())
  }

  /// Run the upload on a worker thread; the handle is the completion signal.
  pub fn spawn(self, raw: String, target: UploadTarget) -> Result<UploadHandle> {
    let join = std::thread::Builder::new()
      .name("diffy-upload".into())
      .spawn(move || self.upload(&raw, target, &mut std::io::stdout(), &mut std::io::stderr()))
      .map_err(|e| PipelineError::Transport { url: String::new(), message: format!("could not start upload: {}", e) })?;
    Ok(UploadHandle { join })
  }
}

pub struct UploadHandle {
  join: JoinHandle<UploadOutcome>,
}

impl UploadHandle {
  /// Block until the upload and its follow-up have finished.
  pub fn wait(self) -> UploadOutcome {
    self.join.join().unwrap_or_else(|_| {
      UploadOutcome::Failed(PipelineError::Transport { url: String::new(), message: "upload worker panicked".into() })
    })
  }
}
