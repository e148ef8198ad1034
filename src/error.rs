// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Error kinds raised by the acquire/render/deliver/upload pipeline
// role: errors/types
// outputs: PipelineError with user-facing Display messages
// invariants: EmptyInput is the only variant the controller turns into help output
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("could not {action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("command `{command}` failed: {message}")]
  Command { command: String, message: String },

  #[error("missing template asset {}: {source}", path.display())]
  Template {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("upload to {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("could not parse response: {0}")]
  ResponseParse(String),

  #[error("Error: {message}")]
  UploadRejected { message: String },

  #[error("failed to encode JSON: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("The input is empty. Try again.")]
  EmptyInput,
}

impl PipelineError {
  pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { action: "read", path: path.into(), source }
  }

  pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { action: "write", path: path.into(), source }
  }

  pub fn command<S: Into<String>>(command: S, message: S) -> Self {
    Self::Command { command: command.into(), message: message.into() }
  }
}
