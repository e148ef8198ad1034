// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Configuration values and artifacts that flow between pipeline stages
// role: model/types
// outputs: RenderConfig, DeliveryConfig, RenderedArtifact, UploadResponse and the CLI choice enums
// invariants: Configuration values are immutable once normalized; upload_target outranks file_path outranks destination
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit at which intra-line changes are highlighted.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Granularity {
  Word,
  Char,
}

/// Single-column or side-by-side arrangement.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Layout {
  Line,
  Side,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  Html,
  Json,
}

impl OutputFormat {
  pub fn extension(self) -> &'static str {
    match self {
      OutputFormat::Html => "html",
      OutputFormat::Json => "json",
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum InputMode {
  File,
  Command,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputDestination {
  Preview,
  Stdout,
}

/// Follow-up action after a successful upload.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum UploadTarget {
  Browser,
  Pbcopy,
  Print,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
  pub granularity: Granularity,
  pub layout: Layout,
  pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
  pub destination: OutputDestination,
  pub file_path: Option<PathBuf>,
  pub upload_target: Option<UploadTarget>,
}

/// Rendered output tagged with the format it was produced in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedArtifact {
  pub format: OutputFormat,
  pub content: String,
}

/// JSON body returned by the paste service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub url: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

impl UploadResponse {
  pub fn is_error(&self) -> bool {
    self.status.as_deref() == Some("error")
  }
}
