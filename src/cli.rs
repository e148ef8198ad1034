use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::{
  DeliveryConfig, Granularity, InputMode, Layout, OutputDestination, OutputFormat, RenderConfig, UploadTarget,
};
use crate::render::Assets;
use crate::upload::DEFAULT_UPLOAD_URL;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "diff2html",
    version,
    about = "Render git diffs as pretty HTML or JSON, preview them, or share them on diffy.org",
    override_usage = "diff2html [OPTIONS] [-- <DIFF_ARGS>...]",
    after_help = "Examples:\n  diff2html -s line -f html -d word -i command -o preview -- -M HEAD~1\n  diff2html -i file -- my-file-diff.diff\n  diff2html -f json -o stdout -- -M HEAD~1\n  diff2html -F my-pretty-diff.html -- -M HEAD~1\n  diff2html -u print -- -M HEAD~1",
    long_about = None
)]
pub struct Cli {
  /// Output style
  #[arg(short = 's', long, value_enum, default_value_t = Layout::Line)]
  pub style: Layout,

  /// Output format
  #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Html)]
  pub format: OutputFormat,

  /// Diff style (intra-line comparison granularity)
  #[arg(short = 'd', long, value_enum, default_value_t = Granularity::Word)]
  pub diff: Granularity,

  /// Diff input source
  #[arg(short = 'i', long, value_enum, default_value_t = InputMode::Command)]
  pub input: InputMode,

  /// Output destination
  #[arg(short = 'o', long, value_enum, default_value_t = OutputDestination::Preview)]
  pub output: OutputDestination,

  /// Upload to diffy.org and then open, copy, or print the link
  #[arg(short = 'u', long, value_enum)]
  pub diffy: Option<UploadTarget>,

  /// Send output to file (overrides output option)
  #[arg(short = 'F', long)]
  pub file: Option<PathBuf>,

  /// Repository the diff command runs in
  #[arg(long, default_value = ".")]
  pub repo: PathBuf,

  /// Directory holding template.html and diff2html.css (default: built-in copies)
  #[arg(long, env = "DIFF2HTML_ASSETS_DIR")]
  pub assets_dir: Option<PathBuf>,

  /// Command used to open previews and links (default: platform opener)
  #[arg(long, env = "DIFF2HTML_OPENER")]
  pub opener: Option<String>,

  /// Command that reads the link on stdin into the clipboard (default: platform clipboard tool)
  #[arg(long, env = "DIFF2HTML_CLIPBOARD")]
  pub clipboard: Option<String>,

  /// Paste service endpoint
  #[arg(long, env = "DIFF2HTML_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL, hide = true)]
  pub upload_url: String,

  /// Increase log verbosity (-v debug, -vv trace); RUST_LOG wins when set
  #[arg(short = 'v', long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Arguments for `git diff` (command input) or the diff file path (file input)
  #[arg(value_name = "DIFF_ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
  pub diff_args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub repo: PathBuf,
  pub input: InputMode,
  pub diff_args: Vec<String>,
  pub render: RenderConfig,
  pub delivery: DeliveryConfig,
  pub assets: Assets,
  pub preview_dir: PathBuf,
  pub opener: Vec<String>,
  pub clipboard: Vec<String>,
  pub upload_url: String,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let opener = match cli.opener.as_deref() {
    Some(line) => util::parse_command_line(line)?,
    None => util::default_opener(),
  };
  let clipboard = match cli.clipboard.as_deref() {
    Some(line) => util::parse_command_line(line)?,
    None => util::default_clipboard(),
  };
  let assets = cli.assets_dir.map(Assets::in_dir).unwrap_or(Assets::Embedded);

  Ok(EffectiveConfig {
    repo: cli.repo,
    input: cli.input,
    diff_args: cli.diff_args,
    render: RenderConfig { granularity: cli.diff, layout: cli.style, format: cli.format },
    delivery: DeliveryConfig { destination: cli.output, file_path: cli.file, upload_target: cli.diffy },
    assets,
    preview_dir: std::env::temp_dir(),
    opener,
    clipboard,
    upload_url: cli.upload_url,
  })
}
