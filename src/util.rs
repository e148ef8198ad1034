// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Process runner seam, file store helpers, platform command defaults, and man page rendering
// role: utilities/helpers
// inputs: CommandSpec argument vectors; file paths; clap CommandFactory
// outputs: Captured stdout text, file contents, troff man page text
// side_effects: run spawns subprocesses; write_text creates/truncates files
// invariants:
// - Commands are spawned from argument vectors, never through a shell
// - Non-zero exit is always an error carrying the command line and stderr
// errors: PipelineError::Command for spawn/exit failures; PipelineError::Io with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::CommandFactory;

use crate::error::{PipelineError, Result};

/// A program invocation: argv, optional working directory, optional stdin payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub stdin: Option<String>,
}

impl CommandSpec {
  /// Build a spec from an argv whose first element is the program.
  /// Returns None when `argv` is empty.
  pub fn from_argv(argv: &[String]) -> Option<Self> {
    let (program, args) = argv.split_first()?;
    Some(Self { program: program.clone(), args: args.to_vec(), cwd: None, stdin: None })
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn stdin(mut self, input: impl Into<String>) -> Self {
    self.stdin = Some(input.into());
    self
  }

  /// Human-readable command line for logs and error messages.
  pub fn display(&self) -> String {
    let mut parts = Vec::with_capacity(self.args.len() + 1);
    parts.push(self.program.as_str());
    parts.extend(self.args.iter().map(String::as_str));
    shell_words::join(parts)
  }
}

/// Seam over subprocess execution so the pipeline can be driven without real commands.
pub trait ProcessRunner: Send + Sync {
  /// Run to completion and return captured stdout.
  fn run(&self, spec: &CommandSpec) -> Result<String>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  fn run(&self, spec: &CommandSpec) -> Result<String> {
    let line = spec.display();
    tracing::debug!(command = %line, "spawning");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).stdout(Stdio::piped()).stderr(Stdio::piped());

    if let Some(dir) = &spec.cwd {
      cmd.current_dir(dir);
    }
    if spec.stdin.is_some() {
      cmd.stdin(Stdio::piped());
    }

    let mut child = cmd.spawn().map_err(|e| PipelineError::command(line.clone(), e.to_string()))?;

    if let Some(input) = &spec.stdin {
      if let Some(mut pipe) = child.stdin.take() {
        pipe
          .write_all(input.as_bytes())
          .map_err(|e| PipelineError::command(line.clone(), e.to_string()))?;
      }
    }

    let out = child
      .wait_with_output()
      .map_err(|e| PipelineError::command(line.clone(), e.to_string()))?;

    if out.status.success() {
      Ok(String::from_utf8_lossy(&out.stdout).to_string())
    } else {
      let stderr = String::from_utf8_lossy(&out.stderr);
      let message = match stderr.trim() {
        "" => format!("exited with {}", out.status),
        s => s.to_string(),
      };
      Err(PipelineError::Command { command: line, message })
    }
  }
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
  let path = path.as_ref();
  std::fs::read_to_string(path).map_err(|e| PipelineError::read(path, e))
}

pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
  let path = path.as_ref();
  tracing::debug!(path = %path.display(), bytes = content.len(), "writing file");
  std::fs::write(path, content).map_err(|e| PipelineError::write(path, e))
}

/// Split a user-supplied command string ("xclip -selection clipboard") into argv.
pub fn parse_command_line(line: &str) -> anyhow::Result<Vec<String>> {
  let argv = shell_words::split(line)?;
  if argv.is_empty() {
    anyhow::bail!("command must not be empty");
  }
  Ok(argv)
}

/// Platform command that opens a path or URL in the default viewer.
pub fn default_opener() -> Vec<String> {
  let argv: &[&str] = if cfg!(target_os = "macos") {
    &["open"]
  } else if cfg!(target_os = "windows") {
    &["cmd", "/C", "start", ""]
  } else {
    &["xdg-open"]
  };
  argv.iter().map(|s| s.to_string()).collect()
}

/// Platform command that reads stdin into the system clipboard.
pub fn default_clipboard() -> Vec<String> {
  let argv: &[&str] = if cfg!(target_os = "macos") {
    &["pbcopy"]
  } else if cfg!(target_os = "windows") {
    &["clip"]
  } else {
    &["xclip", "-selection", "clipboard"]
  };
  argv.iter().map(|s| s.to_string()).collect()
}

/// Render a section-1 man page for the CLI.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let mut buf: Vec<u8> = Vec::new();
  clap_mangen::Man::new(T::command()).render(&mut buf)?;
  Ok(String::from_utf8_lossy(&buf).to_string())
}
