// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Acquire the raw diff text from a file or from `git diff <args>`
// role: input/acquirer
// inputs: InputMode, trailing CLI tokens, repository directory, ProcessRunner
// outputs: RawDiff text (possibly empty; emptiness is judged by the pipeline)
// side_effects: Reads one file or spawns one git process
// invariants:
// - git arguments are passed as an argv, never joined into a shell line
// - No non-empty trailing tokens ⇒ `git diff -M HEAD~1`
// errors: PipelineError::Io for unreadable files; PipelineError::Command for non-zero git exit
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use crate::error::Result;
use crate::model::InputMode;
use crate::util::{read_text, CommandSpec, ProcessRunner};

pub const DEFAULT_DIFF_ARGS: [&str; 2] = ["-M", "HEAD~1"];

/// Arguments after `git` for the diff command.
pub fn diff_command_args(extra: &[String]) -> Vec<String> {
  let mut args = vec!["diff".to_string()];
  if extra.iter().any(|a| !a.is_empty()) {
    args.extend(extra.iter().cloned());
  } else {
    args.extend(DEFAULT_DIFF_ARGS.iter().map(|s| s.to_string()));
  }
  args
}

pub fn diff_command(extra: &[String], repo: &Path) -> CommandSpec {
  CommandSpec { program: "git".into(), args: diff_command_args(extra), cwd: None, stdin: None }.current_dir(repo)
}

/// Produce the raw diff. In file mode the first trailing token is the path; with none
/// there is nothing to read and the result is empty.
pub fn acquire(mode: InputMode, rest: &[String], repo: &Path, runner: &dyn ProcessRunner) -> Result<String> {
  match mode {
    InputMode::File => match rest.first().filter(|p| !p.is_empty()) {
      Some(path) => {
        tracing::debug!(path = %path, "reading diff file");
        read_text(path)
      }
      None => Ok(String::new()),
    },
    InputMode::Command => {
      let spec = diff_command(rest, repo);
      tracing::debug!(command = %spec.display(), "running diff command");
      runner.run(&spec)
    }
  }
}
