// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Diff rendering engine seam (DiffEngine) plus the built-in parser/HTML implementation
// role: engine/namespace
// inputs: Raw diff text; EngineConfig granularity flags
// outputs: HTML fragments (line-by-line, side-by-side) or Vec<DiffFile> for JSON
// invariants: Engine calls are pure; no file, process, or network access
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod highlight;
pub mod html;
pub mod parser;

pub use parser::{parse, DiffFile};

/// Flags consumed by the engine. Built from a Granularity, so exactly one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
  pub word_by_word: bool,
  pub char_by_char: bool,
}

/// The three entry points the render dispatcher relies on.
pub trait DiffEngine: Send + Sync {
  fn line_by_line_html(&self, raw: &str, config: &EngineConfig) -> String;
  fn side_by_side_html(&self, raw: &str, config: &EngineConfig) -> String;
  fn json(&self, raw: &str, config: &EngineConfig) -> Vec<DiffFile>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinEngine;

impl DiffEngine for BuiltinEngine {
  fn line_by_line_html(&self, raw: &str, config: &EngineConfig) -> String {
    html::line_by_line(&parse(raw), config)
  }

  fn side_by_side_html(&self, raw: &str, config: &EngineConfig) -> String {
    html::side_by_side(&parse(raw), config)
  }

  fn json(&self, raw: &str, _config: &EngineConfig) -> Vec<DiffFile> {
    parse(raw)
  }
}
