// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse unified / git diff text into per-file blocks and numbered lines
// role: engine/parser
// inputs: Raw diff text (git diff, git show, diff -u)
// outputs: Vec<DiffFile> with camelCase JSON shape
// invariants:
// - Hunk bodies are consumed by the header's line counts, so "--- x" inside a hunk is content
// - addedLines/deletedLines equal the number of insert/delete lines across all blocks
// - Never panics on arbitrary input; unknown lines outside hunks are ignored
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEV_NULL: &str = "/dev/null";

static RE_HUNK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@.*$").expect("hunk header regex"));
static RE_GIT_HEADER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"^diff --git "?a/(.+?)"? "?b/(.+?)"?$"#).expect("git header regex"));

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
  Insert,
  Delete,
  Context,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
  #[serde(rename = "type")]
  pub kind: LineType,
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub old_number: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub new_number: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffBlock {
  pub header: String,
  pub old_start_line: u32,
  pub new_start_line: u32,
  pub lines: Vec<DiffLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffFile {
  pub old_name: String,
  pub new_name: String,
  pub language: String,
  pub is_git_diff: bool,
  pub is_new: bool,
  pub is_deleted: bool,
  pub is_rename: bool,
  pub is_binary: bool,
  pub added_lines: u32,
  pub deleted_lines: u32,
  pub blocks: Vec<DiffBlock>,
}

impl DiffFile {
  /// Name shown in headers: the surviving side, or "old → new" for renames.
  pub fn display_name(&self) -> String {
    if self.is_rename && self.old_name != self.new_name {
      return format!("{} → {}", self.old_name, self.new_name);
    }
    if self.new_name.is_empty() || self.new_name == DEV_NULL {
      self.old_name.clone()
    } else {
      self.new_name.clone()
    }
  }

  fn push_line(&mut self, line: DiffLine) {
    match line.kind {
      LineType::Insert => self.added_lines = self.added_lines.saturating_add(1),
      LineType::Delete => self.deleted_lines = self.deleted_lines.saturating_add(1),
      LineType::Context => {}
    }
    if let Some(block) = self.blocks.last_mut() {
      block.lines.push(line);
    }
  }
}

/// Position inside a hunk body.
struct HunkCursor {
  old_line: u32,
  new_line: u32,
  old_left: u32,
  new_left: u32,
}

impl HunkCursor {
  fn open(&self) -> bool {
    self.old_left > 0 || self.new_left > 0
  }

  /// Classify one body line. None means the line does not belong to the hunk.
  fn take(&mut self, line: &str) -> Option<DiffLine> {
    let (kind, content) = match line.chars().next() {
      Some('+') => (LineType::Insert, &line[1..]),
      Some('-') => (LineType::Delete, &line[1..]),
      Some(' ') => (LineType::Context, &line[1..]),
      // some tools strip the single space from empty context lines
      None => (LineType::Context, ""),
      Some(_) => return None,
    };

    let mut out = DiffLine { kind, content: content.to_string(), old_number: None, new_number: None };

    match kind {
      LineType::Insert => {
        out.new_number = Some(self.new_line);
        self.new_line = self.new_line.saturating_add(1);
        self.new_left = self.new_left.saturating_sub(1);
      }
      LineType::Delete => {
        out.old_number = Some(self.old_line);
        self.old_line = self.old_line.saturating_add(1);
        self.old_left = self.old_left.saturating_sub(1);
      }
      LineType::Context => {
        out.old_number = Some(self.old_line);
        out.new_number = Some(self.new_line);
        self.old_line = self.old_line.saturating_add(1);
        self.new_line = self.new_line.saturating_add(1);
        self.old_left = self.old_left.saturating_sub(1);
        self.new_left = self.new_left.saturating_sub(1);
      }
    }

    Some(out)
  }
}

fn strip_path(raw: &str, prefix: &str) -> String {
  let no_ts = raw.split('\t').next().unwrap_or("").trim();
  let unquoted = no_ts.trim_matches('"');
  if unquoted == DEV_NULL {
    return unquoted.to_string();
  }
  unquoted.strip_prefix(prefix).unwrap_or(unquoted).to_string()
}

fn language_of(name: &str) -> String {
  let base = name.rsplit('/').next().unwrap_or(name);
  match base.rsplit_once('.') {
    Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
    _ => String::new(),
  }
}

fn finish(mut file: DiffFile, files: &mut Vec<DiffFile>) {
  let name = if file.new_name.is_empty() || file.new_name == DEV_NULL { &file.old_name } else { &file.new_name };
  file.language = language_of(name);
  files.push(file);
}

fn parse_count(m: Option<regex::Match<'_>>) -> u32 {
  m.and_then(|m| m.as_str().parse().ok()).unwrap_or(1)
}

/// Parse raw diff text into files.
pub fn parse(raw: &str) -> Vec<DiffFile> {
  let mut files: Vec<DiffFile> = Vec::new();
  let mut current: Option<DiffFile> = None;
  let mut saw_old_header = false;
  let mut hunk: Option<HunkCursor> = None;

  for line in raw.lines() {
    if let Some(cursor) = hunk.as_mut() {
      if line.starts_with('\\') {
        continue;
      }
      if cursor.open() {
        if let Some(parsed) = cursor.take(line) {
          if let Some(file) = current.as_mut() {
            file.push_line(parsed);
          }
          continue;
        }
      }
      hunk = None;
    }

    if line.starts_with("diff --git ") {
      if let Some(done) = current.take() {
        finish(done, &mut files);
      }
      let mut file = DiffFile { is_git_diff: true, ..DiffFile::default() };
      if let Some(c) = RE_GIT_HEADER.captures(line) {
        file.old_name = c[1].to_string();
        file.new_name = c[2].to_string();
      }
      current = Some(file);
      saw_old_header = false;
    } else if let Some(rest) = line.strip_prefix("--- ") {
      let starts_new = match current.as_ref() {
        None => true,
        Some(f) => saw_old_header || !f.blocks.is_empty(),
      };
      if starts_new {
        if let Some(done) = current.take() {
          finish(done, &mut files);
        }
        current = Some(DiffFile::default());
      }
      if let Some(file) = current.as_mut() {
        file.old_name = strip_path(rest, "a/");
        if file.old_name == DEV_NULL {
          file.is_new = true;
        }
      }
      saw_old_header = true;
    } else if let Some(rest) = line.strip_prefix("+++ ") {
      let file = current.get_or_insert_with(DiffFile::default);
      file.new_name = strip_path(rest, "b/");
      if file.new_name == DEV_NULL {
        file.is_deleted = true;
      }
    } else if let Some(c) = RE_HUNK.captures(line) {
      let file = current.get_or_insert_with(DiffFile::default);
      let old_start: u32 = c[1].parse().unwrap_or(0);
      let new_start: u32 = c[3].parse().unwrap_or(0);
      file.blocks.push(DiffBlock {
        header: line.to_string(),
        old_start_line: old_start,
        new_start_line: new_start,
        lines: Vec::new(),
      });
      hunk = Some(HunkCursor {
        old_line: old_start,
        new_line: new_start,
        old_left: parse_count(c.get(2)),
        new_left: parse_count(c.get(4)),
      });
    } else if let Some(file) = current.as_mut() {
      if line.starts_with("new file mode") {
        file.is_new = true;
      } else if line.starts_with("deleted file mode") {
        file.is_deleted = true;
      } else if let Some(from) = line.strip_prefix("rename from ") {
        file.is_rename = true;
        file.old_name = from.to_string();
      } else if let Some(to) = line.strip_prefix("rename to ") {
        file.is_rename = true;
        file.new_name = to.to_string();
      } else if line.starts_with("Binary files ") || line == "GIT binary patch" {
        file.is_binary = true;
      }
    }
  }

  if let Some(done) = current.take() {
    finish(done, &mut files);
  }

  files
}
