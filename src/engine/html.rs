// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render parsed diff files as line-by-line or side-by-side HTML fragments
// role: engine/html
// inputs: &[DiffFile], EngineConfig (granularity flags)
// outputs: HTML fragment rooted at <div class="d2h-wrapper">
// invariants:
// - Every piece of diff text passes through escape(); only engine markup is emitted raw
// - Side-by-side rows stay aligned: both tables get the same number of rows
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use super::highlight::mark_pair;
use super::parser::{DiffBlock, DiffFile, DiffLine, LineType};
use super::EngineConfig;

pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      _ => out.push(ch),
    }
  }
  out
}

/// One code line ready for output: numbers, prefix, escaped/marked content.
#[derive(Debug, Clone)]
struct Row {
  kind: LineType,
  old_number: Option<u32>,
  new_number: Option<u32>,
  html: String,
}

impl Row {
  fn plain(line: &DiffLine) -> Self {
    Self { kind: line.kind, old_number: line.old_number, new_number: line.new_number, html: escape(&line.content) }
  }

  fn class(&self) -> &'static str {
    match self.kind {
      LineType::Insert => "d2h-ins",
      LineType::Delete => "d2h-del",
      LineType::Context => "d2h-cntx",
    }
  }

  fn prefix(&self) -> &'static str {
    match self.kind {
      LineType::Insert => "+",
      LineType::Delete => "-",
      LineType::Context => " ",
    }
  }
}

/// Groups a block into context rows and (deleted, inserted) change runs,
/// with intra-line markers applied to positionally paired lines.
enum Segment {
  Context(Row),
  Change { deleted: Vec<Row>, inserted: Vec<Row> },
}

fn segments(block: &DiffBlock, config: &EngineConfig) -> Vec<Segment> {
  let mut out = Vec::new();
  let lines = &block.lines;
  let mut i = 0;

  while i < lines.len() {
    if lines[i].kind == LineType::Context {
      out.push(Segment::Context(Row::plain(&lines[i])));
      i += 1;
      continue;
    }

    let mut deleted: Vec<&DiffLine> = Vec::new();
    let mut inserted: Vec<&DiffLine> = Vec::new();
    while i < lines.len() && lines[i].kind == LineType::Delete {
      deleted.push(&lines[i]);
      i += 1;
    }
    while i < lines.len() && lines[i].kind == LineType::Insert {
      inserted.push(&lines[i]);
      i += 1;
    }

    let mut del_rows: Vec<Row> = deleted.iter().map(|l| Row::plain(l)).collect();
    let mut ins_rows: Vec<Row> = inserted.iter().map(|l| Row::plain(l)).collect();
    for (n, (old, new)) in deleted.iter().zip(inserted.iter()).enumerate() {
      let (old_html, new_html) = mark_pair(&old.content, &new.content, config);
      del_rows[n].html = old_html;
      ins_rows[n].html = new_html;
    }

    out.push(Segment::Change { deleted: del_rows, inserted: ins_rows });
  }

  out
}

fn num(n: Option<u32>) -> String {
  n.map(|v| v.to_string()).unwrap_or_default()
}

fn file_header(file: &DiffFile) -> String {
  let tag = if file.is_binary {
    r#"<span class="d2h-tag d2h-changed">BINARY</span>"#
  } else if file.is_new {
    r#"<span class="d2h-tag d2h-added">ADDED</span>"#
  } else if file.is_deleted {
    r#"<span class="d2h-tag d2h-deleted">DELETED</span>"#
  } else if file.is_rename {
    r#"<span class="d2h-tag d2h-moved">RENAMED</span>"#
  } else {
    r#"<span class="d2h-tag d2h-changed">CHANGED</span>"#
  };

  format!(
    "<div class=\"d2h-file-header\"><span class=\"d2h-file-name-wrapper\"><span class=\"d2h-file-name\">{}</span>{}</span><span class=\"d2h-file-stats\"><span class=\"d2h-lines-added\">+{}</span><span class=\"d2h-lines-deleted\">-{}</span></span></div>\n",
    escape(&file.display_name()),
    tag,
    file.added_lines,
    file.deleted_lines
  )
}

fn empty_notice(file: &DiffFile) -> &'static str {
  if file.is_binary {
    "Binary files differ"
  } else {
    "File without changes"
  }
}

fn open_file(idx: usize, file: &DiffFile) -> String {
  format!(
    "<div id=\"d2h-{}\" class=\"d2h-file-wrapper\" data-lang=\"{}\">\n{}",
    idx,
    escape(&file.language),
    file_header(file)
  )
}

fn table(rows: &str) -> String {
  format!(
    "<div class=\"d2h-code-wrapper\"><table class=\"d2h-diff-table\"><tbody class=\"d2h-diff-tbody\">\n{}</tbody></table></div>",
    rows
  )
}

// --- line by line ---

fn line_info_row(text: &str) -> String {
  format!(
    "<tr><td class=\"d2h-code-linenumber d2h-info\"></td><td class=\"d2h-info\"><div class=\"d2h-code-line d2h-info\">{}</div></td></tr>\n",
    escape(text)
  )
}

fn line_row(row: &Row) -> String {
  let cls = row.class();
  format!(
    "<tr><td class=\"d2h-code-linenumber {cls}\"><div class=\"line-num1\">{}</div><div class=\"line-num2\">{}</div></td><td class=\"{cls}\"><div class=\"d2h-code-line {cls}\"><span class=\"d2h-code-line-prefix\">{}</span><span class=\"d2h-code-line-ctn\">{}</span></div></td></tr>\n",
    num(row.old_number),
    num(row.new_number),
    row.prefix(),
    row.html,
  )
}

/// Single-column rendering: deletions of a change run precede its insertions.
pub fn line_by_line(files: &[DiffFile], config: &EngineConfig) -> String {
  let mut out = String::from("<div class=\"d2h-wrapper\">\n");

  for (idx, file) in files.iter().enumerate() {
    let mut rows = String::new();
    if file.blocks.is_empty() {
      rows.push_str(&line_info_row(empty_notice(file)));
    }
    for block in &file.blocks {
      rows.push_str(&line_info_row(&block.header));
      for segment in segments(block, config) {
        match segment {
          Segment::Context(row) => rows.push_str(&line_row(&row)),
          Segment::Change { deleted, inserted } => {
            for row in deleted.iter().chain(inserted.iter()) {
              rows.push_str(&line_row(row));
            }
          }
        }
      }
    }

    out.push_str(&open_file(idx, file));
    out.push_str(&format!("<div class=\"d2h-file-diff\">{}</div>\n</div>\n", table(&rows)));
  }

  out.push_str("</div>\n");
  out
}

// --- side by side ---

fn side_info_row(text: &str) -> String {
  format!(
    "<tr><td class=\"d2h-code-side-linenumber d2h-info\"></td><td class=\"d2h-info\"><div class=\"d2h-code-side-line d2h-info\">{}</div></td></tr>\n",
    escape(text)
  )
}

fn side_row(row: Option<&Row>, number: fn(&Row) -> Option<u32>) -> String {
  match row {
    Some(row) => {
      let cls = row.class();
      format!(
        "<tr><td class=\"d2h-code-side-linenumber {cls}\">{}</td><td class=\"{cls}\"><div class=\"d2h-code-side-line {cls}\"><span class=\"d2h-code-line-prefix\">{}</span><span class=\"d2h-code-line-ctn\">{}</span></div></td></tr>\n",
        num(number(row)),
        row.prefix(),
        row.html,
      )
    }
    None => "<tr><td class=\"d2h-code-side-linenumber d2h-code-side-emptyplaceholder d2h-emptyplaceholder\"></td><td class=\"d2h-code-side-emptyplaceholder d2h-emptyplaceholder\"><div class=\"d2h-code-side-line d2h-code-side-emptyplaceholder\"></div></td></tr>\n".to_string(),
  }
}

/// Two-column rendering: old text on the left, new text on the right, change runs paired row by row.
pub fn side_by_side(files: &[DiffFile], config: &EngineConfig) -> String {
  let mut out = String::from("<div class=\"d2h-wrapper\">\n");

  for (idx, file) in files.iter().enumerate() {
    let mut left = String::new();
    let mut right = String::new();

    if file.blocks.is_empty() {
      left.push_str(&side_info_row(empty_notice(file)));
      right.push_str(&side_info_row(""));
    }
    for block in &file.blocks {
      left.push_str(&side_info_row(&block.header));
      right.push_str(&side_info_row(""));
      for segment in segments(block, config) {
        match segment {
          Segment::Context(row) => {
            left.push_str(&side_row(Some(&row), |r| r.old_number));
            right.push_str(&side_row(Some(&row), |r| r.new_number));
          }
          Segment::Change { deleted, inserted } => {
            for n in 0..deleted.len().max(inserted.len()) {
              left.push_str(&side_row(deleted.get(n), |r| r.old_number));
              right.push_str(&side_row(inserted.get(n), |r| r.new_number));
            }
          }
        }
      }
    }

    out.push_str(&open_file(idx, file));
    out.push_str(&format!(
      "<div class=\"d2h-files-diff\">\n<div class=\"d2h-file-side-diff\">{}</div>\n<div class=\"d2h-file-side-diff\">{}</div>\n</div>\n</div>\n",
      table(&left),
      table(&right)
    ));
  }

  out.push_str("</div>\n");
  out
}
