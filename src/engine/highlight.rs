// Intra-line change marking for paired deleted/inserted lines.

use similar::{ChangeTag, TextDiff};

use super::html::escape;
use super::EngineConfig;

/// Accumulates escaped text, wrapping changed runs in a single tag.
struct Marked {
  out: String,
  tag: &'static str,
  open: bool,
}

impl Marked {
  fn new(tag: &'static str) -> Self {
    Self { out: String::new(), tag, open: false }
  }

  fn push(&mut self, text: &str, changed: bool) {
    if changed && !self.open {
      self.out.push_str(&format!("<{}>", self.tag));
      self.open = true;
    } else if !changed && self.open {
      self.out.push_str(&format!("</{}>", self.tag));
      self.open = false;
    }
    self.out.push_str(&escape(text));
  }

  fn finish(mut self) -> String {
    if self.open {
      self.out.push_str(&format!("</{}>", self.tag));
    }
    self.out
  }
}

/// Escaped (old, new) markup for a changed line pair; changed runs are wrapped in
/// `<del>` on the old side and `<ins>` on the new side.
pub fn mark_pair(old: &str, new: &str, config: &EngineConfig) -> (String, String) {
  let diff = if config.char_by_char {
    TextDiff::from_chars(old, new)
  } else if config.word_by_word {
    TextDiff::from_words(old, new)
  } else {
    return (escape(old), escape(new));
  };

  let mut old_side = Marked::new("del");
  let mut new_side = Marked::new("ins");

  for change in diff.iter_all_changes() {
    let text = change.value();
    match change.tag() {
      ChangeTag::Equal => {
        old_side.push(text, false);
        new_side.push(text, false);
      }
      ChangeTag::Delete => old_side.push(text, true),
      ChangeTag::Insert => new_side.push(text, true),
    }
  }

  (old_side.finish(), new_side.finish())
}
