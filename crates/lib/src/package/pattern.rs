//! File-name patterns used by copy rules.
//!
//! Only `*` is special: it matches any run of characters, including none.
//! Patterns are matched against a file name, never a path.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
  pub fn new(pattern: &str) -> Self {
    Self(pattern.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn matches(&self, name: &str) -> bool {
    let mut pieces = self.0.split('*');
    // split always yields at least one piece
    let first = pieces.next().unwrap_or_default();
    let Some(mut rest) = name.strip_prefix(first) else {
      return false;
    };

    let pieces: Vec<&str> = pieces.collect();
    let Some((last, middle)) = pieces.split_last() else {
      // no `*` at all: exact match
      return rest.is_empty();
    };

    for piece in middle {
      match rest.find(piece) {
        Some(idx) => rest = &rest[idx + piece.len()..],
        None => return false,
      }
    }
    rest.len() >= last.len() && rest.ends_with(last)
  }
}
