//! Line-level delta between two string values.
//!
//! Used to render long `description`-style strings that changed: instead of
//! printing both versions whole, show unified hunks with context lines.
//! Built on the `similar` crate (Myers diff).

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines kept around each change.
pub const CONTEXT_LINES: usize = 3;

/// The result of diffing two strings line by line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextDelta {
    pub hunks: Vec<DeltaHunk>,
    /// Total number of lines in the old text.
    pub old_lines: usize,
    /// Total number of lines in the new text.
    pub new_lines: usize,
}

impl TextDelta {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.count(|l| matches!(l, DeltaLine::Added(_)))
    }

    /// Lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.count(|l| matches!(l, DeltaLine::Removed(_)))
    }

    fn count(&self, pred: impl Fn(&DeltaLine) -> bool) -> usize {
        self.hunks.iter().flat_map(|h| &h.lines).filter(|l| pred(l)).count()
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeltaHunk {
    /// First old line covered by this hunk (1-based).
    pub old_start: usize,
    pub old_count: usize,
    /// First new line covered by this hunk (1-based).
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DeltaLine>,
}

impl DeltaHunk {
    /// The `@@ -a,b +c,d @@` header line.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

/// One line of a hunk, without its trailing newline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "text", rename_all = "lowercase")]
pub enum DeltaLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Whether a string is worth showing as a line delta rather than inline.
pub fn is_multiline(s: &str) -> bool {
    s.trim_end_matches('\n').contains('\n')
}

/// Compute the line delta from `old` to `new`.
pub fn diff_text(old: &str, new: &str) -> TextDelta {
    let old_lines = old.lines().count();
    let new_lines = new.lines().count();
    if old == new {
        return TextDelta {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DeltaHunk {
            old_start: first.old_range().start + 1,
            old_count: 0,
            new_start: first.new_range().start + 1,
            new_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.lines.push(DeltaLine::Context(text));
                        hunk.old_count += 1;
                        hunk.new_count += 1;
                    }
                    ChangeTag::Delete => {
                        hunk.lines.push(DeltaLine::Removed(text));
                        hunk.old_count += 1;
                    }
                    ChangeTag::Insert => {
                        hunk.lines.push(DeltaLine::Added(text));
                        hunk.new_count += 1;
                    }
                }
            }
        }

        hunks.push(hunk);
    }

    TextDelta {
        hunks,
        old_lines,
        new_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text() {
        let d = diff_text("a\nb\n", "a\nb\n");
        assert!(d.is_empty());
        assert_eq!(d.old_lines, 2);
    }

    #[test]
    fn appended_line() {
        let d = diff_text("Returns pets.\n", "Returns pets.\nPaginated.\n");
        assert_eq!(d.additions(), 1);
        assert_eq!(d.deletions(), 0);
        assert_eq!(d.hunks[0].lines[1], DeltaLine::Added("Paginated.".into()));
    }

    #[test]
    fn replaced_line() {
        let d = diff_text("one\ntwo\nthree\n", "one\n2\nthree\n");
        assert_eq!(d.hunks.len(), 1);
        let lines = &d.hunks[0].lines;
        assert!(lines.contains(&DeltaLine::Removed("two".into())));
        assert!(lines.contains(&DeltaLine::Added("2".into())));
        assert_eq!(d.hunks[0].header(), "@@ -1,3 +1,3 @@");
    }

    #[test]
    fn distant_changes_split_into_hunks() {
        let old: String = (1..=20).map(|i| format!("line {i}\n")).collect();
        let new = old.replace("line 2\n", "LINE 2\n").replace("line 18\n", "LINE 18\n");
        let d = diff_text(&old, &new);
        assert_eq!(d.hunks.len(), 2);
        assert_eq!(d.hunks[1].old_start, 15);
    }

    #[test]
    fn from_empty() {
        let d = diff_text("", "a\nb\n");
        assert_eq!(d.additions(), 2);
        assert_eq!(d.hunks[0].new_start, 1);
    }

    #[test]
    fn multiline_detection() {
        assert!(!is_multiline("single line\n"));
        assert!(is_multiline("first\nsecond"));
    }
}
