//! Match session: the ordered, cyclable candidate list built by one
//! completion request.
//!
//! A session is populated in *groups*: each completer pass appends its
//! candidates and then finalizes one group, which sorts the group and drops
//! duplicates. Groups keep their relative order when merged, so earlier
//! passes stay ahead of later ones while cycling. A session convention is
//! that the last entry is the *echo* entry — the literal text the user typed
//! — so cycling through the matches can always come back to the original
//! input.

use std::fmt;

/// How a candidate should be treated when spliced back into the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// A plain word (option name, keyword, user name, ...).
    Plain,
    /// A path fragment; directory candidates of this kind carry a trailing
    /// `/`, plain candidates never do.
    Path,
}

/// A single completion candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub text: String,
    pub kind: MatchKind,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Candidate list for one completion request.
///
/// Lifecycle: [`reset`](Self::reset) at the start of a request, `add_*`
/// during candidate generation, [`finish_group`](Self::finish_group) once per
/// completer pass, then iterated with [`next`](Self::next) after the
/// dispatcher returns. A session never outlives its request; the single
/// owner passes it down explicitly.
#[derive(Debug, Default)]
pub struct MatchSession {
    items: Vec<Match>,
    /// Start of the group currently being filled.
    group_start: usize,
    cursor: Option<usize>,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state from the previous request.
    pub fn reset(&mut self) {
        self.items.clear();
        self.group_start = 0;
        self.cursor = None;
    }

    /// Append a plain candidate to the open group.
    pub fn add_match(&mut self, text: impl Into<String>) {
        self.push(text.into(), MatchKind::Plain);
    }

    /// Append a path candidate to the open group.
    pub fn add_path_match(&mut self, text: impl Into<String>) {
        self.push(text.into(), MatchKind::Path);
    }

    /// Finalize the open group: sort it and drop duplicates. The next
    /// `add_*` call starts a new group.
    pub fn finish_group(&mut self) {
        let mut group = self.items.split_off(self.group_start);
        group.sort_by(|a, b| a.text.cmp(&b.text));
        group.dedup_by(|a, b| a.text == b.text);
        self.items.extend(group);
        self.group_start = self.items.len();
    }

    /// Append the echo entry: the literal text the user typed.
    pub fn add_echo_match(&mut self, original: impl Into<String>) {
        self.push(original.into(), MatchKind::Plain);
        self.group_start = self.items.len();
    }

    /// Append the echo entry as a path candidate.
    pub fn add_echo_path_match(&mut self, original: impl Into<String>) {
        self.push(original.into(), MatchKind::Path);
        self.group_start = self.items.len();
    }

    /// Collapse all finalized groups into one, keeping their relative order,
    /// and rewind cycling.
    pub fn merge_all_groups(&mut self) {
        self.group_start = self.items.len();
        self.cursor = None;
    }

    /// Next candidate, wrapping around at the end.
    ///
    /// With exactly two entries (one real candidate plus the echo entry) the
    /// real candidate is pinned: cycling always yields it, never the echo.
    /// Returns `None` for an empty session.
    pub fn next(&mut self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        if self.items.len() == 2 {
            self.cursor = Some(0);
            return Some(self.items[0].text.clone());
        }
        let pos = match self.cursor {
            None => 0,
            Some(prev) => (prev + 1) % self.items.len(),
        };
        self.cursor = Some(pos);
        Some(self.items[pos].text.clone())
    }

    /// Number of entries, echo included.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// All entries in cycle order.
    pub fn matches(&self) -> &[Match] {
        &self.items
    }

    fn push(&mut self, text: String, kind: MatchKind) {
        self.cursor = None;
        self.items.push(Match { text, kind });
    }
}
