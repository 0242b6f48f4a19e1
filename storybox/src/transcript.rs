//! Transcript of every sentence seen so far.
//!
//! Lines are stored sparsely by feed index. The line at the current index is
//! active, lower indices are past and higher ones future. Slots that were
//! never filled keep the future styling whatever their position.

use std::collections::BTreeMap;

use crate::entry::StoryEntry;

/// Highest feed index accepted. Rows are materialised up to the largest
/// index seen, so indices beyond this are rejected.
pub const MAX_INDEX: u64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    Past,
    Active,
    Future,
}

impl LineState {
    pub fn marker(&self) -> &'static str {
        match self {
            LineState::Past => " ",
            LineState::Active => ">",
            LineState::Future => ".",
        }
    }
}

/// A transcript row as it should be displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct Row<'a> {
    pub text: Option<&'a str>,
    pub state: LineState,
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: BTreeMap<u64, String>,
    current: Option<u64>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. Returns `true` when the current index moved.
    ///
    /// A line is only inserted into an empty slot; repeats never overwrite.
    /// Entries above [`MAX_INDEX`] are ignored.
    pub fn observe(&mut self, entry: &StoryEntry) -> bool {
        if entry.index > MAX_INDEX || self.current == Some(entry.index) {
            return false;
        }
        self.current = Some(entry.index);
        self.lines
            .entry(entry.index)
            .or_insert_with(|| entry.text.clone());
        true
    }

    pub fn current_index(&self) -> Option<u64> {
        self.current
    }

    pub fn line(&self, index: u64) -> Option<&str> {
        self.lines.get(&index).map(String::as_str)
    }

    /// Number of display rows: one past the highest index seen.
    pub fn row_count(&self) -> u64 {
        self.lines.keys().next_back().map_or(0, |max| max.saturating_add(1))
    }

    pub fn state_of(&self, index: u64) -> LineState {
        match self.current {
            Some(current) if index < current => LineState::Past,
            Some(current) if index == current => LineState::Active,
            _ => LineState::Future,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.row_count()).map(move |index| match self.lines.get(&index) {
            Some(line) => Row {
                text: Some(line.as_str()),
                state: self.state_of(index),
            },
            None => Row {
                text: None,
                state: LineState::Future,
            },
        })
    }

    /// Plain-text rendering, one line per row.
    pub fn render_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| format!("{} {}", row.state.marker(), row.text.unwrap_or("")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: u64, text: &str) -> StoryEntry {
        StoryEntry::new(index, text, "ocean", [10, 20, 30])
    }

    #[test]
    fn first_entry_becomes_active() {
        let mut t = Transcript::new();
        assert_eq!(t.row_count(), 0);
        assert!(t.observe(&entry(0, "One.")));
        assert_eq!(t.current_index(), Some(0));
        assert_eq!(t.state_of(0), LineState::Active);
    }

    #[test]
    fn same_index_is_not_new() {
        let mut t = Transcript::new();
        t.observe(&entry(0, "One."));
        assert!(!t.observe(&entry(0, "Changed.")));
        assert_eq!(t.line(0), Some("One."));
    }

    #[test]
    fn revisited_index_keeps_original_line() {
        let mut t = Transcript::new();
        t.observe(&entry(0, "One."));
        t.observe(&entry(1, "Two."));
        assert!(t.observe(&entry(0, "Rewritten.")));
        assert_eq!(t.line(0), Some("One."));
        assert_eq!(t.state_of(0), LineState::Active);
        assert_eq!(t.state_of(1), LineState::Future);
    }

    #[test]
    fn states_follow_current_index() {
        let mut t = Transcript::new();
        for i in 0..3 {
            t.observe(&entry(i, "x"));
        }
        t.observe(&entry(1, "x"));
        let states: Vec<_> = t.rows().map(|r| r.state).collect();
        assert_eq!(states, vec![LineState::Past, LineState::Active, LineState::Future]);
    }

    #[test]
    fn gaps_render_as_empty_future_rows() {
        let mut t = Transcript::new();
        t.observe(&entry(2, "Third."));
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text, None);
        assert_eq!(rows[0].state, LineState::Future);
        assert_eq!(rows[2].text, Some("Third."));
        assert_eq!(t.render_lines(), vec![". ", ". ", "> Third."]);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut t = Transcript::new();
        t.observe(&entry(1, "One."));
        assert!(!t.observe(&entry(u64::MAX, "Overflow.")));
        assert!(!t.observe(&entry(MAX_INDEX + 1, "Too far.")));
        assert_eq!(t.current_index(), Some(1));
        assert_eq!(t.row_count(), 2);

        assert!(t.observe(&entry(MAX_INDEX, "Last.")));
        assert_eq!(t.row_count(), MAX_INDEX + 1);
    }
}
