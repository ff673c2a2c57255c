//! # History Ledger
//!
//! The ordered list of local keys a navigator can currently return to.
//! For stacks this is the back-stack (bottom first); for switches and tabs
//! it is the order in which sections were visited.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything with a single entry.
    pub fn reset(&mut self, key: &str) {
        self.entries.clear();
        self.entries.push(key.to_string());
    }

    pub fn push(&mut self, key: &str) {
        self.entries.push(key.to_string());
    }

    /// Moves `key` to the top, dropping any earlier visit.
    pub fn visit(&mut self, key: &str) {
        self.entries.retain(|entry| entry != key);
        self.entries.push(key.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry == key)
    }

    /// First occurrence of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry == key)
    }

    /// Last occurrence of `key` strictly below the top.
    pub fn position_below_top(&self, key: &str) -> Option<usize> {
        let below = self.entries.len().checked_sub(1)?;
        self.entries[..below].iter().rposition(|entry| entry == key)
    }

    /// Keeps entries `0..=index`.
    pub fn truncate_after(&mut self, index: usize) {
        self.entries.truncate(index + 1);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(keys: &[&str]) -> History {
        let mut h = History::new();
        for key in keys {
            h.push(key);
        }
        h
    }

    #[test]
    fn test_push_does_not_deduplicate() {
        let h = history(&["A", "B", "B"]);
        assert_eq!(h.entries(), ["A", "B", "B"]);
        assert_eq!(h.position("B"), Some(1));
    }

    #[test]
    fn test_visit_moves_to_top() {
        let mut h = history(&["home", "search", "profile"]);
        h.visit("search");
        assert_eq!(h.entries(), ["home", "profile", "search"]);
    }

    #[test]
    fn test_position_below_top_prefers_latest_copy() {
        let h = history(&["A", "B", "A", "C"]);
        assert_eq!(h.position_below_top("A"), Some(2));
        assert_eq!(h.position_below_top("C"), None);
        assert_eq!(History::new().position_below_top("A"), None);
    }

    #[test]
    fn test_truncate_after_and_reset() {
        let mut h = history(&["A", "B", "C"]);
        h.truncate_after(0);
        assert_eq!(h.entries(), ["A"]);
        h.reset("Z");
        assert_eq!(h.top(), Some("Z"));
        assert_eq!(h.len(), 1);
    }
}
