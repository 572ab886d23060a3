//! Query history log.
//!
//! Tracks the raw text of submitted queries, independent of their answers,
//! so the user can re-run a previous question with one selection.

use serde::{Deserialize, Serialize};

/// A record of a previously submitted query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique entry identifier (UUID format).
    pub id: String,
    /// The submitted query text, verbatim.
    pub query: String,
    /// Timestamp when the query was submitted (ISO 8601 format).
    pub timestamp: String,
}

impl HistoryItem {
    fn new(query: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Most-recent-first log of submitted queries.
///
/// Duplicates are allowed; entries are never edited. Capacity is an
/// explicit policy: unbounded unless a limit is configured, in which case
/// the oldest entries are dropped at record time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistory {
    entries: Vec<HistoryItem>,
    limit: Option<usize>,
}

impl QueryHistory {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history with an optional capacity cap.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Prepends a new entry and returns an owned copy of it.
    ///
    /// With a capacity cap the oldest entries are dropped; the new entry is
    /// returned either way, so a zero cap still yields a valid record.
    pub fn record(&mut self, query: impl Into<String>) -> HistoryItem {
        let entry = HistoryItem::new(query);
        self.entries.insert(0, entry.clone());
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
        entry
    }

    /// Returns all entries, most recent first.
    pub fn entries(&self) -> &[HistoryItem] {
        &self.entries
    }

    /// Looks up an entry by its ID.
    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_most_recent_first() {
        let mut history = QueryHistory::new();
        history.record("primera consulta");
        history.record("segunda consulta");

        assert_eq!(history.entries()[0].query, "segunda consulta");
        assert_eq!(history.entries()[1].query, "primera consulta");
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let mut history = QueryHistory::new();
        history.record("misma consulta");
        history.record("misma consulta");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = QueryHistory::with_limit(Some(2));
        history.record("uno");
        history.record("dos");
        history.record("tres");

        let queries: Vec<&str> = history
            .entries()
            .iter()
            .map(|e| e.query.as_str())
            .collect();
        assert_eq!(queries, vec!["tres", "dos"]);
    }

    #[test]
    fn test_find_by_id() {
        let mut history = QueryHistory::new();
        let id = history.record("buscar esto").id.clone();
        history.record("otra");

        assert_eq!(history.find(&id).unwrap().query, "buscar esto");
        assert!(history.find("no-such-id").is_none());
    }
}
